//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods
//! that accept `&PgPool` as the first argument.

pub mod idea_repo;
pub mod notification_repo;
pub mod stats_repo;
pub mod user_repo;

pub use idea_repo::IdeaRepo;
pub use notification_repo::NotificationRepo;
pub use stats_repo::StatsRepo;
pub use user_repo::UserRepo;
