//! Domain rules for the Kaizen idea platform.
//!
//! Nothing in this crate touches the database or HTTP; the `db` and `api`
//! crates depend on it for enums, validation and scoring.

pub mod department;
pub mod error;
pub mod idea;
pub mod leaderboard;
pub mod notification;
pub mod pagination;
pub mod roles;
pub mod types;
pub mod user;
pub mod validation;
