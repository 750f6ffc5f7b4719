//! Request handlers, one module per resource.
//!
//! Handlers delegate persistence to `kaizen_db` repositories and domain rules
//! to `kaizen_core`, mapping failures through [`crate::error::AppError`].

pub mod auth;
pub mod idea;
pub mod notification;
pub mod user;
