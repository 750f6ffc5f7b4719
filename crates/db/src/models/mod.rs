//! Row models and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` struct matching the database row
//! - A `Create*` DTO for inserts
//! - An `Update*` DTO (all `Option` fields) for patches, where the entity is mutable

pub mod idea;
pub mod notification;
pub mod stats;
pub mod user;
