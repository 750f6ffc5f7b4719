//! User entity model and DTOs.

use kaizen_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub employee_number: String,
    pub name: String,
    pub email: String,
    pub department: String,
    pub designation: String,
    pub role: String,
    pub is_active: bool,
    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new user. Values are expected to be validated.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    pub employee_number: String,
    pub name: String,
    pub email: String,
    pub department: String,
    pub designation: String,
    pub role: String,
}

/// DTO for updating an existing user. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub department: Option<String>,
    pub designation: Option<String>,
    pub role: Option<String>,
    pub is_active: Option<bool>,
}

/// Filters for the admin user listing. Only active users are listed.
#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    pub department: Option<String>,
    pub role: Option<String>,
}
