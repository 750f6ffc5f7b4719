//! Idea entity models and DTOs.

use kaizen_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An idea row joined with its submitter and reviewer identity.
///
/// `submitter_*` and `reviewer_*` come from `users` at read time; nothing
/// denormalized is stored on `ideas`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Idea {
    pub id: DbId,
    pub title: String,
    pub problem: String,
    pub improvement: String,
    pub benefit: String,
    pub estimated_savings: Option<f64>,
    pub department: String,
    pub submitted_by: DbId,
    pub submitter_employee_number: String,
    pub submitter_name: String,
    pub submitter_department: String,
    pub status: String,
    pub reviewed_by: Option<DbId>,
    pub reviewer_employee_number: Option<String>,
    pub reviewer_name: Option<String>,
    pub reviewed_at: Option<Timestamp>,
    pub review_comments: Option<String>,
    pub implementation_date: Option<Timestamp>,
    pub actual_savings: Option<f64>,
    pub tags: Vec<String>,
    pub priority: String,
    #[serde(skip)]
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `idea_images` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct IdeaImage {
    pub id: DbId,
    pub idea_id: DbId,
    pub filename: String,
    pub original_name: String,
    pub mime_type: String,
    pub size_bytes: i64,
    pub uploaded_at: Timestamp,
}

/// An idea together with its image metadata.
#[derive(Debug, Clone, Serialize)]
pub struct IdeaDetail {
    #[serde(flatten)]
    pub idea: Idea,
    pub images: Vec<IdeaImage>,
}

/// DTO for inserting a new idea. Status always starts at `under_review`.
#[derive(Debug, Clone)]
pub struct CreateIdea {
    pub title: String,
    pub problem: String,
    pub improvement: String,
    pub benefit: String,
    pub estimated_savings: Option<f64>,
    pub department: String,
    pub submitted_by: DbId,
    pub tags: Vec<String>,
    pub priority: String,
}

/// DTO for an owner content edit. All fields are optional.
#[derive(Debug, Clone, Default)]
pub struct UpdateIdea {
    pub title: Option<String>,
    pub problem: Option<String>,
    pub improvement: Option<String>,
    pub benefit: Option<String>,
    pub estimated_savings: Option<f64>,
    pub department: Option<String>,
    pub tags: Option<Vec<String>>,
    pub priority: Option<String>,
}

/// A reviewer's status change, applied only if the idea is still in `from`.
#[derive(Debug, Clone)]
pub struct StatusTransition {
    pub from: String,
    pub to: String,
    pub reviewed_by: DbId,
    pub review_comments: Option<String>,
    pub actual_savings: Option<f64>,
    /// Stamp `implementation_date` with the transition time.
    pub mark_implemented: bool,
}

/// DTO for recording image metadata.
#[derive(Debug, Clone)]
pub struct CreateIdeaImage {
    pub idea_id: DbId,
    pub filename: String,
    pub original_name: String,
    pub mime_type: String,
    pub size_bytes: i64,
}

/// Filters for idea listings. Every field narrows the result.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IdeaFilter {
    pub status: Option<String>,
    pub department: Option<String>,
    pub benefit: Option<String>,
    /// Submitter's employee number.
    pub submitter_employee_number: Option<String>,
    /// Submitter's user id (used for "my ideas").
    pub submitted_by: Option<DbId>,
    /// Case-insensitive substring over title, problem and improvement.
    pub search: Option<String>,
}
