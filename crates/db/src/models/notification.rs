//! Notification entity models and DTOs.

use kaizen_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A notification row joined with its recipient's employee number and the
/// related idea's current title and status.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Notification {
    pub id: DbId,
    pub recipient_id: DbId,
    pub recipient_employee_number: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub notification_type: String,
    pub title: String,
    pub message: String,
    pub related_idea_id: Option<DbId>,
    pub related_idea_title: Option<String>,
    pub related_idea_status: Option<String>,
    pub is_read: bool,
    pub read_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// One notification to be written for each recipient.
#[derive(Debug, Clone)]
pub struct CreateNotifications {
    pub recipient_ids: Vec<DbId>,
    pub notification_type: String,
    pub title: String,
    pub message: String,
    pub related_idea_id: Option<DbId>,
}
