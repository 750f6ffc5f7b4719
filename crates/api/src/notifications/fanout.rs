//! Best-effort notification fan-out.
//!
//! Runs after the idea write has committed. Failures are logged and reported
//! back as [`Delivery::Failed`]; they never undo or fail the idea write.

use kaizen_core::idea::IdeaStatus;
use kaizen_core::notification::{status_content, submitted_content, NotificationContent};
use kaizen_core::roles::Role;
use kaizen_core::types::DbId;
use kaizen_db::models::idea::Idea;
use kaizen_db::models::notification::CreateNotifications;
use kaizen_db::repositories::{NotificationRepo, UserRepo};
use kaizen_db::DbPool;

/// Outcome of a fan-out attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Rows written (zero when there were no recipients).
    Delivered(u64),
    Failed,
}

impl Delivery {
    pub fn is_failed(&self) -> bool {
        matches!(self, Delivery::Failed)
    }
}

/// Notify every active reviewer and admin that `idea` was submitted.
pub async fn idea_submitted(pool: &DbPool, idea: &Idea) -> Delivery {
    let roles = Role::reviewing_roles().map(|r| r.as_str());
    let recipients = match UserRepo::list_active_ids_by_roles(pool, &roles).await {
        Ok(ids) => ids,
        Err(e) => {
            tracing::warn!(idea_id = idea.id, error = %e, "Failed to resolve reviewers for fan-out");
            return Delivery::Failed;
        }
    };

    let content = submitted_content(&idea.submitter_name, &idea.title);
    deliver(pool, recipients, content, idea.id).await
}

/// Notify the submitter that `idea` moved to `status`.
pub async fn status_changed(
    pool: &DbPool,
    idea: &Idea,
    status: IdeaStatus,
    review_comments: Option<&str>,
) -> Delivery {
    match status_content(status, &idea.title, review_comments) {
        Some(content) => deliver(pool, vec![idea.submitted_by], content, idea.id).await,
        None => Delivery::Delivered(0),
    }
}

async fn deliver(
    pool: &DbPool,
    recipient_ids: Vec<DbId>,
    content: NotificationContent,
    related_idea_id: DbId,
) -> Delivery {
    let notification_type = content.notification_type;
    let input = CreateNotifications {
        recipient_ids,
        notification_type: notification_type.as_str().to_string(),
        title: content.title,
        message: content.message,
        related_idea_id: Some(related_idea_id),
    };

    match NotificationRepo::create_many(pool, &input).await {
        Ok(written) => {
            tracing::debug!(
                idea_id = related_idea_id,
                %notification_type,
                recipients = written,
                "Notifications delivered"
            );
            Delivery::Delivered(written)
        }
        Err(e) => {
            tracing::warn!(
                idea_id = related_idea_id,
                %notification_type,
                error = %e,
                "Failed to deliver notifications"
            );
            Delivery::Failed
        }
    }
}
