//! Repository for the `notifications` table.

use kaizen_core::types::DbId;
use sqlx::PgPool;

use crate::models::notification::{CreateNotifications, Notification};

/// Column list for [`Notification`], selected from `n` joined to the
/// recipient `u` and the related idea `i`.
const COLUMNS: &str = "n.id, n.recipient_id, u.employee_number AS recipient_employee_number, \
                       n.type, n.title, n.message, n.related_idea_id, \
                       i.title AS related_idea_title, i.status AS related_idea_status, \
                       n.is_read, n.read_at, n.created_at";

fn select_from(source: &str) -> String {
    format!(
        "SELECT {COLUMNS} FROM {source} n \
         JOIN users u ON u.id = n.recipient_id \
         LEFT JOIN ideas i ON i.id = n.related_idea_id"
    )
}

/// Provides CRUD operations for notifications.
pub struct NotificationRepo;

impl NotificationRepo {
    /// Write one notification per recipient in a single statement.
    ///
    /// Returns the number of rows inserted.
    pub async fn create_many(
        pool: &PgPool,
        input: &CreateNotifications,
    ) -> Result<u64, sqlx::Error> {
        if input.recipient_ids.is_empty() {
            return Ok(0);
        }
        let result = sqlx::query(
            "INSERT INTO notifications (recipient_id, type, title, message, related_idea_id) \
             SELECT recipient_id, $2, $3, $4, $5 \
             FROM UNNEST($1::BIGINT[]) AS recipient_id",
        )
        .bind(&input.recipient_ids)
        .bind(&input.notification_type)
        .bind(&input.title)
        .bind(&input.message)
        .bind(input.related_idea_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// List a recipient's notifications, newest first.
    ///
    /// `is_read` narrows to read or unread rows when given.
    pub async fn list_for_recipient(
        pool: &PgPool,
        recipient_id: DbId,
        is_read: Option<bool>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Notification>, sqlx::Error> {
        let query = format!(
            "{} WHERE n.recipient_id = $1 AND ($2::BOOL IS NULL OR n.is_read = $2) \
             ORDER BY n.created_at DESC, n.id DESC \
             LIMIT $3 OFFSET $4",
            select_from("notifications")
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(recipient_id)
            .bind(is_read)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Count a recipient's notifications, optionally by read state.
    pub async fn count_for_recipient(
        pool: &PgPool,
        recipient_id: DbId,
        is_read: Option<bool>,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM notifications \
             WHERE recipient_id = $1 AND ($2::BOOL IS NULL OR is_read = $2)",
        )
        .bind(recipient_id)
        .bind(is_read)
        .fetch_one(pool)
        .await
    }

    /// Get the number of unread notifications for a recipient.
    pub async fn unread_count(pool: &PgPool, recipient_id: DbId) -> Result<i64, sqlx::Error> {
        Self::count_for_recipient(pool, recipient_id, Some(false)).await
    }

    /// Mark a single notification as read.
    ///
    /// Idempotent: an already-read notification keeps its original `read_at`.
    /// Returns `None` if the notification does not exist for `recipient_id`.
    pub async fn mark_read(
        pool: &PgPool,
        notification_id: DbId,
        recipient_id: DbId,
    ) -> Result<Option<Notification>, sqlx::Error> {
        let query = format!(
            "WITH updated AS ( \
                UPDATE notifications \
                SET is_read = true, read_at = COALESCE(read_at, NOW()) \
                WHERE id = $1 AND recipient_id = $2 \
                RETURNING * \
             ) {}",
            select_from("updated")
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(notification_id)
            .bind(recipient_id)
            .fetch_optional(pool)
            .await
    }

    /// Mark all unread notifications as read for a recipient.
    ///
    /// Returns the number of notifications that were marked read.
    pub async fn mark_all_read(pool: &PgPool, recipient_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE notifications \
             SET is_read = true, read_at = NOW() \
             WHERE recipient_id = $1 AND is_read = false",
        )
        .bind(recipient_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
