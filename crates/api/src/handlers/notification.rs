//! Handlers for the `/notifications` resource.
//!
//! All endpoints operate on the caller's own notifications.

use axum::extract::{Path, Query, State};
use axum::Json;
use kaizen_core::error::CoreError;
use kaizen_core::pagination::{PageInfo, PageRequest};
use kaizen_core::roles::Capability;
use kaizen_core::types::DbId;
use kaizen_db::models::notification::Notification;
use kaizen_db::repositories::NotificationRepo;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::{ApiResponse, Page};
use crate::state::AppState;

/// Default page size for notification listing.
const DEFAULT_LIMIT: i64 = 20;

/// Query parameters for `GET /notifications`.
#[derive(Debug, Deserialize)]
pub struct NotificationQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    /// Narrow to read (`true`) or unread (`false`) notifications.
    #[serde(alias = "isRead")]
    pub is_read: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct NotificationPage {
    #[serde(flatten)]
    pub page: Page<Notification>,
    /// Unread notifications across all pages, regardless of `is_read`.
    pub unread_count: i64,
}

#[derive(Debug, Serialize)]
pub struct UnreadCount {
    pub unread_count: i64,
}

#[derive(Debug, Serialize)]
pub struct MarkedRead {
    pub marked_read: u64,
}

/// GET /api/v1/notifications
pub async fn list_notifications(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<NotificationQuery>,
) -> AppResult<Json<ApiResponse<NotificationPage>>> {
    auth.require(Capability::ViewOwnNotifications)?;
    let page = PageRequest::new(params.page, params.limit, DEFAULT_LIMIT);

    let items = NotificationRepo::list_for_recipient(
        &state.pool,
        auth.user_id,
        params.is_read,
        page.limit,
        page.offset(),
    )
    .await?;
    let total =
        NotificationRepo::count_for_recipient(&state.pool, auth.user_id, params.is_read).await?;
    let unread_count = NotificationRepo::unread_count(&state.pool, auth.user_id).await?;

    Ok(Json(ApiResponse::data(NotificationPage {
        page: Page {
            items,
            pagination: PageInfo::new(page, total),
        },
        unread_count,
    })))
}

/// GET /api/v1/notifications/unread-count
pub async fn unread_count(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<UnreadCount>>> {
    auth.require(Capability::ViewOwnNotifications)?;
    let unread_count = NotificationRepo::unread_count(&state.pool, auth.user_id).await?;
    Ok(Json(ApiResponse::data(UnreadCount { unread_count })))
}

/// PUT /api/v1/notifications/{id}/read
///
/// Idempotent: re-reading keeps the original `read_at`. Another user's
/// notification is reported as not found.
pub async fn mark_read(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<Notification>>> {
    auth.require(Capability::ViewOwnNotifications)?;
    let notification = NotificationRepo::mark_read(&state.pool, id, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Notification",
            id,
        }))?;

    Ok(Json(ApiResponse::with_message(
        "Notification marked as read",
        notification,
    )))
}

/// PUT /api/v1/notifications/read-all
pub async fn mark_all_read(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<MarkedRead>>> {
    auth.require(Capability::ViewOwnNotifications)?;
    let marked_read = NotificationRepo::mark_all_read(&state.pool, auth.user_id).await?;
    tracing::debug!(user_id = auth.user_id, marked_read, "Marked all notifications read");

    Ok(Json(ApiResponse::with_message(
        "All notifications marked as read",
        MarkedRead { marked_read },
    )))
}
