//! HTTP-level integration tests for the `/notifications` resource.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_idea, create_user, get_auth, put_auth, token_for};
use kaizen_db::models::notification::CreateNotifications;
use kaizen_db::repositories::NotificationRepo;
use sqlx::PgPool;

/// Write `count` approval notifications for `recipient`.
async fn notify(pool: &PgPool, recipient: i64, idea_id: i64, count: usize) {
    for n in 0..count {
        NotificationRepo::create_many(
            pool,
            &CreateNotifications {
                recipient_ids: vec![recipient],
                notification_type: "idea_approved".to_string(),
                title: "Idea Approved".to_string(),
                message: format!("Message {n}"),
                related_idea_id: Some(idea_id),
            },
        )
        .await
        .unwrap();
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_includes_unread_count(pool: PgPool) {
    let user = create_user(&pool, "12345", "employee").await;
    let idea = create_idea(&pool, user.id, "Notified").await;
    notify(&pool, user.id, idea.id, 3).await;
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/v1/notifications?limit=2", &token_for(&user)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let data = &json["data"];
    assert_eq!(data["items"].as_array().unwrap().len(), 2);
    assert_eq!(data["items"][0]["message"], "Message 2");
    assert_eq!(data["items"][0]["type"], "idea_approved");
    assert_eq!(data["items"][0]["related_idea_title"], "Notified");
    assert_eq!(data["items"][0]["is_read"], false);
    assert_eq!(data["pagination"]["total"], 3);
    assert_eq!(data["pagination"]["pages"], 2);
    assert_eq!(data["unread_count"], 3);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_mark_read_is_idempotent(pool: PgPool) {
    let user = create_user(&pool, "12345", "employee").await;
    let idea = create_idea(&pool, user.id, "Notified").await;
    notify(&pool, user.id, idea.id, 2).await;
    let token = token_for(&user);
    let app = common::build_test_app(pool.clone());

    let id = NotificationRepo::list_for_recipient(&pool, user.id, None, 1, 0)
        .await
        .unwrap()[0]
        .id;
    let uri = format!("/api/v1/notifications/{id}/read");

    let first = body_json(put_auth(app.clone(), &uri, &token).await).await;
    assert_eq!(first["message"], "Notification marked as read");
    assert_eq!(first["data"]["is_read"], true);
    assert!(first["data"]["read_at"].is_string());

    let response = put_auth(app.clone(), &uri, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let second = body_json(response).await;
    assert_eq!(second["data"]["read_at"], first["data"]["read_at"]);

    let json = body_json(get_auth(app.clone(), "/api/v1/notifications/unread-count", &token).await)
        .await;
    assert_eq!(json["data"]["unread_count"], 1);

    let json = body_json(get_auth(app.clone(), "/api/v1/notifications?is_read=true", &token).await)
        .await;
    let items = json["data"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], id);
    assert_eq!(json["data"]["unread_count"], 1);

    let json = body_json(get_auth(app, "/api/v1/notifications?isRead=false", &token).await).await;
    let items = json["data"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_ne!(items[0]["id"], id);
    assert_eq!(items[0]["is_read"], false);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_cannot_read_someone_elses_notification(pool: PgPool) {
    let owner = create_user(&pool, "12345", "employee").await;
    let other = create_user(&pool, "22222", "admin").await;
    let idea = create_idea(&pool, owner.id, "Private").await;
    notify(&pool, owner.id, idea.id, 1).await;
    let app = common::build_test_app(pool.clone());

    let id = NotificationRepo::list_for_recipient(&pool, owner.id, None, 1, 0)
        .await
        .unwrap()[0]
        .id;
    let response = put_auth(
        app,
        &format!("/api/v1/notifications/{id}/read"),
        &token_for(&other),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        NotificationRepo::unread_count(&pool, owner.id).await.unwrap(),
        1
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_mark_missing_notification_returns_404(pool: PgPool) {
    let user = create_user(&pool, "12345", "employee").await;
    let app = common::build_test_app(pool);

    let response = put_auth(app, "/api/v1/notifications/999999/read", &token_for(&user)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_read_all_only_touches_callers_unread(pool: PgPool) {
    let user = create_user(&pool, "12345", "employee").await;
    let other = create_user(&pool, "22222", "employee").await;
    let idea = create_idea(&pool, user.id, "Busy idea").await;
    notify(&pool, user.id, idea.id, 3).await;
    notify(&pool, other.id, idea.id, 2).await;
    let token = token_for(&user);
    let app = common::build_test_app(pool.clone());

    let response = put_auth(app.clone(), "/api/v1/notifications/read-all", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "All notifications marked as read");
    assert_eq!(json["data"]["marked_read"], 3);

    let json = body_json(put_auth(app, "/api/v1/notifications/read-all", &token).await).await;
    assert_eq!(json["data"]["marked_read"], 0);

    assert_eq!(NotificationRepo::unread_count(&pool, other.id).await.unwrap(), 2);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_notifications_require_token(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = common::get(app, "/api/v1/notifications").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
