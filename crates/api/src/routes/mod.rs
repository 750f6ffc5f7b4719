pub mod auth;
pub mod health;
pub mod idea;
pub mod notification;
pub mod user;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                      login (public)
/// /auth/profile                    caller profile
/// /auth/logout                     logout
///
/// /ideas                           list, create
/// /ideas/my                        caller's ideas
/// /ideas/stats                     aggregate stats (reviewer/admin)
/// /ideas/{id}                      get, owner edit, owner withdraw
/// /ideas/{id}/images               attach image metadata (owner)
/// /ideas/{id}/status               status transition (reviewer/admin)
///
/// /notifications                   list
/// /notifications/unread-count      unread count
/// /notifications/read-all          mark all read
/// /notifications/{id}/read         mark one read
///
/// /users                           list, create (admin)
/// /users/leaderboard               individual / department leaderboard
/// /users/{id}                      get, update, deactivate (admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/ideas", idea::router())
        .nest("/notifications", notification::router())
        .nest("/users", user::router())
}
