//! Route definitions for the `/users` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::user;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// GET    /              -> list_users (admin)
/// POST   /              -> create_user (admin)
/// GET    /leaderboard   -> leaderboard
/// GET    /{id}          -> get_user (admin)
/// PUT    /{id}          -> update_user (admin)
/// DELETE /{id}          -> deactivate_user (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(user::list_users).post(user::create_user))
        .route("/leaderboard", get(user::leaderboard))
        .route(
            "/{id}",
            get(user::get_user)
                .put(user::update_user)
                .delete(user::deactivate_user),
        )
}
