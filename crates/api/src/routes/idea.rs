//! Route definitions for the `/ideas` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::idea;
use crate::state::AppState;

/// Routes mounted at `/ideas`.
///
/// ```text
/// GET    /               -> list_ideas
/// POST   /               -> create_idea
/// GET    /my             -> list_my_ideas
/// GET    /stats          -> idea_stats
/// GET    /{id}           -> get_idea
/// PUT    /{id}           -> update_idea
/// DELETE /{id}           -> withdraw_idea
/// POST   /{id}/images    -> add_image
/// PUT    /{id}/status    -> update_status
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(idea::list_ideas).post(idea::create_idea))
        .route("/my", get(idea::list_my_ideas))
        .route("/stats", get(idea::idea_stats))
        .route(
            "/{id}",
            get(idea::get_idea)
                .put(idea::update_idea)
                .delete(idea::withdraw_idea),
        )
        .route("/{id}/images", post(idea::add_image))
        .route("/{id}/status", put(idea::update_status))
}
