//! Capability-gated extractors.
//!
//! Each wraps [`AuthUser`] and rejects with 403 when the acting user's role
//! lacks the capability, so the gate runs before any body is parsed.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use kaizen_core::roles::Capability;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `ReviewIdeas` capability (reviewers and admins).
///
/// ```ignore
/// async fn review(RequireReviewer(user): RequireReviewer) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireReviewer(pub AuthUser);

impl FromRequestParts<AppState> for RequireReviewer {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        user.require(Capability::ReviewIdeas)?;
        Ok(RequireReviewer(user))
    }
}

/// Requires the `ManageUsers` capability (admins only).
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        user.require(Capability::ManageUsers)?;
        Ok(RequireAdmin(user))
    }
}
