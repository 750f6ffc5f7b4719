//! JWT-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use kaizen_core::error::CoreError;
use kaizen_core::roles::{Capability, Role};
use kaizen_core::types::DbId;
use kaizen_db::repositories::UserRepo;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// The acting user for a request.
///
/// The token only identifies the user; role and active flag are read from the
/// database on every request so deactivation and role changes apply
/// immediately.
///
/// ```ignore
/// async fn my_handler(auth: AuthUser) -> AppResult<Json<()>> {
///     auth.require(Capability::SubmitIdea)?;
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: DbId,
    pub employee_number: String,
    pub name: String,
    pub role: Role,
}

impl AuthUser {
    /// Fail with 403 unless the user's role grants `capability`.
    pub fn require(&self, capability: Capability) -> Result<(), AppError> {
        if self.role.can(capability) {
            Ok(())
        } else {
            tracing::debug!(
                user_id = self.user_id,
                role = %self.role,
                ?capability,
                "Capability check failed"
            );
            Err(AppError::Core(CoreError::Forbidden(
                "Insufficient permissions".into(),
            )))
        }
    }
}

fn unauthorized(message: &str) -> AppError {
    AppError::Core(CoreError::Unauthorized(message.into()))
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| unauthorized("Missing Authorization header"))?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            unauthorized("Invalid Authorization format. Expected: Bearer <token>")
        })?;

        let claims = validate_token(token, &state.config.jwt)
            .map_err(|_| unauthorized("Invalid or expired token"))?;

        let user = UserRepo::find_by_id(&state.pool, claims.sub)
            .await?
            .filter(|u| u.is_active)
            .ok_or_else(|| unauthorized("Invalid or expired token"))?;

        let role = Role::parse(&user.role).map_err(|e| {
            AppError::InternalError(format!("user {} has an unknown role: {e}", user.id))
        })?;

        Ok(AuthUser {
            user_id: user.id,
            employee_number: user.employee_number,
            name: user.name,
            role,
        })
    }
}
