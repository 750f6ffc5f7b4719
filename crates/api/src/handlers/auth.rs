//! Handlers for the `/auth` resource (login, profile, logout).

use axum::extract::State;
use axum::Json;
use kaizen_core::error::{CoreError, FieldError};
use kaizen_db::models::user::User;
use kaizen_db::repositories::UserRepo;
use serde::{Deserialize, Serialize};

use crate::auth::jwt::generate_access_token;
use crate::auth::otp::{is_well_formed, OTP_LENGTH};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(alias = "employeeNumber")]
    pub employee_number: Option<String>,
    pub otp: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
    pub user: User,
}

const INVALID_CREDENTIALS: &str = "Invalid employee number or OTP";

impl LoginRequest {
    fn validate(self) -> Result<(String, String), CoreError> {
        let employee_number = self
            .employee_number
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty());
        let otp = self.otp.map(|o| o.trim().to_string());

        let mut errors = Vec::new();
        if employee_number.is_none() {
            errors.push(FieldError::new("employee_number", "is required"));
        }
        match otp.as_deref() {
            None | Some("") => errors.push(FieldError::new("otp", "is required")),
            Some(o) if !is_well_formed(o) => errors.push(FieldError::new(
                "otp",
                format!("must be exactly {OTP_LENGTH} digits"),
            )),
            Some(_) => {}
        }
        CoreError::from_field_errors(errors)?;

        match (employee_number, otp) {
            (Some(e), Some(o)) => Ok((e, o)),
            _ => Err(CoreError::Internal(
                "login passed validation with missing fields".into(),
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/login
///
/// Authenticate with employee number + one-time code. Unknown, inactive and
/// wrong-code attempts all get the same 401.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<ApiResponse<LoginResponse>>> {
    let (employee_number, otp) = input.validate()?;
    let invalid = || AppError::Core(CoreError::Unauthorized(INVALID_CREDENTIALS.into()));

    let user = UserRepo::find_by_employee_number(&state.pool, &employee_number)
        .await?
        .filter(|u| u.is_active)
        .ok_or_else(invalid)?;

    if !state.otp.verify(&user.employee_number, &otp) {
        tracing::info!(user_id = user.id, "Login rejected: OTP mismatch");
        return Err(invalid());
    }

    UserRepo::record_login(&state.pool, user.id).await?;
    let user = UserRepo::find_by_id(&state.pool, user.id)
        .await?
        .ok_or_else(invalid)?;

    let token = generate_access_token(user.id, &user.role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;
    tracing::info!(user_id = user.id, role = %user.role, "User logged in");

    Ok(Json(ApiResponse::with_message(
        "Login successful",
        LoginResponse {
            token,
            expires_in: state.config.jwt.expires_in_secs(),
            user,
        },
    )))
}

/// GET /api/v1/auth/profile
pub async fn profile(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<User>>> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;
    Ok(Json(ApiResponse::data(user)))
}

/// POST /api/v1/auth/logout
///
/// Tokens are stateless; this only acknowledges the client discarding it.
pub async fn logout(auth: AuthUser) -> AppResult<Json<ApiResponse<()>>> {
    tracing::info!(user_id = auth.user_id, "User logged out");
    Ok(Json(ApiResponse::message("Logged out successfully")))
}
