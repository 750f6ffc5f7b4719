use std::sync::Arc;

use crate::auth::otp::{OtpVerifier, StaticOtpVerifier};
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: the pool is reference counted and everything else is
/// behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: kaizen_db::DbPool,
    /// Server configuration (JWT settings are read by the auth extractor).
    pub config: Arc<ServerConfig>,
    /// Checks the one-time code presented at login.
    pub otp: Arc<dyn OtpVerifier>,
}

impl AppState {
    /// Build state with the static OTP verifier configured by `config`.
    pub fn new(pool: kaizen_db::DbPool, config: ServerConfig) -> Self {
        let otp = Arc::new(StaticOtpVerifier::new(config.static_otp.clone()));
        Self {
            pool,
            config: Arc::new(config),
            otp,
        }
    }
}
