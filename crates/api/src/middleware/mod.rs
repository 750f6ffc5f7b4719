//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- resolves the acting user from a JWT Bearer token.
//! - [`rbac::RequireReviewer`] -- requires the `ReviewIdeas` capability.
//! - [`rbac::RequireAdmin`] -- requires the `ManageUsers` capability.

pub mod auth;
pub mod rbac;
