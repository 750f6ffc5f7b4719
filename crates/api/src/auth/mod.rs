//! Authentication primitives.
//!
//! - [`jwt`] -- access-token generation and validation.
//! - [`otp`] -- one-time code verification at login.

pub mod jwt;
pub mod otp;
