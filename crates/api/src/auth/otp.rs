//! One-time code verification for employee-number login.
//!
//! Delivery of codes (SMS, e-mail) is outside this service; the verifier only
//! answers whether a presented code is acceptable.

/// Length of every one-time code.
pub const OTP_LENGTH: usize = 4;

/// Decides whether `otp` is valid for `employee_number`.
pub trait OtpVerifier: Send + Sync {
    fn verify(&self, employee_number: &str, otp: &str) -> bool;
}

/// Accepts a single configured code for every employee.
///
/// With no code configured every attempt is rejected.
#[derive(Debug, Clone, Default)]
pub struct StaticOtpVerifier {
    code: Option<String>,
}

impl StaticOtpVerifier {
    pub fn new(code: Option<String>) -> Self {
        Self { code }
    }
}

impl OtpVerifier for StaticOtpVerifier {
    fn verify(&self, _employee_number: &str, otp: &str) -> bool {
        self.code.as_deref().is_some_and(|code| code == otp)
    }
}

/// `true` when `otp` is exactly [`OTP_LENGTH`] ASCII digits.
pub fn is_well_formed(otp: &str) -> bool {
    otp.len() == OTP_LENGTH && otp.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_verifier_matches_configured_code() {
        let verifier = StaticOtpVerifier::new(Some("1234".into()));
        assert!(verifier.verify("12345", "1234"));
        assert!(!verifier.verify("12345", "4321"));
    }

    #[test]
    fn unconfigured_verifier_rejects_everything() {
        let verifier = StaticOtpVerifier::default();
        assert!(!verifier.verify("12345", "1234"));
        assert!(!verifier.verify("12345", ""));
    }

    #[test]
    fn well_formed_requires_four_digits() {
        assert!(is_well_formed("0000"));
        assert!(!is_well_formed("123"));
        assert!(!is_well_formed("12345"));
        assert!(!is_well_formed("12a4"));
    }
}
