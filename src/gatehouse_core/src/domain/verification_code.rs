use rand::Rng;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VerificationCodeError {
    #[error("Verification code must be 6 digits")]
    InvalidFormat,
}

/// A one-time 6-digit verification code, zero-padded ("000000"–"999999").
///
/// Collisions across emails are acceptable; the code is only ever compared
/// against the single live code stored for its email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationCode(String);

impl VerificationCode {
    /// Generate a uniformly random code.
    pub fn new() -> Self {
        let value = rand::rng().random_range(0..1_000_000u32);
        Self(format!("{value:06}"))
    }

    /// Parse a code submitted by a caller.
    pub fn parse(value: &str) -> Result<Self, VerificationCodeError> {
        if value.len() == 6 && value.chars().all(|c| c.is_ascii_digit()) {
            Ok(Self(value.to_string()))
        } else {
            Err(VerificationCodeError::InvalidFormat)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for VerificationCode {
    fn default() -> Self {
        Self::new()
    }
}
