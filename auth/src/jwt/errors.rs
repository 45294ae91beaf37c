use thiserror::Error;

/// Error type for token issuance and verification.
///
/// Verification failures are split by cause so callers can log them precisely
/// while still rejecting the request uniformly.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("Token signing secret is not configured")]
    MissingSecret,

    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is malformed: {0}")]
    Malformed(String),

    #[error("Token is expired")]
    Expired,

    #[error("Token signature does not match")]
    SignatureMismatch,
}
