use auth::TokenError;
use thiserror::Error;

use crate::domain::user::errors::UserError;

/// Failure kinds of the authentication and authorization core.
///
/// Clients only ever see three outcomes: bad credentials, unauthenticated
/// (every token and identity kind), and forbidden. The finer kinds exist for
/// logs and tests.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Incorrect username or password")]
    InvalidCredentials,

    #[error("Missing bearer token")]
    MissingToken,

    #[error("Malformed bearer token: {0}")]
    TokenMalformed(String),

    #[error("Token expired")]
    TokenExpired,

    #[error("Token signature invalid")]
    TokenSignatureInvalid,

    #[error("Token identity no longer exists")]
    IdentityNotFound,

    #[error("Permission denied")]
    Forbidden,

    #[error("Credential store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Internal authentication error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Whether the request must be answered as unauthenticated.
    pub fn is_unauthenticated(&self) -> bool {
        matches!(
            self,
            AuthError::MissingToken
                | AuthError::TokenMalformed(_)
                | AuthError::TokenExpired
                | AuthError::TokenSignatureInvalid
                | AuthError::IdentityNotFound
        )
    }

    /// Short label for structured logs. Never includes token or password material.
    pub fn kind(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials => "invalid_credentials",
            AuthError::MissingToken => "missing_token",
            AuthError::TokenMalformed(_) => "token_malformed",
            AuthError::TokenExpired => "token_expired",
            AuthError::TokenSignatureInvalid => "token_signature_invalid",
            AuthError::IdentityNotFound => "identity_not_found",
            AuthError::Forbidden => "forbidden",
            AuthError::StoreUnavailable(_) => "store_unavailable",
            AuthError::Internal(_) => "internal",
        }
    }
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Expired => AuthError::TokenExpired,
            TokenError::SignatureMismatch => AuthError::TokenSignatureInvalid,
            TokenError::Malformed(msg) => AuthError::TokenMalformed(msg),
            TokenError::MissingSecret | TokenError::EncodingFailed(_) => {
                AuthError::Internal(err.to_string())
            }
        }
    }
}

impl From<UserError> for AuthError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::DatabaseError(msg) => AuthError::StoreUnavailable(msg),
            other => AuthError::Internal(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_errors_map_to_unauthenticated_kinds() {
        assert_eq!(AuthError::from(TokenError::Expired), AuthError::TokenExpired);
        assert_eq!(
            AuthError::from(TokenError::SignatureMismatch),
            AuthError::TokenSignatureInvalid
        );
        assert!(AuthError::from(TokenError::Malformed("x".to_string())).is_unauthenticated());
        assert!(!AuthError::from(TokenError::MissingSecret).is_unauthenticated());
    }

    #[test]
    fn test_forbidden_is_not_unauthenticated() {
        assert!(!AuthError::Forbidden.is_unauthenticated());
        assert!(!AuthError::InvalidCredentials.is_unauthenticated());
        assert!(AuthError::IdentityNotFound.is_unauthenticated());
    }

    #[test]
    fn test_store_failures_are_not_unauthenticated() {
        let err = AuthError::from(UserError::DatabaseError("pool timed out".to_string()));
        assert_eq!(err, AuthError::StoreUnavailable("pool timed out".to_string()));
        assert!(!err.is_unauthenticated());
    }
}
