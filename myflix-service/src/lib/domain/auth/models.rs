use std::fmt;

use crate::domain::auth::errors::AuthError;
use crate::domain::user::models::User;

/// Username and password pair presented at login.
///
/// Held as raw strings: a username that would fail registration rules is
/// simply an unknown user here.
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Bearer token lifted out of an `Authorization` header.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    const SCHEME: &'static str = "Bearer";

    /// Extract the token from a raw `Authorization` header value.
    ///
    /// The scheme is matched case-insensitively and must be followed by a
    /// non-empty token.
    ///
    /// # Errors
    /// * `MissingToken` - No header was sent
    /// * `TokenMalformed` - Wrong scheme or empty token
    pub fn from_authorization_header(header: Option<&str>) -> Result<Self, AuthError> {
        let header = header.ok_or(AuthError::MissingToken)?;
        let (scheme, token) = header
            .trim()
            .split_once(' ')
            .ok_or_else(|| AuthError::TokenMalformed("expected `Bearer <token>`".to_string()))?;

        if !scheme.eq_ignore_ascii_case(Self::SCHEME) {
            return Err(AuthError::TokenMalformed(format!(
                "unsupported authorization scheme `{}`",
                scheme
            )));
        }

        let token = token.trim();
        if token.is_empty() {
            return Err(AuthError::TokenMalformed("empty bearer token".to_string()));
        }

        Ok(Self(token.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(<redacted>)")
    }
}

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginSuccess {
    pub user: User,
    pub token: String,
}

/// The only authorization rule: a user may act on the resources addressed by
/// their own username, and nobody else's.
pub fn authorize_ownership(identity: &User, path_username: &str) -> bool {
    identity.username.as_str() == path_username
}

/// [`authorize_ownership`] as a `Result`.
///
/// # Errors
/// * `Forbidden` - The identity does not own the addressed username
pub fn require_owner(identity: &User, path_username: &str) -> Result<(), AuthError> {
    if authorize_ownership(identity, path_username) {
        Ok(())
    } else {
        Err(AuthError::Forbidden)
    }
}
