use chrono::Duration;

use crate::jwt::token_lifetime;
use crate::jwt::Claims;
use crate::jwt::TokenCodec;
use crate::jwt::TokenError;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Credential kit combining password hashing and token signing.
///
/// Services hold one instance, built once at startup from the configured
/// secret, and share it behind an `Arc`.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_codec: TokenCodec,
    token_lifetime: Duration,
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `token_secret` - Secret key for token signing
    ///
    /// # Errors
    /// * `MissingSecret` - The secret is empty
    pub fn new(token_secret: &[u8]) -> Result<Self, TokenError> {
        Ok(Self {
            password_hasher: PasswordHasher::new(),
            token_codec: TokenCodec::new(token_secret)?,
            token_lifetime: token_lifetime(),
        })
    }

    /// Hash a password for storage.
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a plaintext password against a stored hash.
    ///
    /// # Returns
    /// `false` on mismatch; errors are reserved for corrupt hashes
    pub fn verify_password(
        &self,
        password: &str,
        stored_hash: &str,
    ) -> Result<bool, PasswordError> {
        self.password_hasher.verify(password, stored_hash)
    }

    /// Issue a token for an already authenticated user.
    ///
    /// # Arguments
    /// * `user_id` - Store identifier, signed as the identity reference
    /// * `username` - Username, signed as the subject
    ///
    /// # Errors
    /// * `EncodingFailed` - Token generation failed
    pub fn issue_token(
        &self,
        user_id: impl ToString,
        username: &str,
    ) -> Result<String, TokenError> {
        let claims = Claims::for_user(user_id, username, self.token_lifetime);
        self.token_codec.issue(&claims)
    }

    /// Verify a token and return its claims.
    ///
    /// # Errors
    /// * `SignatureMismatch`, `Expired`, `Malformed` - see [`TokenCodec::verify`]
    pub fn validate_token(&self, token: &str) -> Result<Claims, TokenError> {
        self.token_codec.verify(token)
    }
}
