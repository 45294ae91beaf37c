//! Credential primitives for the myFlix services
//!
//! - Password hashing (Argon2id)
//! - Bearer token issuance and verification (HS256, fixed seven-day lifetime)
//! - An `Authenticator` kit bundling both behind one configured secret
//!
//! Looking users up, deciding who may touch what, and mapping failures to HTTP
//! all live in the service; this crate only knows about strings and claims.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("Secret123").unwrap();
//! assert!(hasher.verify("Secret123", &hash).unwrap());
//! assert!(!hasher.verify("secret123", &hash).unwrap());
//! ```
//!
//! ## Tokens
//! ```
//! use auth::{token_lifetime, Claims, TokenCodec};
//!
//! let codec = TokenCodec::new(b"secret_key_at_least_32_bytes_long!").unwrap();
//! let claims = Claims::for_user("0b9e4f", "alice", token_lifetime());
//! let token = codec.issue(&claims).unwrap();
//! let decoded = codec.verify(&token).unwrap();
//! assert_eq!(decoded.username(), "alice");
//! ```
//!
//! ## Complete Flow
//! ```
//! use auth::Authenticator;
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!").unwrap();
//!
//! // Register: hash password
//! let hash = auth.hash_password("Secret123").unwrap();
//!
//! // Login: verify, then issue
//! assert!(auth.verify_password("Secret123", &hash).unwrap());
//! let token = auth.issue_token("0b9e4f", "alice").unwrap();
//!
//! // Later requests: validate
//! let claims = auth.validate_token(&token).unwrap();
//! assert_eq!(claims.identity_ref(), "0b9e4f");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::Authenticator;
pub use jwt::token_lifetime;
pub use jwt::Claims;
pub use jwt::TokenCodec;
pub use jwt::TokenError;
pub use jwt::TOKEN_LIFETIME_DAYS;
pub use password::PasswordError;
pub use password::PasswordHasher;
