use async_trait::async_trait;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::Credentials;
use crate::domain::auth::models::LoginSuccess;
use crate::domain::user::models::User;

/// A strategy turning one kind of credential into a live identity.
///
/// Routes pick their strategy explicitly: login uses passwords, protected
/// routes use bearer tokens.
#[async_trait]
pub trait AuthenticatorPort: Send + Sync + 'static {
    type Credential: Send + 'static;

    /// Resolve a credential to the user it proves.
    ///
    /// # Errors
    /// Strategy specific; see the implementations.
    async fn authenticate(&self, credential: Self::Credential) -> Result<User, AuthError>;
}

/// Port consumed by the HTTP surface.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Verify a username and password and issue a bearer token bound to the user.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown username or wrong password, indistinguishably
    /// * `StoreUnavailable` - Credential store failed
    /// * `Internal` - Hashing or signing failed
    async fn login(&self, credentials: Credentials) -> Result<LoginSuccess, AuthError>;

    /// Authenticate a request from its raw `Authorization` header.
    ///
    /// # Returns
    /// The live user the token refers to
    ///
    /// # Errors
    /// * `MissingToken`, `TokenMalformed`, `TokenExpired`, `TokenSignatureInvalid`,
    ///   `IdentityNotFound` - Request is unauthenticated
    /// * `StoreUnavailable` - Credential store failed
    async fn authenticate_request(&self, authorization: Option<&str>)
        -> Result<User, AuthError>;
}
