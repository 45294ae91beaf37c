use std::sync::Arc;
use std::sync::OnceLock;

use async_trait::async_trait;
use auth::Authenticator;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::BearerToken;
use crate::domain::auth::models::Credentials;
use crate::domain::auth::models::LoginSuccess;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::auth::ports::AuthenticatorPort;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserRepository;

/// Hash checked when no stored hash exists, so a missed lookup costs one
/// Argon2 verification like a wrong password does.
static DUMMY_HASH: OnceLock<Option<String>> = OnceLock::new();

fn dummy_hash(authenticator: &Authenticator) -> Option<&'static str> {
    DUMMY_HASH
        .get_or_init(|| authenticator.hash_password("myflix-unknown-user").ok())
        .as_deref()
}

/// Username/password strategy.
///
/// Unknown usernames, usernames that could never have been registered, and
/// wrong passwords all fail with the same `InvalidCredentials` after the same
/// amount of hashing work.
pub struct PasswordAuthenticator<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> PasswordAuthenticator<UR>
where
    UR: UserRepository,
{
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }
}

#[async_trait]
impl<UR> AuthenticatorPort for PasswordAuthenticator<UR>
where
    UR: UserRepository,
{
    type Credential = Credentials;

    async fn authenticate(&self, credential: Credentials) -> Result<User, AuthError> {
        let user = match Username::new(credential.username) {
            Ok(username) => self.repository.find_by_username(&username).await?,
            Err(_) => None,
        };

        // Argon2 verification runs on the blocking pool.
        let authenticator = Arc::clone(&self.authenticator);
        let stored_hash = user.as_ref().map(|u| u.password_hash.clone());
        let password = credential.password;
        let matches = tokio::task::spawn_blocking(move || match stored_hash {
            Some(hash) => authenticator.verify_password(&password, &hash),
            None => {
                if let Some(hash) = dummy_hash(&authenticator) {
                    let _ = authenticator.verify_password(&password, hash);
                }
                Ok(false)
            }
        })
        .await
        .map_err(|e| AuthError::Internal(format!("Password verification task failed: {}", e)))?
        .map_err(|e| AuthError::Internal(e.to_string()))?;

        match user {
            Some(user) if matches => Ok(user),
            _ => Err(AuthError::InvalidCredentials),
        }
    }
}

/// Bearer token strategy.
///
/// The signature and expiry are checked before any claim is read, then the
/// identity reference is resolved against the live store so deleted users
/// lose access immediately.
pub struct TokenAuthenticator<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> TokenAuthenticator<UR>
where
    UR: UserRepository,
{
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }
}

#[async_trait]
impl<UR> AuthenticatorPort for TokenAuthenticator<UR>
where
    UR: UserRepository,
{
    type Credential = BearerToken;

    async fn authenticate(&self, credential: BearerToken) -> Result<User, AuthError> {
        let claims = self.authenticator.validate_token(credential.as_str())?;

        let user_id = UserId::from_string(claims.identity_ref())
            .map_err(|e| AuthError::TokenMalformed(e.to_string()))?;

        self.repository
            .find_by_id(&user_id)
            .await?
            .ok_or(AuthError::IdentityNotFound)
    }
}

/// Authentication core exposed to the HTTP surface.
pub struct AuthService<UR>
where
    UR: UserRepository,
{
    passwords: PasswordAuthenticator<UR>,
    tokens: TokenAuthenticator<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> AuthService<UR>
where
    UR: UserRepository,
{
    /// Create a new auth service.
    ///
    /// # Arguments
    /// * `repository` - Credential store
    /// * `authenticator` - Hashing and signing kit built from the configured secret
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            passwords: PasswordAuthenticator::new(
                Arc::clone(&repository),
                Arc::clone(&authenticator),
            ),
            tokens: TokenAuthenticator::new(repository, Arc::clone(&authenticator)),
            authenticator,
        }
    }
}

#[async_trait]
impl<UR> AuthServicePort for AuthService<UR>
where
    UR: UserRepository,
{
    async fn login(&self, credentials: Credentials) -> Result<LoginSuccess, AuthError> {
        let user = self
            .passwords
            .authenticate(credentials)
            .await
            .inspect_err(|e| tracing::warn!(kind = e.kind(), "Login rejected"))?;

        let token = self
            .authenticator
            .issue_token(user.id, user.username.as_str())?;

        tracing::info!(user_id = %user.id, "Login succeeded");
        Ok(LoginSuccess { user, token })
    }

    async fn authenticate_request(
        &self,
        authorization: Option<&str>,
    ) -> Result<User, AuthError> {
        let token = BearerToken::from_authorization_header(authorization)?;
        self.tokens
            .authenticate(token)
            .await
            .inspect_err(|e| tracing::warn!(kind = e.kind(), "Request authentication failed"))
    }
}
