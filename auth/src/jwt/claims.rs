use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Lifetime of every issued token, in days.
pub const TOKEN_LIFETIME_DAYS: i64 = 7;

/// Fixed token lifetime as a duration.
pub fn token_lifetime() -> Duration {
    Duration::days(TOKEN_LIFETIME_DAYS)
}

/// Claims signed into a bearer token.
///
/// The subject is the username; `_id` carries the store identifier the token
/// was issued for, which is what the request gate resolves on every call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (username at issuance)
    pub sub: String,

    /// Identity reference (store identifier)
    #[serde(rename = "_id")]
    pub uid: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create claims for a user, issued now.
    ///
    /// # Arguments
    /// * `user_id` - Store identifier of the user
    /// * `username` - Username, used as the token subject
    /// * `lifetime` - Time until the token expires
    pub fn for_user(
        user_id: impl ToString,
        username: impl Into<String>,
        lifetime: Duration,
    ) -> Self {
        Self::issued_at(user_id, username, Utc::now(), lifetime)
    }

    /// Create claims for a user with an explicit issuance instant.
    pub fn issued_at(
        user_id: impl ToString,
        username: impl Into<String>,
        issued_at: DateTime<Utc>,
        lifetime: Duration,
    ) -> Self {
        let expiration = issued_at + lifetime;

        Self {
            sub: username.into(),
            uid: user_id.to_string(),
            iat: issued_at.timestamp(),
            exp: expiration.timestamp(),
        }
    }

    pub fn username(&self) -> &str {
        &self.sub
    }

    pub fn identity_ref(&self) -> &str {
        &self.uid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn epoch() -> DateTime<Utc> {
        DateTime::from_timestamp(0, 0).unwrap()
    }

    #[test]
    fn test_for_user() {
        let claims = Claims::for_user("9b2d", "alice", token_lifetime());

        assert_eq!(claims.username(), "alice");
        assert_eq!(claims.identity_ref(), "9b2d");
        assert_eq!(claims.exp - claims.iat, 7 * 24 * 60 * 60);
    }

    #[test]
    fn test_identity_ref_serialized_as_underscore_id() {
        let claims = Claims::issued_at("9b2d", "alice", epoch(), Duration::hours(1));
        let json = serde_json::to_value(&claims).unwrap();

        assert_eq!(json["_id"], "9b2d");
        assert_eq!(json["sub"], "alice");
        assert_eq!(json["iat"], 0);
        assert_eq!(json["exp"], 3600);
        assert!(json.get("uid").is_none());
    }
}
