use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::movie::models::MovieId;
use crate::domain::user::errors::BirthdayError;
use crate::domain::user::errors::EmailError;
use crate::domain::user::errors::PasswordError;
use crate::domain::user::errors::UserIdError;
use crate::domain::user::errors::UsernameError;

/// User aggregate entity.
///
/// Represents a registered account with its favorites list. The password hash
/// never leaves the domain: it is redacted from `Debug` and has no serialized form.
#[derive(Clone)]
pub struct User {
    pub id: UserId,
    pub username: Username,
    pub email: EmailAddress,
    pub password_hash: String,
    pub birthday: Option<NaiveDate>,
    pub favorite_movies: BTreeSet<MovieId>,
    pub created_at: DateTime<Utc>,
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .field("birthday", &self.birthday)
            .field("favorite_movies", &self.favorite_movies)
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID.
    ///
    /// # Returns
    /// UserId with random UUID v4
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a user ID from string.
    ///
    /// # Arguments
    /// * `s` - UUID string to parse
    ///
    /// # Returns
    /// Parsed UserId
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        Uuid::parse_str(s)
            .map(UserId)
            .map_err(|e| UserIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Username value type
///
/// Ensures username is 3-32 characters and contains only alphanumeric, underscore, and hyphen.
/// Comparison is case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    const MIN_LENGTH: usize = 3;
    const MAX_LENGTH: usize = 32;

    /// Create a new valid username.
    ///
    /// # Arguments
    /// * `username` - Raw username string
    ///
    /// # Returns
    /// Validated Username value object
    ///
    /// # Errors
    /// * `TooShort` - Username shorter than 3 characters
    /// * `TooLong` - Username longer than 32 characters
    /// * `InvalidCharacters` - Contains non-alphanumeric characters (except _ and -)
    pub fn new(username: String) -> Result<Self, UsernameError> {
        let username = Self::with_valid_length(username)?;
        let username = Self::with_valid_chars(username)?;
        Ok(Self(username))
    }

    fn with_valid_length(username: String) -> Result<String, UsernameError> {
        let length = username.chars().count();
        if length < Self::MIN_LENGTH {
            Err(UsernameError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else if length > Self::MAX_LENGTH {
            Err(UsernameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(username)
        }
    }

    fn with_valid_chars(username: String) -> Result<String, UsernameError> {
        if username
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
        {
            Ok(username)
        } else {
            Err(UsernameError::InvalidCharacters)
        }
    }

    /// Get username as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Arguments
    /// * `email` - Raw email string
    ///
    /// # Returns
    /// Validated EmailAddress value object
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    /// Get email as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Plaintext password as received from a client.
///
/// Only lives long enough to be hashed or verified. Redacted from `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    /// Wrap a plaintext password.
    ///
    /// # Errors
    /// * `Empty` - Password is the empty string
    pub fn new(password: String) -> Result<Self, PasswordError> {
        if password.is_empty() {
            return Err(PasswordError::Empty);
        }
        Ok(Self(password))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

/// Parse a calendar date in `YYYY-MM-DD` form.
///
/// # Errors
/// * `InvalidFormat` - Not a valid ISO calendar date
pub fn parse_birthday(raw: &str) -> Result<NaiveDate, BirthdayError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|e| BirthdayError::InvalidFormat(format!("{}: {}", raw, e)))
}

/// Command to create a new user with domain types
#[derive(Debug)]
pub struct CreateUserCommand {
    pub username: Username,
    pub email: EmailAddress,
    pub password: Password,
    pub birthday: Option<NaiveDate>,
}

impl CreateUserCommand {
    /// Construct a new create user command.
    ///
    /// # Arguments
    /// * `username` - Validated username
    /// * `email` - Validated email address
    /// * `password` - Plain text password (hashed by the service)
    /// * `birthday` - Optional date of birth
    pub fn new(
        username: Username,
        email: EmailAddress,
        password: Password,
        birthday: Option<NaiveDate>,
    ) -> Self {
        Self {
            username,
            email,
            password,
            birthday,
        }
    }
}

/// Command to update an existing user with optional validated fields.
///
/// Each provided field replaces the stored one; absent fields are left untouched.
#[derive(Debug, Default)]
pub struct UpdateUserCommand {
    pub username: Option<Username>,
    pub email: Option<EmailAddress>,
    pub password: Option<Password>,
    pub birthday: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_accepts_valid() {
        assert_eq!(Username::new("alice_01".to_string()).unwrap().as_str(), "alice_01");
        assert!(Username::new("bob-smith".to_string()).is_ok());
    }

    #[test]
    fn test_username_rejects_bad_length() {
        assert_eq!(
            Username::new("al".to_string()),
            Err(UsernameError::TooShort { min: 3, actual: 2 })
        );
        assert!(matches!(
            Username::new("a".repeat(33)),
            Err(UsernameError::TooLong { max: 32, actual: 33 })
        ));
    }

    #[test]
    fn test_username_rejects_bad_characters() {
        assert_eq!(
            Username::new("alice smith".to_string()),
            Err(UsernameError::InvalidCharacters)
        );
        assert_eq!(
            Username::new("alice@x".to_string()),
            Err(UsernameError::InvalidCharacters)
        );
    }

    #[test]
    fn test_username_is_case_sensitive() {
        let lower = Username::new("alice".to_string()).unwrap();
        let upper = Username::new("Alice".to_string()).unwrap();
        assert_ne!(lower, upper);
    }

    #[test]
    fn test_email_validation() {
        assert!(EmailAddress::new("alice@x.com".to_string()).is_ok());
        assert!(matches!(
            EmailAddress::new("not-an-email".to_string()),
            Err(EmailError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_password_rejects_empty() {
        assert_eq!(Password::new(String::new()), Err(PasswordError::Empty));
        assert_eq!(Password::new("x".to_string()).unwrap().expose(), "x");
    }

    #[test]
    fn test_parse_birthday() {
        assert_eq!(
            parse_birthday("1990-04-12").unwrap(),
            NaiveDate::from_ymd_opt(1990, 4, 12).unwrap()
        );
        assert!(parse_birthday("12/04/1990").is_err());
        assert!(parse_birthday("1990-02-30").is_err());
    }

    #[test]
    fn test_debug_output_never_contains_secrets() {
        let user = User {
            id: UserId::new(),
            username: Username::new("alice".to_string()).unwrap(),
            email: EmailAddress::new("alice@x.com".to_string()).unwrap(),
            password_hash: "$argon2id$v=19$secret-material".to_string(),
            birthday: None,
            favorite_movies: BTreeSet::new(),
            created_at: Utc::now(),
        };
        let rendered = format!("{:?}", user);
        assert!(rendered.contains("alice"));
        assert!(!rendered.contains("secret-material"));

        let password = Password::new("Secret123".to_string()).unwrap();
        assert!(!format!("{:?}", password).contains("Secret123"));
    }
}
