use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::user::errors::AuthError;
use crate::user::errors::UserNameError;

/// A registered principal.
///
/// Only `access_token` changes after creation: it holds the latest token
/// issued by a successful login and is `None` until the first one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub user_name: UserName,
    pub password_hash: String,
    pub access_token: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Build a freshly signed up user with a new random id.
    ///
    /// # Arguments
    /// * `user_name` - Validated user name
    /// * `password_hash` - PHC string produced by the password hasher
    pub fn new(user_name: UserName, password_hash: String) -> Self {
        Self {
            id: UserId::new(),
            user_name,
            password_hash,
            access_token: None,
            created_at: Utc::now(),
        }
    }
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
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

/// User name value type
///
/// Any non-empty string. Comparison is exact and case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserName(String);

impl UserName {
    /// # Errors
    /// * `Empty` - Name is the empty string
    pub fn new(user_name: impl Into<String>) -> Result<Self, UserNameError> {
        let user_name = user_name.into();
        if user_name.is_empty() {
            return Err(UserNameError::Empty);
        }
        Ok(Self(user_name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A user name and plaintext password pair, both non-empty.
pub struct Credentials {
    pub user_name: UserName,
    password: String,
}

impl Credentials {
    /// Validate raw sign up or log in input.
    ///
    /// # Errors
    /// * `InvalidInput` - Either field is empty
    pub fn parse(user_name: &str, password: &str) -> Result<Self, AuthError> {
        if password.is_empty() {
            return Err(AuthError::InvalidInput);
        }

        Ok(Self {
            user_name: UserName::new(user_name)?,
            password: password.to_string(),
        })
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user_name", &self.user_name)
            .field("password", &"<redacted>")
            .finish()
    }
}
