use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// Purpose stamped on tokens issued by a successful login.
pub const ACCESS_PURPOSE: &str = "access";

/// Claims carried by an access token.
///
/// No expiration claim is issued. A token stays cryptographically valid until
/// the signing secret changes; callers are expected to cross-check it against
/// the latest token recorded for the user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Name of the user the token was issued to
    #[serde(rename = "UserName")]
    pub user_name: String,

    /// What the token may be used for
    pub purpose: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Unique token identifier, fresh for every issuance
    pub jti: String,
}

impl Claims {
    /// Create access-token claims for a user.
    ///
    /// Two calls for the same user never produce equal claims because `jti`
    /// is a fresh random UUID.
    pub fn for_user(user_name: impl ToString) -> Self {
        Self {
            user_name: user_name.to_string(),
            purpose: ACCESS_PURPOSE.to_string(),
            iat: Utc::now().timestamp(),
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// Override the purpose.
    pub fn with_purpose(mut self, purpose: impl ToString) -> Self {
        self.purpose = purpose.to_string();
        self
    }

    /// Set issued at (Unix timestamp).
    pub fn with_issued_at(mut self, iat: i64) -> Self {
        self.iat = iat;
        self
    }

    pub fn is_access(&self) -> bool {
        self.purpose == ACCESS_PURPOSE
    }
}
