use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::jwt::SecretProvider;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and token issuance.
///
/// Holds no user state. Callers look users up themselves and hand over the
/// stored hash; the coordinator answers whether the password matches and, if
/// it does, mints a fresh access token.
#[derive(Debug, Clone)]
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
}

/// Result of successful authentication.
#[derive(Debug, Clone)]
pub struct AuthenticationResult {
    /// Newly issued access token
    pub access_token: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `secrets` - Provider for the token signing secret, read per operation
    pub fn new(secrets: impl SecretProvider + 'static) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler: JwtHandler::new(secrets),
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a password against a stored hash without issuing anything.
    ///
    /// # Errors
    /// * `PasswordError` - Stored hash could not be read
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> Result<bool, PasswordError> {
        self.password_hasher.verify(password, stored_hash)
    }

    /// Verify a password and issue an access token for `user_name`.
    ///
    /// The token is only minted after the password has been accepted, so a
    /// missing signing secret surfaces as a `JwtError` even for correct
    /// credentials.
    ///
    /// # Arguments
    /// * `user_name` - Name written into the token's claims
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored hash could not be read
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        user_name: &str,
        password: &str,
        stored_hash: &str,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.verify_password(password, stored_hash)? {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.issue_token(user_name)?;

        Ok(AuthenticationResult { access_token })
    }

    /// Issue an access token without password verification.
    ///
    /// # Errors
    /// * `JwtError` - Token generation failed
    pub fn issue_token(&self, user_name: &str) -> Result<String, JwtError> {
        self.jwt_handler.encode(&Claims::for_user(user_name))
    }

    /// Validate a token's signature and structure and return its claims.
    ///
    /// Tokens whose purpose is not "access" are rejected.
    ///
    /// # Errors
    /// * `JwtError` - Token validation or decoding failed
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        let claims: Claims = self.jwt_handler.decode(token)?;

        if !claims.is_access() {
            return Err(JwtError::InvalidToken(format!(
                "unexpected token purpose '{}'",
                claims.purpose
            )));
        }

        Ok(claims)
    }
}
