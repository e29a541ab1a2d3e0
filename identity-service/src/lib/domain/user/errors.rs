use thiserror::Error;

/// Error for UserName validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserNameError {
    #[error("Username must not be empty")]
    Empty,
}

/// Error reported by a user registry.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("User not found: {0}")]
    NotFound(String),

    #[error("Username '{0}' is already registered")]
    UserNameTaken(String),
}

/// Top-level error for sign up, log in and token authentication.
///
/// `Display` strings are what external callers see. They never carry the
/// reason a credential or token check failed; that detail goes to the log.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Please enter a valid username and password")]
    InvalidInput,

    #[error("Username '{0}' is already taken, please choose a different one")]
    UserNameTaken(String),

    #[error("Unable to process the password, please try again")]
    HashingFailure,

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Token signing is not configured")]
    MissingSigningSecret,

    #[error("Unable to issue an access token")]
    TokenIssuanceFailure,

    #[error("Authentication failed, the access token is not valid")]
    InvalidToken,

    #[error("User not found: {0}")]
    NotFound(String),
}

impl From<UserNameError> for AuthError {
    fn from(_: UserNameError) -> Self {
        AuthError::InvalidInput
    }
}

impl From<RegistryError> for AuthError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::NotFound(name) => AuthError::NotFound(name),
            RegistryError::UserNameTaken(name) => AuthError::UserNameTaken(name),
        }
    }
}
