use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserName;
use crate::user::errors::AuthError;
use crate::user::errors::RegistryError;

/// Port for the authentication facade.
///
/// All operations are synchronous and CPU-bound. Password hashing is slow on
/// purpose, so async callers should run them on a blocking worker.
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new user.
    ///
    /// # Arguments
    /// * `user_name` - Requested user name, case-sensitive
    /// * `password` - Plaintext password, hashed before storage
    ///
    /// # Returns
    /// The created user (no access token yet)
    ///
    /// # Errors
    /// * `InvalidInput` - Either field is empty
    /// * `UserNameTaken` - Name is already registered
    /// * `HashingFailure` - Password could not be hashed
    fn sign_up(&self, user_name: &str, password: &str) -> Result<User, AuthError>;

    /// Verify credentials and issue a new access token.
    ///
    /// The token replaces any previously issued one for this user.
    ///
    /// # Returns
    /// The user with `access_token` set to the new token
    ///
    /// # Errors
    /// * `InvalidInput` - Either field is empty
    /// * `InvalidCredentials` - Unknown user or wrong password (indistinguishable)
    /// * `MissingSigningSecret` - No signing secret configured; nothing is stored
    /// * `TokenIssuanceFailure` - Token could not be signed
    fn log_in(&self, user_name: &str, password: &str) -> Result<User, AuthError>;

    /// Authenticate a request by its bearer token.
    ///
    /// The token must verify cryptographically and be exactly the latest token
    /// issued to the user it names.
    ///
    /// # Errors
    /// * `InvalidToken` - Any verification, lookup or supersession failure
    /// * `MissingSigningSecret` - No signing secret configured
    fn authenticate_by_token(&self, token: &str) -> Result<User, AuthError>;

    /// Retrieve user by unique user name.
    ///
    /// # Errors
    /// * `NotFound` - No user with this name
    fn get_user_by_user_name(&self, user_name: &str) -> Result<User, AuthError>;
}

/// Storage for user records.
///
/// Implementations own every `User`; lookups hand out copies.
pub trait UserRegistry: Send + Sync + 'static {
    /// Retrieve user by identifier.
    ///
    /// # Errors
    /// * `NotFound` - No user with this id
    fn find_by_id(&self, id: &UserId) -> Result<User, RegistryError>;

    /// Retrieve user by user name.
    ///
    /// # Errors
    /// * `NotFound` - No user with this name
    fn find_by_user_name(&self, user_name: &UserName) -> Result<User, RegistryError>;

    /// Whether no user currently holds `user_name`.
    ///
    /// Only a snapshot; `insert` is what enforces uniqueness.
    fn is_user_name_available(&self, user_name: &UserName) -> bool;

    /// Add a new user.
    ///
    /// The uniqueness check and the insert happen as one atomic step.
    ///
    /// # Returns
    /// The stored user
    ///
    /// # Errors
    /// * `UserNameTaken` - Another user already holds the name
    fn insert(&self, user: User) -> Result<User, RegistryError>;

    /// Replace the stored access token of a user.
    ///
    /// # Errors
    /// * `NotFound` - No user with this id
    fn store_access_token(&self, id: &UserId, token: String) -> Result<(), RegistryError>;

    /// Number of registered users.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
