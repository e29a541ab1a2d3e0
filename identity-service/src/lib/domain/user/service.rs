use std::sync::Arc;
use std::sync::OnceLock;

use auth::AuthenticationError;
use auth::Authenticator;
use auth::JwtError;

use crate::domain::user::models::Credentials;
use crate::domain::user::models::User;
use crate::domain::user::models::UserName;
use crate::user::errors::AuthError;
use crate::user::ports::AuthServicePort;
use crate::user::ports::UserRegistry;

/// Authentication facade.
///
/// Users live in the injected registry, hashing and token signing are
/// delegated to the authenticator. The only local state is a lazily built
/// decoy hash used for unknown-user logins.
pub struct AuthService<UR>
where
    UR: UserRegistry,
{
    registry: Arc<UR>,
    authenticator: Authenticator,
    decoy_hash: OnceLock<Option<String>>,
}

impl<UR> AuthService<UR>
where
    UR: UserRegistry,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `registry` - User storage
    /// * `authenticator` - Password hashing and token signing
    pub fn new(registry: Arc<UR>, authenticator: Authenticator) -> Self {
        Self {
            registry,
            authenticator,
            decoy_hash: OnceLock::new(),
        }
    }

    /// Burn one password verification so an unknown user costs about as much
    /// as a wrong password.
    ///
    /// The decoy hash is computed on first use, so the very first unknown-user
    /// login still differs in timing from later ones.
    fn verify_against_decoy(&self, password: &str) {
        let decoy = self
            .decoy_hash
            .get_or_init(|| self.authenticator.hash_password("decoy-password").ok());

        if let Some(hash) = decoy {
            let _ = self.authenticator.verify_password(password, hash);
        }
    }

    pub fn registry(&self) -> &Arc<UR> {
        &self.registry
    }
}

impl<UR> AuthServicePort for AuthService<UR>
where
    UR: UserRegistry,
{
    fn sign_up(&self, user_name: &str, password: &str) -> Result<User, AuthError> {
        let credentials = Credentials::parse(user_name, password)?;

        // Cheap early exit before the slow hash; insert re-checks atomically
        if !self.registry.is_user_name_available(&credentials.user_name) {
            tracing::warn!(user_name = %credentials.user_name, "Sign up rejected: username taken");
            return Err(AuthError::UserNameTaken(credentials.user_name.to_string()));
        }

        let password_hash = self
            .authenticator
            .hash_password(credentials.password())
            .map_err(|e| {
                tracing::error!(user_name = %credentials.user_name, error = %e, "Password hashing failed");
                AuthError::HashingFailure
            })?;

        let user = self
            .registry
            .insert(User::new(credentials.user_name, password_hash))
            .map_err(|e| {
                tracing::warn!(error = %e, "Sign up rejected at insert");
                AuthError::from(e)
            })?;

        tracing::info!(user_id = %user.id, user_name = %user.user_name, "User signed up");

        Ok(user)
    }

    fn log_in(&self, user_name: &str, password: &str) -> Result<User, AuthError> {
        let credentials = Credentials::parse(user_name, password)?;

        let mut user = self
            .registry
            .find_by_user_name(&credentials.user_name)
            .map_err(|e| {
                tracing::warn!(error = %e, "Login rejected: lookup failed");
                self.verify_against_decoy(credentials.password());
                AuthError::InvalidCredentials
            })?;

        let result = self
            .authenticator
            .authenticate(
                user.user_name.as_str(),
                credentials.password(),
                &user.password_hash,
            )
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials => {
                    tracing::warn!(user_id = %user.id, "Login rejected: password mismatch");
                    AuthError::InvalidCredentials
                }
                AuthenticationError::PasswordError(err) => {
                    tracing::error!(user_id = %user.id, error = %err, "Login rejected: stored hash unreadable");
                    AuthError::InvalidCredentials
                }
                AuthenticationError::JwtError(JwtError::MissingSecret) => {
                    tracing::error!(user_id = %user.id, "Login failed: no signing secret configured");
                    AuthError::MissingSigningSecret
                }
                AuthenticationError::JwtError(err) => {
                    tracing::error!(user_id = %user.id, error = %err, "Login failed: token issuance");
                    AuthError::TokenIssuanceFailure
                }
            })?;

        self.registry
            .store_access_token(&user.id, result.access_token.clone())?;
        user.access_token = Some(result.access_token);

        tracing::info!(user_id = %user.id, user_name = %user.user_name, "User logged in");

        Ok(user)
    }

    fn authenticate_by_token(&self, token: &str) -> Result<User, AuthError> {
        let claims = self.authenticator.validate_token(token).map_err(|e| match e {
            JwtError::MissingSecret => {
                tracing::error!("Token check failed: no signing secret configured");
                AuthError::MissingSigningSecret
            }
            err => {
                tracing::warn!(error = %err, "Token rejected: verification failed");
                AuthError::InvalidToken
            }
        })?;

        let user_name = UserName::new(claims.user_name).map_err(|_| {
            tracing::warn!("Token rejected: empty username claim");
            AuthError::InvalidToken
        })?;

        let user = self
            .registry
            .find_by_user_name(&user_name)
            .map_err(|e| {
                tracing::warn!(error = %e, "Token rejected: claimed user unknown");
                AuthError::InvalidToken
            })?;

        if user.access_token.as_deref() != Some(token) {
            tracing::warn!(user_id = %user.id, "Token rejected: superseded or never issued");
            return Err(AuthError::InvalidToken);
        }

        Ok(user)
    }

    fn get_user_by_user_name(&self, user_name: &str) -> Result<User, AuthError> {
        let user_name = UserName::new(user_name)
            .map_err(|_| AuthError::NotFound(user_name.to_string()))?;

        self.registry
            .find_by_user_name(&user_name)
            .map_err(AuthError::from)
    }
}
