//! Authentication primitives
//!
//! - Password hashing (Argon2id)
//! - HS256 access tokens with a per-call signing secret
//! - Authentication coordination
//!
//! The crate holds no user state. Services own their user records and use
//! these pieces to hash, verify and mint tokens.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! ```
//!
//! ## Tokens
//! ```
//! use auth::{Claims, JwtHandler, StaticSecret};
//!
//! let handler = JwtHandler::new(StaticSecret::new("secret_key_at_least_32_bytes_long!"));
//! let token = handler.encode(&Claims::for_user("alice")).unwrap();
//! let decoded: Claims = handler.decode(&token).unwrap();
//! assert_eq!(decoded.user_name, "alice");
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, StaticSecret};
//!
//! let auth = Authenticator::new(StaticSecret::new("secret_key_at_least_32_bytes_long!"));
//!
//! let hash = auth.hash_password("password123").unwrap();
//! let result = auth.authenticate("alice", "password123", &hash).unwrap();
//! let claims = auth.validate_token(&result.access_token).unwrap();
//! assert_eq!(claims.user_name, "alice");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::EnvironmentSecret;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::SecretProvider;
pub use jwt::StaticSecret;
pub use password::PasswordError;
pub use password::PasswordHasher;
