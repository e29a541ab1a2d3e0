pub mod claims;
pub mod errors;
pub mod handler;
pub mod secret;

pub use claims::Claims;
pub use claims::ACCESS_PURPOSE;
pub use errors::JwtError;
pub use handler::JwtHandler;
pub use secret::EnvironmentSecret;
pub use secret::SecretProvider;
pub use secret::StaticSecret;
