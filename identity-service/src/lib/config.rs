use std::env;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub jwt: JwtConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

/// Token signing configuration.
///
/// Holds the name of the variable carrying the secret, never the secret itself.
#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret_variable: String,
}

impl Config {
    pub const DEFAULT_HTTP_PORT: u16 = 8081;
    pub const DEFAULT_SECRET_VARIABLE: &'static str = "SECRET";

    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (SERVER__HTTP_PORT, JWT__SECRET_VARIABLE)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    /// 4. Built-in defaults
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .set_default("server.http_port", i64::from(Self::DEFAULT_HTTP_PORT))?
            .set_default("jwt.secret_variable", Self::DEFAULT_SECRET_VARIABLE)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: SERVER__HTTP_PORT=9000 overrides server.http_port
            .add_source(Environment::default().separator("__"))
            .build()?;

        configuration.try_deserialize()
    }
}
