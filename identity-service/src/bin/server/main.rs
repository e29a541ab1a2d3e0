use std::sync::Arc;

use auth::Authenticator;
use auth::EnvironmentSecret;
use auth::SecretProvider;
use identity_service::config::Config;
use identity_service::domain::user::service::AuthService;
use identity_service::inbound::http::router::create_router;
use identity_service::outbound::repositories::InMemoryUserRegistry;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "identity_service=debug,auth=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "identity-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        secret_variable = %config.jwt.secret_variable,
        "Configuration loaded"
    );

    let secrets = EnvironmentSecret::new(config.jwt.secret_variable.clone());
    if secrets.secret().map_or(true, |secret| secret.is_empty()) {
        tracing::warn!(
            secret_variable = %secrets.variable(),
            "No signing secret set; logins will fail until it is"
        );
    }

    let registry = Arc::new(InMemoryUserRegistry::new());
    let auth_service = Arc::new(AuthService::new(registry, Authenticator::new(secrets)));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    axum::serve(http_listener, create_router(auth_service)).await?;

    tracing::info!("Server exited");

    Ok(())
}
