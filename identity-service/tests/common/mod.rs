use std::sync::Arc;

use auth::Authenticator;
use auth::StaticSecret;
use identity_service::domain::user::service::AuthService;
use identity_service::inbound::http::router::create_router;
use identity_service::outbound::repositories::InMemoryUserRegistry;
use serde_json::json;

pub const TEST_SECRET: &str = "test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
}

impl TestApp {
    /// Spawn the application with the test signing secret
    pub async fn spawn() -> Self {
        Self::spawn_with(StaticSecret::new(TEST_SECRET)).await
    }

    /// Spawn the application with a given secret provider
    pub async fn spawn_with(secrets: StaticSecret) -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let auth_service = Arc::new(AuthService::new(
            Arc::new(InMemoryUserRegistry::new()),
            Authenticator::new(secrets),
        ));
        let router = create_router(auth_service);

        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    pub async fn sign_up(&self, user_name: &str, password: &str) -> reqwest::Response {
        self.post("/api/auth/signup")
            .json(&json!({ "user_name": user_name, "password": password }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn log_in(&self, user_name: &str, password: &str) -> reqwest::Response {
        self.post("/api/auth/login")
            .json(&json!({ "user_name": user_name, "password": password }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Log in and return the issued token
    pub async fn token_for(&self, user_name: &str, password: &str) -> String {
        let body: serde_json::Value = self
            .log_in(user_name, password)
            .await
            .json()
            .await
            .expect("Failed to parse response");

        body["data"]["token"]
            .as_str()
            .expect("Login response carries no token")
            .to_string()
    }
}
