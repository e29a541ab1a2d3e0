use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::run_blocking;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::User;
use crate::domain::user::ports::AuthServicePort;
use crate::inbound::http::router::AppState;

pub async fn sign_up(
    State(state): State<AppState>,
    Json(body): Json<CredentialsRequestBody>,
) -> Result<ApiSuccess<SignUpResponseData>, ApiError> {
    let service = Arc::clone(&state.auth_service);

    run_blocking(move || service.sign_up(&body.user_name, &body.password))
        .await
        .map(|ref user| ApiSuccess::new(StatusCode::CREATED, user.into()))
}

/// Raw user name and password as posted by the client.
///
/// Emptiness is checked by the service, not here.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct CredentialsRequestBody {
    pub user_name: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignUpResponseData {
    pub id: String,
    pub user_name: String,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for SignUpResponseData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            user_name: user.user_name.to_string(),
            created_at: user.created_at,
        }
    }
}
