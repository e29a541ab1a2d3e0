use std::sync::Arc;

use axum::extract::State;
use axum::http::header;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use super::run_blocking;
use super::sign_up::CredentialsRequestBody;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::ports::AuthServicePort;
use crate::inbound::http::router::AppState;

/// Verify credentials and hand back the freshly issued token.
///
/// The token is returned both in the body and as an `Authorization` header.
pub async fn log_in(
    State(state): State<AppState>,
    Json(body): Json<CredentialsRequestBody>,
) -> Result<impl IntoResponse, ApiError> {
    let service = Arc::clone(&state.auth_service);

    let user = run_blocking(move || service.log_in(&body.user_name, &body.password)).await?;

    let token = user
        .access_token
        .ok_or_else(|| anyhow::anyhow!("Login succeeded without issuing a token"))?;

    Ok((
        [(header::AUTHORIZATION, format!("Bearer {}", token))],
        ApiSuccess::new(
            StatusCode::OK,
            LogInResponseData {
                user_name: user.user_name.to_string(),
                token,
            },
        ),
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogInResponseData {
    pub user_name: String,
    pub token: String,
}
