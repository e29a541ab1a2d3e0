use std::sync::Arc;

use axum::extract::Request;
use axum::extract::State;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use chrono::DateTime;
use chrono::Utc;

use crate::domain::user::models::UserId;
use crate::domain::user::models::UserName;
use crate::domain::user::ports::AuthServicePort;
use crate::inbound::http::handlers::run_blocking;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Extension type to store the authenticated user in request extensions
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub user_name: UserName,
    pub created_at: DateTime<Utc>,
}

/// Middleware that checks the bearer token against the latest token issued to
/// its user and adds the user to request extensions
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_token_from_header(&req)
        .map_err(IntoResponse::into_response)?
        .to_string();

    let service = Arc::clone(&state.auth_service);
    let user = run_blocking(move || service.authenticate_by_token(&token))
        .await
        .map_err(IntoResponse::into_response)?;

    req.extensions_mut().insert(AuthenticatedUser {
        user_id: user.id,
        user_name: user.user_name,
        created_at: user.created_at,
    });

    Ok(next.run(req).await)
}

fn extract_token_from_header(req: &Request) -> Result<&str, ApiError> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".to_string()))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| ApiError::Unauthorized("Invalid Authorization header".to_string()))?;

    auth_str.strip_prefix("Bearer ").ok_or_else(|| {
        ApiError::Unauthorized(
            "Invalid Authorization header format. Expected: Bearer <token>".to_string(),
        )
    })
}
