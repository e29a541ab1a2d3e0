use axum::http::StatusCode;
use axum::Extension;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use super::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;

pub async fn current_user(
    Extension(user): Extension<AuthenticatedUser>,
) -> ApiSuccess<CurrentUserResponseData> {
    ApiSuccess::new(
        StatusCode::OK,
        CurrentUserResponseData {
            id: user.user_id.to_string(),
            user_name: user.user_name.to_string(),
            created_at: user.created_at,
        },
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentUserResponseData {
    pub id: String,
    pub user_name: String,
    pub created_at: DateTime<Utc>,
}
