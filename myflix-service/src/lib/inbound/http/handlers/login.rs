use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::users::UserData;
use super::ApiError;
use super::ApiSuccess;
use super::INVALID_CREDENTIALS_MESSAGE;
use crate::domain::auth::models::Credentials;
use crate::inbound::http::router::AppState;

/// Exchange a username and password for a bearer token.
///
/// Every credential failure, including missing fields and unreadable bodies,
/// answers the same `400 Incorrect username or password.`
pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequestBody>, JsonRejection>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    let Json(body) = body.map_err(|rejection| {
        tracing::debug!(status = rejection.status().as_u16(), "Login body rejected");
        ApiError::BadRequest(INVALID_CREDENTIALS_MESSAGE.to_string())
    })?;

    let success = state
        .auth_service
        .login(Credentials::new(body.username, body.password))
        .await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        LoginResponseData {
            user: (&success.user).into(),
            token: success.token,
        },
    ))
}

#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LoginRequestBody {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub user: UserData,
    pub token: String,
}
