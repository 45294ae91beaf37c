use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;

use crate::domain::auth::errors::AuthError;
use crate::domain::user::models::User;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Extension type holding the live user behind a verified bearer token.
///
/// Lives in the request extensions for the duration of one request only.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub User);

/// Middleware that rejects requests without a valid bearer token and adds the
/// resolved user to request extensions.
pub async fn require_authentication(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let authorization = req
        .headers()
        .get(header::AUTHORIZATION)
        .map(|value| value.to_str().map(str::to_owned))
        .transpose()
        .map_err(|_| AuthError::TokenMalformed("authorization header is not ASCII".to_string()))?;

    let user = state
        .auth_service
        .authenticate_request(authorization.as_deref())
        .await?;

    req.extensions_mut().insert(AuthenticatedUser(user));

    Ok(next.run(req).await)
}
