use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::UserData;
use crate::domain::auth::models::require_owner;
use crate::domain::movie::models::MovieId;
use crate::domain::user::errors::UserError;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn add_favorite(
    State(state): State<AppState>,
    Extension(AuthenticatedUser(identity)): Extension<AuthenticatedUser>,
    Path((username, movie_id)): Path<(String, String)>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    require_owner(&identity, &username)?;
    let movie_id = MovieId::from_string(&movie_id).map_err(UserError::from)?;

    state
        .user_service
        .add_favorite(&identity.id, &movie_id)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::CREATED, user.into()))
}

pub async fn remove_favorite(
    State(state): State<AppState>,
    Extension(AuthenticatedUser(identity)): Extension<AuthenticatedUser>,
    Path((username, movie_id)): Path<(String, String)>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    require_owner(&identity, &username)?;
    let movie_id = MovieId::from_string(&movie_id).map_err(UserError::from)?;

    state
        .user_service
        .remove_favorite(&identity.id, &movie_id)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, user.into()))
}
