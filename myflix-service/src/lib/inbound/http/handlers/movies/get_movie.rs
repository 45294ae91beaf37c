use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::MovieData;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

/// Look a movie up by its exact title, ignoring case.
pub async fn get_movie(
    State(state): State<AppState>,
    Path(title): Path<String>,
) -> Result<ApiSuccess<MovieData>, ApiError> {
    state
        .movie_service
        .get_movie_by_title(&title)
        .await
        .map_err(ApiError::from)
        .map(|ref movie| ApiSuccess::new(StatusCode::OK, movie.into()))
}
