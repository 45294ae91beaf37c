use axum::extract::State;
use axum::http::StatusCode;

use super::MovieData;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn list_movies(
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<MovieData>>, ApiError> {
    state
        .movie_service
        .list_movies()
        .await
        .map_err(ApiError::from)
        .map(|movies| {
            ApiSuccess::new(StatusCode::OK, movies.iter().map(MovieData::from).collect())
        })
}
