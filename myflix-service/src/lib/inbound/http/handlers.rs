use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::domain::auth::errors::AuthError;
use crate::domain::movie::errors::MovieError;
use crate::domain::user::errors::UserError;

pub mod login;
pub mod movies;
pub mod users;
pub mod welcome;

pub const UNAUTHORIZED_MESSAGE: &str = "Unauthorized";
pub const PERMISSION_DENIED_MESSAGE: &str = "Permission denied";
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Incorrect username or password.";

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<T>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(data))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    UnprocessableEntity(String),
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Unauthorized,
    PermissionDenied,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(detail) => {
                tracing::error!(error = %detail, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            ApiError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, UNAUTHORIZED_MESSAGE.to_string()),
            // Ownership failures answer 400, not 403.
            ApiError::PermissionDenied => {
                (StatusCode::BAD_REQUEST, PERMISSION_DENIED_MESSAGE.to_string())
            }
        };

        (status, Json(MessageBody { message })).into_response()
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(_)
            | UserError::MovieNotFound(_) => ApiError::NotFound(err.to_string()),
            UserError::UsernameAlreadyExists(_) => ApiError::Conflict(err.to_string()),
            UserError::InvalidUsername(_)
            | UserError::InvalidEmail(_)
            | UserError::InvalidPassword(_)
            | UserError::InvalidBirthday(_)
            | UserError::InvalidUserId(_) => ApiError::UnprocessableEntity(err.to_string()),
            UserError::InvalidMovieId(_) => ApiError::BadRequest(err.to_string()),
            UserError::DatabaseError(_) | UserError::Unknown(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

impl From<MovieError> for ApiError {
    fn from(err: MovieError) -> Self {
        match err {
            MovieError::NotFound(_)
            | MovieError::GenreNotFound(_)
            | MovieError::DirectorNotFound(_) => ApiError::NotFound(err.to_string()),
            MovieError::InvalidMovieId(_) => ApiError::BadRequest(err.to_string()),
            MovieError::DatabaseError(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => {
                ApiError::BadRequest(INVALID_CREDENTIALS_MESSAGE.to_string())
            }
            AuthError::Forbidden => ApiError::PermissionDenied,
            AuthError::StoreUnavailable(_) | AuthError::Internal(_) => {
                ApiError::InternalServerError(err.to_string())
            }
            AuthError::MissingToken
            | AuthError::TokenMalformed(_)
            | AuthError::TokenExpired
            | AuthError::TokenSignatureInvalid
            | AuthError::IdentityNotFound => ApiError::Unauthorized,
        }
    }
}

/// Body extraction failures answer with the same `{ "message": ... }` shape as
/// domain errors. Well-formed JSON of the wrong shape is 422, anything else 400.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(e) => ApiError::UnprocessableEntity(e.body_text()),
            other => ApiError::BadRequest(other.body_text()),
        }
    }
}

/// `{ "message": ... }` body used by errors and plain acknowledgements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageBody {
    pub message: String,
}
