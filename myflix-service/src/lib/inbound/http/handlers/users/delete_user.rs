use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use crate::domain::auth::models::require_owner;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::MessageBody;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn delete_user(
    State(state): State<AppState>,
    Extension(AuthenticatedUser(identity)): Extension<AuthenticatedUser>,
    Path(username): Path<String>,
) -> Result<ApiSuccess<MessageBody>, ApiError> {
    require_owner(&identity, &username)?;

    state.user_service.delete_user(&identity.id).await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        MessageBody {
            message: format!("{} was deleted.", username),
        },
    ))
}
