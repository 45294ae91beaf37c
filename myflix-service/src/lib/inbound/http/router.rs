use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::services::ServeFile;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::login::login;
use super::handlers::movies::get_director;
use super::handlers::movies::get_genre;
use super::handlers::movies::get_movie;
use super::handlers::movies::list_movies;
use super::handlers::users::add_favorite;
use super::handlers::users::create_user;
use super::handlers::users::delete_user;
use super::handlers::users::get_user;
use super::handlers::users::remove_favorite;
use super::handlers::users::update_user;
use super::handlers::welcome::welcome;
use super::middleware::require_authentication;
use crate::config::ServerConfig;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::auth::service::AuthService;
use crate::domain::movie::ports::MovieRepository;
use crate::domain::movie::ports::MovieServicePort;
use crate::domain::movie::service::MovieService;
use crate::domain::user::ports::UserRepository;
use crate::domain::user::ports::UserServicePort;
use crate::domain::user::service::UserService;

/// Target of the per-request access log lines.
pub const ACCESS_LOG_TARGET: &str = "access_log";

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServicePort>,
    pub movie_service: Arc<dyn MovieServicePort>,
    pub auth_service: Arc<dyn AuthServicePort>,
}

impl AppState {
    /// Wire the domain services over the given stores.
    ///
    /// # Arguments
    /// * `users` - Credential store
    /// * `movies` - Movie catalog store
    /// * `authenticator` - Hashing and signing kit built from the configured secret
    pub fn new<UR, MR>(users: Arc<UR>, movies: Arc<MR>, authenticator: Arc<Authenticator>) -> Self
    where
        UR: UserRepository,
        MR: MovieRepository,
    {
        Self {
            user_service: Arc::new(UserService::new(Arc::clone(&users), Arc::clone(&movies))),
            movie_service: Arc::new(MovieService::new(movies)),
            auth_service: Arc::new(AuthService::new(users, authenticator)),
        }
    }
}

pub fn create_router(state: AppState, server: &ServerConfig) -> Router {
    let public_routes = Router::new()
        .route("/", get(welcome))
        .route("/login", post(login))
        .route("/users", post(create_user));

    let protected_routes = Router::new()
        .route("/movies", get(list_movies))
        .route("/movies/:title", get(get_movie))
        .route("/genres/:name", get(get_genre))
        .route("/directors/:name", get(get_director))
        .route(
            "/users/:username",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route(
            "/users/:username/favorites/:movie_id",
            post(add_favorite).delete(remove_favorite),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_authentication,
        ));

    // Headers stay out of the span: they carry bearer tokens.
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
                tracing::info!(
                    target: ACCESS_LOG_TARGET,
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "served"
                );
            },
        );

    let documentation = ServeFile::new(server.static_dir.join("documentation.html"));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .route_service("/documentation", documentation)
        .fallback_service(ServeDir::new(&server.static_dir))
        .layer(TimeoutLayer::new(server.request_timeout()))
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
