use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use auth::Authenticator;
use myflix_service::config::Config;
use myflix_service::config::ServerConfig;
use myflix_service::inbound::http::router::create_router;
use myflix_service::inbound::http::router::AppState;
use myflix_service::inbound::http::router::ACCESS_LOG_TARGET;
use myflix_service::inbound::http::shutdown::shutdown_signal;
use myflix_service::outbound::repositories::InMemoryMovieRepository;
use myflix_service::outbound::repositories::InMemoryUserRepository;
use myflix_service::outbound::repositories::PostgresMovieRepository;
use myflix_service::outbound::repositories::PostgresUserRepository;
use sqlx::postgres::PgPoolOptions;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::Targets;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let config = Config::load().context("failed to load configuration")?;

    // Dropping the guard flushes the access log; keep it for the whole run.
    let _access_log_guard = init_tracing(&config.server)?;

    tracing::info!(
        service = "myflix-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    tracing::info!(
        http_port = config.server.http_port,
        request_timeout_secs = config.server.request_timeout_secs,
        static_dir = %config.server.static_dir.display(),
        access_log = config.server.access_log.is_some(),
        database = if config.database.url.is_some() { "postgresql" } else { "in-memory" },
        "Configuration loaded"
    );

    let authenticator = Arc::new(
        Authenticator::new(config.jwt.secret.as_bytes())
            .context("failed to initialise token signing")?,
    );

    let state = match &config.database.url {
        Some(url) => {
            let pg_pool = PgPoolOptions::new()
                .max_connections(config.database.max_connections)
                .acquire_timeout(config.database.acquire_timeout())
                .connect(url)
                .await?;
            tracing::info!(
                max_connections = config.database.max_connections,
                database = "postgresql",
                "Database connection pool created"
            );

            sqlx::migrate!("./migrations").run(&pg_pool).await?;
            tracing::info!(database = "postgresql", "Database migrations completed");

            AppState::new(
                Arc::new(PostgresUserRepository::new(pg_pool.clone())),
                Arc::new(PostgresMovieRepository::new(pg_pool)),
                authenticator,
            )
        }
        None => {
            tracing::warn!("No database configured, using in-memory stores with the sample catalog");
            AppState::new(
                Arc::new(InMemoryUserRepository::new()),
                Arc::new(InMemoryMovieRepository::with_sample_catalog()),
                authenticator,
            )
        }
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(state, &config.server);
    axum::serve(http_listener, http_application)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server exited successfully");
    Ok(())
}

/// Console output filtered by `RUST_LOG`, plus an optional file layer that only
/// receives access log lines.
fn init_tracing(server: &ServerConfig) -> Result<Option<WorkerGuard>, anyhow::Error> {
    let console = tracing_subscriber::fmt::layer().with_filter(
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "myflix_service=debug,tower_http=debug".into()),
    );

    let (access_log, guard) = match &server.access_log {
        Some(path) => {
            let directory = path
                .parent()
                .filter(|dir| !dir.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let file_name = path
                .file_name()
                .with_context(|| format!("access log path {} has no file name", path.display()))?;

            let file_appender = tracing_appender::rolling::never(directory, file_name);
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_filter(Targets::new().with_target(ACCESS_LOG_TARGET, Level::INFO));
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(console)
        .with(access_log)
        .init();

    Ok(guard)
}
