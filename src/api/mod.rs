//! REST transport for the note service.

pub mod handlers;
pub mod middleware;

use crate::config::Config;
use anyhow::{Context, Result};
use axum::routing::get;
use axum::Router;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use handlers::AppState;

/// Route table, logged at startup.
const ROUTES: &[(&str, &str)] = &[
    ("POST", "/v1/note"),
    ("PUT", "/v1/note"),
    ("GET", "/v1/note/{id}"),
    ("DELETE", "/v1/note/{id}"),
    ("GET", "/v1/notes"),
    ("GET", "/health"),
    ("GET", "/meta"),
];

/// Assemble the application router with the full middleware stack:
/// request tracing, permissive CORS and a per-IP rate limit.
pub fn router(state: AppState, rate_limit_per_second: u32) -> Router {
    let limiter = middleware::ip_rate_limiter(rate_limit_per_second);

    Router::new()
        .route(
            "/v1/note",
            axum::routing::post(handlers::create_note).put(handlers::update_note),
        )
        .route(
            "/v1/note/{id}",
            get(handlers::get_note).delete(handlers::delete_note),
        )
        .route("/v1/notes", get(handlers::fetch_notes))
        .route("/health", get(handlers::health))
        .route("/meta", get(handlers::meta))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(axum::middleware::from_fn_with_state(
                    limiter,
                    middleware::rate_limit,
                )),
        )
        .with_state(state)
}

/// Run the API server until interrupted, then shut down gracefully.
pub async fn serve(config: &Config, state: AppState) -> Result<()> {
    let app = router(state, config.server.rate_limit_per_second);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind server address {addr}"))?;

    for (method, path) in ROUTES {
        tracing::info!("route {method} {path}");
    }
    tracing::info!("server listening on {addr}");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("Server terminated unexpectedly")?;

    tracing::info!("server exited");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to install Ctrl+C handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => tracing::error!(error = %err, "failed to install SIGTERM handler"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
