mod config;
mod error;
mod registry;
mod relay;
mod signaling;
mod slot;

pub use config::*;
pub use error::*;
pub use registry::*;
pub use relay::*;
pub use signaling::*;
pub use slot::*;

use axum::Router;
use axum::routing::get;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

/// Builds the relay's HTTP surface: push WebSocket endpoints, pull slot
/// endpoints (both also under `/sessions/{session}`) and a health check.
pub fn app(state: AppState, config: &RelayConfig) -> Router {
    let router = Router::new()
        .route("/ws/{role}", get(ws_handler))
        .route("/offer", get(get_offer).post(post_offer))
        .route("/answer", get(get_answer).post(post_answer))
        .route("/sessions/{session}/ws/{role}", get(session_ws_handler))
        .route(
            "/sessions/{session}/offer",
            get(session_get_offer).post(session_post_offer),
        )
        .route(
            "/sessions/{session}/answer",
            get(session_get_answer).post(session_post_answer),
        )
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    if config.cors_permissive {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        router.layer(cors)
    } else {
        router
    }
}

/// Binds `config.bind` and serves until ctrl-c.
pub async fn serve(config: RelayConfig) -> anyhow::Result<()> {
    let listener = TcpListener::bind(config.bind).await?;
    serve_with_listener(listener, config).await
}

pub async fn serve_with_listener(listener: TcpListener, config: RelayConfig) -> anyhow::Result<()> {
    info!("Signaling relay listening on http://{}", listener.local_addr()?);

    let app = app(AppState::new(), &config);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Signaling relay stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}
