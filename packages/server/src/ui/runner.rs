//! Router construction and server startup.

use std::sync::Arc;

use axum::{Router, routing::get};
use tokio::{net::TcpListener, sync::Mutex};
use tower_http::trace::TraceLayer;

use crate::{
    config::ServerConfig,
    domain::{Session, SessionRepository, Timestamp},
    error::ServerError,
    infrastructure::repository::InMemorySessionRepository,
    ui::{
        coordinator::SessionCoordinator,
        handler::{
            debug_session_state, get_session_summary, get_strokes, health_check,
            websocket_handler,
        },
        signal::shutdown_signal,
        state::AppState,
    },
};
use rakugaki_shared::time::get_jst_timestamp;

/// Build the shared state: an empty session, its repository and a running coordinator.
///
/// Must be called inside a tokio runtime.
pub fn build_state(config: ServerConfig) -> Arc<AppState> {
    let session = Arc::new(Mutex::new(Session::new(Timestamp::new(get_jst_timestamp()))));
    let repository: Arc<dyn SessionRepository> =
        Arc::new(InMemorySessionRepository::new(session));
    let coordinator = SessionCoordinator::new(repository.clone(), config.require_join).spawn();

    Arc::new(AppState {
        repository,
        coordinator,
        config,
    })
}

/// Build the application router.
pub fn build_app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/ws", get(websocket_handler))
        .route("/api/health", get(health_check))
        .route("/api/session", get(get_session_summary))
        .route("/api/session/strokes", get(get_strokes))
        .route("/debug/session", get(debug_session_state))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind the configured address and serve until a shutdown signal arrives.
pub async fn run(config: ServerConfig) -> Result<(), ServerError> {
    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: addr.clone(),
            source,
        })?;
    serve(listener, config).await
}

/// Serve on an already bound listener.
pub async fn serve(listener: TcpListener, config: ServerConfig) -> Result<(), ServerError> {
    let state = build_state(config);
    let app = build_app(state.clone());

    if let Ok(addr) = listener.local_addr() {
        tracing::info!("Listening on ws://{}/ws", addr);
        tracing::info!("HTTP API available at http://{}/api/session", addr);
    }
    if !state.config.require_join {
        tracing::warn!("Drawing before user:join is allowed (--require-join=false)");
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServerError::Serve)
}
