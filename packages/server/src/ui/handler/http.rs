//! HTTP API endpoint handlers.
//!
//! Read-only views of the session; nothing here mutates it.

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::{
    domain::{Session, Stroke},
    infrastructure::dto::http::{ParticipantDetailDto, SessionSummaryDto},
    ui::state::AppState,
};
use rakugaki_shared::time::timestamp_to_jst_rfc3339;

/// Debug endpoint to get the current session state (for testing purposes)
pub async fn debug_session_state(State(state): State<Arc<AppState>>) -> Json<Session> {
    Json(state.repository.get_session().await)
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Get the session summary
pub async fn get_session_summary(State(state): State<Arc<AppState>>) -> Json<SessionSummaryDto> {
    let session = state.repository.get_session().await;

    let summary = SessionSummaryDto {
        created_at: timestamp_to_jst_rfc3339(session.created_at.value()),
        participants: session
            .registry
            .list_all()
            .iter()
            .map(ParticipantDetailDto::from)
            .collect(),
        stroke_count: session.history.len(),
        redo_depth: session.history.redo_buffer().len(),
    };

    Json(summary)
}

/// Get the authoritative stroke history
pub async fn get_strokes(State(state): State<Arc<AppState>>) -> Json<Vec<Stroke>> {
    Json(state.repository.get_strokes().await)
}
