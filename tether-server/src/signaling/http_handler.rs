use crate::registry::Session;
use crate::signaling::AppState;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::sync::Arc;
use tether_core::{SdpKind, decode_description};
use tracing::{info, warn};

pub async fn post_offer(State(state): State<AppState>, body: String) -> Response {
    store(&state, None, SdpKind::Offer, &body)
}

pub async fn get_offer(State(state): State<AppState>) -> Response {
    load(state.find_session(None), SdpKind::Offer)
}

pub async fn post_answer(State(state): State<AppState>, body: String) -> Response {
    store(&state, None, SdpKind::Answer, &body)
}

pub async fn get_answer(State(state): State<AppState>) -> Response {
    load(state.find_session(None), SdpKind::Answer)
}

pub async fn session_post_offer(
    Path(session): Path<String>,
    State(state): State<AppState>,
    body: String,
) -> Response {
    store(&state, Some(session), SdpKind::Offer, &body)
}

pub async fn session_get_offer(
    Path(session): Path<String>,
    State(state): State<AppState>,
) -> Response {
    load(state.find_session(Some(session)), SdpKind::Offer)
}

pub async fn session_post_answer(
    Path(session): Path<String>,
    State(state): State<AppState>,
    body: String,
) -> Response {
    store(&state, Some(session), SdpKind::Answer, &body)
}

pub async fn session_get_answer(
    Path(session): Path<String>,
    State(state): State<AppState>,
) -> Response {
    load(state.find_session(Some(session)), SdpKind::Answer)
}

pub async fn health(State(state): State<AppState>) -> Response {
    Json(json!({ "status": "ok", "sessions": state.sessions.len() })).into_response()
}

// Rejected bodies never create a session.
fn store(state: &AppState, session: Option<String>, kind: SdpKind, body: &str) -> Response {
    let description = match decode_description(body, kind) {
        Ok(description) => description,
        Err(e) => {
            warn!("Rejecting {}: {}", kind, e);
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": e.to_string() })),
            )
                .into_response();
        }
    };

    let session = state.session(session);
    let version = match kind {
        SdpKind::Offer => session.slot().set_offer(description),
        SdpKind::Answer => session.slot().set_answer(description),
    };
    info!("Received {} for session {} (v{})", kind, session.id(), version);

    Json(json!({ "status": "ok" })).into_response()
}

fn load(session: Option<Arc<Session>>, kind: SdpKind) -> Response {
    let Some(session) = session else {
        return StatusCode::NOT_FOUND.into_response();
    };
    let stored = match kind {
        SdpKind::Offer => session.slot().offer(),
        SdpKind::Answer => session.slot().answer(),
    };

    match stored {
        Some(stored) => (
            [(header::ETAG, format!("\"{}\"", stored.version))],
            Json(stored.value),
        )
            .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
