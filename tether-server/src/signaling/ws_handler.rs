use crate::registry::{Connection, Session};
use crate::relay::Origin;
use crate::error::RouteError;
use crate::signaling::AppState;
use axum::extract::ws::{Message, WebSocket};
use axum::extract::{Path, State, WebSocketUpgrade};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use futures::{SinkExt, StreamExt};
use std::sync::Arc;
use tether_core::Role;
use tracing::{debug, info, warn};

/// `GET /ws/{role}`: push-variant endpoint of the default session.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Path(role): Path<String>,
    State(state): State<AppState>,
) -> Response {
    upgrade(ws, state, None, &role)
}

/// `GET /sessions/{session}/ws/{role}`
pub async fn session_ws_handler(
    ws: WebSocketUpgrade,
    Path((session, role)): Path<(String, String)>,
    State(state): State<AppState>,
) -> Response {
    upgrade(ws, state, Some(session), &role)
}

fn upgrade(ws: WebSocketUpgrade, state: AppState, session: Option<String>, role: &str) -> Response {
    let role = match role.parse::<Role>() {
        Ok(role) => role,
        Err(e) => {
            warn!("Rejecting WebSocket upgrade: {}", e);
            return StatusCode::NOT_FOUND.into_response();
        }
    };

    ws.on_upgrade(move |socket| async move {
        let session = state.session(session);
        let id = session.id().clone();
        handle_socket(socket, role, session).await;
        // Every handle this connection held is dropped by now.
        state.sessions.remove_if_idle(&id);
    })
}

async fn handle_socket(socket: WebSocket, role: Role, session: Arc<Session>) {
    let (mut sender, mut receiver) = socket.split();
    let (connection, mut rx) = Connection::channel(role);

    // The registry keeps the only outbox sender, so dropping the connection
    // from the registry also ends the writer task below.
    let origin = match role {
        Role::Publisher => {
            let id = connection.id();
            session.connections().attach_publisher(connection);
            Origin::Publisher(id)
        }
        Role::Receiver => Origin::Receiver(session.connections().attach_receiver(connection)),
    };
    info!(
        "New WebSocket connection in session {}: {:?}",
        session.id(),
        origin
    );

    let mut send_task = tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            if sender.send(Message::Text(frame.into())).await.is_err() {
                break;
            }
        }
    });

    let mut recv_task = tokio::spawn({
        let session = session.clone();

        async move {
            while let Some(Ok(msg)) = receiver.next().await {
                match msg {
                    Message::Text(text) => {
                        match session.router().dispatch(origin, text.as_str()) {
                            Ok(delivery) => debug!("{:?} relayed: {:?}", origin, delivery),
                            Err(RouteError::Decode(e)) => {
                                warn!("Invalid SignalingMessage from {:?}: {}", origin, e)
                            }
                            Err(e) => warn!("Dropping frame from {:?}: {}", origin, e),
                        }
                    }
                    Message::Close(_) => break,
                    _ => {}
                }
            }
        }
    });

    tokio::select! {
        _ = (&mut send_task) => {
            recv_task.abort();
            let _ = recv_task.await;
        }
        _ = (&mut recv_task) => {
            send_task.abort();
            let _ = send_task.await;
        }
    };

    match origin {
        Origin::Publisher(id) => {
            session.connections().detach_publisher(id);
        }
        Origin::Receiver(id) => {
            session.connections().detach_receiver(id);
        }
    }
    info!("WebSocket disconnected: {:?}", origin);
}
