use crate::registry::{Session, SessionRegistry};
use std::sync::Arc;
use tether_core::SessionId;

#[derive(Clone, Default)]
pub struct AppState {
    pub sessions: Arc<SessionRegistry>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The addressed session, created if needed. `None` is the default one.
    pub fn session(&self, id: Option<String>) -> Arc<Session> {
        self.sessions.get_or_create(&session_id(id))
    }

    /// Lookup without creating, for read-only requests.
    pub fn find_session(&self, id: Option<String>) -> Option<Arc<Session>> {
        self.sessions.get(&session_id(id))
    }
}

fn session_id(id: Option<String>) -> SessionId {
    id.map(SessionId::from).unwrap_or_default()
}
