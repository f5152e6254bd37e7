use crate::registry::ConnectionRegistry;
use crate::relay::RelayRouter;
use crate::slot::SessionSlot;
use dashmap::DashMap;
use std::sync::Arc;
use tether_core::SessionId;
use tracing::info;

/// State of one named session: its push-variant connections and its
/// pull-variant offer/answer slot.
pub struct Session {
    id: SessionId,
    connections: ConnectionRegistry,
    slot: SessionSlot,
}

impl Session {
    pub fn new(id: SessionId) -> Self {
        Self {
            id,
            connections: ConnectionRegistry::new(),
            slot: SessionSlot::new(),
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn connections(&self) -> &ConnectionRegistry {
        &self.connections
    }

    pub fn slot(&self) -> &SessionSlot {
        &self.slot
    }

    /// No connections and nothing stored in the slot.
    pub fn is_idle(&self) -> bool {
        self.connections.is_empty() && self.slot.is_empty()
    }

    pub fn router(&self) -> RelayRouter<'_> {
        RelayRouter::new(&self.connections)
    }
}

/// Sessions keyed by id, created on first use and dropped again once idle.
/// A single-session deployment only ever touches [`SessionId::DEFAULT`],
/// which is never dropped.
#[derive(Default)]
pub struct SessionRegistry {
    sessions: DashMap<SessionId, Arc<Session>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_create(&self, id: &SessionId) -> Arc<Session> {
        if let Some(session) = self.sessions.get(id) {
            return session.clone();
        }

        self.sessions
            .entry(id.clone())
            .or_insert_with(|| {
                info!("Creating new session: {}", id);
                Arc::new(Session::new(id.clone()))
            })
            .clone()
    }

    pub fn get(&self, id: &SessionId) -> Option<Arc<Session>> {
        self.sessions.get(id).map(|session| session.clone())
    }

    /// Drops a named session nobody holds and that has no connections or
    /// stored descriptions. Runs under the map's shard lock, so a concurrent
    /// `get_or_create` either sees the old session or makes a new one.
    pub fn remove_if_idle(&self, id: &SessionId) -> bool {
        if *id == SessionId::default() {
            return false;
        }

        let removed = self
            .sessions
            .remove_if(id, |_, session| {
                Arc::strong_count(session) == 1 && session.is_idle()
            })
            .is_some();
        if removed {
            info!("Removed idle session: {}", id);
        }
        removed
    }

    pub fn default_session(&self) -> Arc<Session> {
        self.get_or_create(&SessionId::default())
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
