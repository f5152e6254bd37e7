use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identity of a single transport channel, whatever role it was opened for.
///
/// A publisher that reconnects gets a fresh `ConnectionId`, which lets the
/// registry tell a stale channel apart from the one that superseded it.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Hash, Eq, PartialEq)]
pub struct ConnectionId(pub Uuid);

impl ConnectionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
