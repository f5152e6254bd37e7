use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identity assigned to a receiver when it attaches to a session.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Hash, Eq, PartialEq)]
pub struct ReceiverId(pub Uuid);

impl ReceiverId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ReceiverId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ReceiverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
