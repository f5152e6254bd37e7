use crate::error::ForwardError;
use tether_core::{ConnectionId, Role};
use tokio::sync::mpsc;

/// Frames queued for a channel's writer task.
pub type Outbox = mpsc::UnboundedSender<String>;

/// Handle to one attached party. The transport layer owns the socket; the
/// registry only keeps this sending half of the writer's queue.
#[derive(Debug, Clone)]
pub struct Connection {
    id: ConnectionId,
    role: Role,
    outbox: Outbox,
}

impl Connection {
    pub fn new(role: Role, outbox: Outbox) -> Self {
        Self {
            id: ConnectionId::new(),
            role,
            outbox,
        }
    }

    /// Builds a connection together with the receiving end of its outbox.
    pub fn channel(role: Role) -> (Self, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(role, tx), rx)
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn send(&self, frame: &str) -> Result<(), ForwardError> {
        self.outbox
            .send(frame.to_owned())
            .map_err(|_| ForwardError::ChannelClosed(self.id))
    }
}
