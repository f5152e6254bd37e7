use crate::registry::Connection;
use dashmap::DashMap;
use parking_lot::Mutex;
use tether_core::{ConnectionId, ReceiverId, SignalingMessage, encode};
use tracing::{debug, error, info, warn};

/// Who is attached to one session: at most one publisher and any number of
/// receivers.
///
/// Join and leave notifications are delivered to the publisher while the
/// attaching or detaching call is still on the stack, so a publisher always
/// sees `receiver_connected` before anything the receiver could cause.
#[derive(Default)]
pub struct ConnectionRegistry {
    publisher: Mutex<Option<Connection>>,
    receivers: DashMap<ReceiverId, Connection>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `connection` the publisher, superseding any previous one.
    pub fn attach_publisher(&self, connection: Connection) {
        let id = connection.id();
        let previous = self.publisher.lock().replace(connection);

        match previous {
            Some(previous) => info!(
                "Publisher {} superseded by {}",
                previous.id(),
                id
            ),
            None => info!("Publisher {} attached", id),
        }
    }

    /// Adds a receiver and tells the current publisher about it.
    pub fn attach_receiver(&self, connection: Connection) -> ReceiverId {
        let id = ReceiverId::new();
        self.receivers.insert(id, connection);
        info!("Receiver {} attached ({} total)", id, self.receivers.len());

        if !self.notify_publisher(&SignalingMessage::ReceiverConnected) {
            warn!("Receiver {} attached but no publisher is available", id);
        }
        id
    }

    /// Clears the publisher slot if `id` still owns it.
    ///
    /// A channel that was already superseded detaches as a no-op, so it cannot
    /// evict the publisher that replaced it.
    pub fn detach_publisher(&self, id: ConnectionId) -> bool {
        let mut slot = self.publisher.lock();
        if slot.as_ref().is_some_and(|current| current.id() == id) {
            *slot = None;
            info!("Publisher {} detached", id);
            true
        } else {
            debug!("Publisher {} already gone", id);
            false
        }
    }

    /// Removes a receiver and tells the publisher it left. Repeated calls for
    /// the same id are no-ops.
    pub fn detach_receiver(&self, id: ReceiverId) -> bool {
        if self.receivers.remove(&id).is_none() {
            debug!("Receiver {} already detached", id);
            return false;
        }
        info!("Receiver {} detached ({} left)", id, self.receivers.len());

        self.notify_publisher(&SignalingMessage::ReceiverDisconnected);
        true
    }

    pub fn current_publisher(&self) -> Option<Connection> {
        self.publisher.lock().clone()
    }

    /// Snapshot of the receiver set. Receivers attached after the snapshot is
    /// taken are not included.
    pub fn receivers(&self) -> Vec<(ReceiverId, Connection)> {
        self.receivers
            .iter()
            .map(|entry| (*entry.key(), entry.value().clone()))
            .collect()
    }

    pub fn for_each_receiver<F>(&self, mut f: F)
    where
        F: FnMut(ReceiverId, &Connection),
    {
        for (id, connection) in self.receivers() {
            f(id, &connection);
        }
    }

    pub fn contains_receiver(&self, id: ReceiverId) -> bool {
        self.receivers.contains_key(&id)
    }

    pub fn receiver_count(&self) -> usize {
        self.receivers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.receivers.is_empty() && self.publisher.lock().is_none()
    }

    /// Delivers a relay-generated notification to the publisher. Returns
    /// `false` when there is no publisher to deliver to.
    pub(crate) fn notify_publisher(&self, message: &SignalingMessage) -> bool {
        let Some(publisher) = self.current_publisher() else {
            return false;
        };

        let frame = match encode(message) {
            Ok(frame) => frame,
            Err(e) => {
                error!("Failed to serialize {} notification: {}", message.tag(), e);
                return false;
            }
        };

        if let Err(e) = publisher.send(&frame) {
            warn!("Dropping publisher after failed {}: {}", message.tag(), e);
            self.detach_publisher(publisher.id());
            return false;
        }
        true
    }
}
