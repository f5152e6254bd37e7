use crate::error::RouteError;
use crate::registry::ConnectionRegistry;
use tether_core::{ConnectionId, ReceiverId, Role, SignalingMessage, decode};
use tracing::{debug, warn};

/// The channel an inbound frame arrived on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Publisher(ConnectionId),
    Receiver(ReceiverId),
}

impl Origin {
    pub fn role(&self) -> Role {
        match self {
            Origin::Publisher(_) => Role::Publisher,
            Origin::Receiver(_) => Role::Receiver,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    /// Every receiver attached at the time of the fan-out.
    Receivers,
    Publisher,
}

/// Outcome of one forward.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Delivery {
    pub delivered: usize,
    pub failed: usize,
}

/// Decides where a client frame goes based on who sent it and what it is.
pub fn route(role: Role, message: &SignalingMessage) -> Result<Destination, RouteError> {
    match (role, message) {
        (Role::Publisher, SignalingMessage::Offer { .. })
        | (Role::Publisher, SignalingMessage::Candidate { .. }) => Ok(Destination::Receivers),
        (Role::Receiver, SignalingMessage::Answer { .. })
        | (Role::Receiver, SignalingMessage::Candidate { .. }) => Ok(Destination::Publisher),
        (role, message) => Err(RouteError::Forbidden {
            role,
            tag: message.tag(),
        }),
    }
}

/// Forwarding policy over one session's [`ConnectionRegistry`].
///
/// Frames are relayed as received, byte for byte. A destination whose outbox
/// is gone is detached on the spot; the rest of the fan-out still happens.
pub struct RelayRouter<'a> {
    registry: &'a ConnectionRegistry,
}

impl<'a> RelayRouter<'a> {
    pub fn new(registry: &'a ConnectionRegistry) -> Self {
        Self { registry }
    }

    /// Decodes `raw`, checks the sender may send it and forwards it.
    pub fn dispatch(&self, origin: Origin, raw: &str) -> Result<Delivery, RouteError> {
        let message = decode(raw)?;
        let destination = route(origin.role(), &message)?;

        debug!(
            "Relaying `{}` from {:?} to {:?}",
            message.tag(),
            origin,
            destination
        );
        Ok(self.forward(destination, raw))
    }

    pub fn forward(&self, destination: Destination, frame: &str) -> Delivery {
        match destination {
            Destination::Publisher => self.forward_to_publisher(frame),
            Destination::Receivers => self.broadcast(frame),
        }
    }

    fn forward_to_publisher(&self, frame: &str) -> Delivery {
        let Some(publisher) = self.registry.current_publisher() else {
            warn!("No publisher attached, dropping frame");
            return Delivery::default();
        };

        match publisher.send(frame) {
            Ok(()) => Delivery {
                delivered: 1,
                failed: 0,
            },
            Err(e) => {
                warn!("Failed to forward to publisher: {}", e);
                self.registry.detach_publisher(publisher.id());
                Delivery {
                    delivered: 0,
                    failed: 1,
                }
            }
        }
    }

    fn broadcast(&self, frame: &str) -> Delivery {
        let mut delivery = Delivery::default();
        let mut dead = Vec::new();

        self.registry.for_each_receiver(|id, connection| match connection.send(frame) {
            Ok(()) => delivery.delivered += 1,
            Err(e) => {
                warn!("Failed to forward to receiver {}: {}", id, e);
                delivery.failed += 1;
                dead.push(id);
            }
        });

        for id in dead {
            self.registry.detach_receiver(id);
        }

        if delivery.delivered == 0 && delivery.failed == 0 {
            debug!("No receivers attached, frame dropped");
        }
        delivery
    }
}
