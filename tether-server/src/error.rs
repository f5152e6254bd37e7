use tether_core::{ConnectionId, DecodeError, Role};
use thiserror::Error;

/// A destination channel could not take a frame.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ForwardError {
    #[error("outbox of connection {0} is closed")]
    ChannelClosed(ConnectionId),
}

/// Why an inbound frame was not relayed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RouteError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("a {role} may not send `{tag}` messages")]
    Forbidden { role: Role, tag: &'static str },
}
