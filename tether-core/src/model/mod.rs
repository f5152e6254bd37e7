mod candidate;
mod connection;
mod description;
mod receiver;
mod role;
mod session;
mod signaling;

pub use candidate::{IceCandidate, IceCandidateFields, IceCandidateInit};
pub use connection::ConnectionId;
pub use description::{SdpKind, SessionDescription};
pub use receiver::ReceiverId;
pub use role::{Role, UnknownRole};
pub use session::SessionId;
pub use signaling::SignalingMessage;
