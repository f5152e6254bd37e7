mod gathering_policy;
mod negotiation_coordinator;
mod negotiation_state;
mod push_publisher;

pub use gathering_policy::*;
pub use negotiation_coordinator::*;
pub use negotiation_state::*;
pub use push_publisher::*;
