use std::fmt;

/// Where the publisher is in its conversation with the current receiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NegotiationState {
    /// No engine.
    #[default]
    Idle,
    /// Offer sent, waiting for the answer.
    Negotiating,
    /// Answer applied.
    Connected,
}

impl fmt::Display for NegotiationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NegotiationState::Idle => "idle",
            NegotiationState::Negotiating => "negotiating",
            NegotiationState::Connected => "connected",
        };
        f.write_str(name)
    }
}
