use thiserror::Error;

/// The engine refused a step of the negotiation. The coordinator logs these
/// and stays in its current state; nothing is retried.
#[derive(Debug, Error)]
pub enum NegotiationError {
    #[error("failed to create peer connection engine: {0:#}")]
    CreateEngine(anyhow::Error),

    #[error("failed to attach media track: {0:#}")]
    AttachTrack(anyhow::Error),

    #[error("failed to prepare local offer: {0:#}")]
    LocalOffer(anyhow::Error),

    #[error("engine has no local description after ICE gathering")]
    MissingLocalDescription,

    #[error("engine rejected remote description: {0:#}")]
    RemoteDescription(anyhow::Error),

    #[error("engine rejected ICE candidate: {0:#}")]
    Candidate(anyhow::Error),

    #[error("no negotiation in progress")]
    NoEngine,
}
