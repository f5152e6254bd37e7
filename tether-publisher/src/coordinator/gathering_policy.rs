use crate::engine::PeerConnectionEngine;
use std::time::Duration;
use tokio::time::timeout;
use tracing::debug;

/// How long to wait for ICE gathering before sending the offer anyway.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GatheringPolicy {
    pub ceiling: Duration,
}

impl Default for GatheringPolicy {
    fn default() -> Self {
        Self {
            ceiling: Duration::from_secs(2),
        }
    }
}

impl GatheringPolicy {
    pub fn new(ceiling: Duration) -> Self {
        Self { ceiling }
    }

    /// Returns `false` when the ceiling was hit first.
    pub async fn wait(&self, engine: &dyn PeerConnectionEngine) -> bool {
        match timeout(self.ceiling, engine.gathering_complete()).await {
            Ok(()) => true,
            Err(_) => {
                debug!(
                    "ICE gathering still running after {:?}, using partial candidates",
                    self.ceiling
                );
                false
            }
        }
    }
}
