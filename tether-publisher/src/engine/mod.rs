mod engine_config;
mod webrtc_engine;

pub use engine_config::*;
pub use webrtc_engine::*;

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tether_core::IceCandidate;
use webrtc::track::track_local::TrackLocal;

/// A local media track ready to be attached to an engine.
pub type TrackHandle = Arc<dyn TrackLocal + Send + Sync>;

/// Connection or ICE transport state as the coordinator sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    New,
    Connecting,
    Connected,
    Disconnected,
    Failed,
    Closed,
}

impl EngineState {
    /// States after which the engine will not carry media again.
    pub fn is_lost(&self) -> bool {
        matches!(
            self,
            EngineState::Disconnected | EngineState::Failed | EngineState::Closed
        )
    }
}

/// The WebRTC machinery behind one publisher-side peer connection.
///
/// SDP travels as opaque strings; implementations own all parsing.
#[async_trait]
pub trait PeerConnectionEngine: Send + Sync {
    async fn add_track(&self, track: TrackHandle) -> Result<()>;

    async fn create_offer(&self) -> Result<String>;

    async fn set_local_description(&self, sdp: String) -> Result<()>;

    /// Resolves once local ICE gathering has finished.
    async fn gathering_complete(&self);

    /// The current local SDP, including any candidates gathered so far.
    async fn local_description(&self) -> Option<String>;

    async fn set_remote_description(&self, sdp: String) -> Result<()>;

    async fn add_ice_candidate(&self, candidate: &IceCandidate) -> Result<()>;

    fn connection_state(&self) -> EngineState;

    fn ice_connection_state(&self) -> EngineState;

    async fn close(&self) -> Result<()>;
}

/// Builds a fresh engine for every negotiation.
#[async_trait]
pub trait EngineFactory: Send + Sync {
    async fn create(&self) -> Result<Box<dyn PeerConnectionEngine>>;
}
