use crate::coordinator::{GatheringPolicy, NegotiationState};
use crate::engine::{EngineFactory, PeerConnectionEngine, TrackHandle};
use crate::error::NegotiationError;
use std::sync::Arc;
use tether_core::{IceCandidate, SignalingMessage};
use tracing::{debug, error, info, warn};

/// Drives the publisher's single engine through offer, answer and candidates.
///
/// The coordinator is fed relay messages one at a time from a single task.
/// Every receiver sees the same offer, and each `receiver_connected`
/// replaces the engine, so at most one is live.
pub struct NegotiationCoordinator {
    factory: Arc<dyn EngineFactory>,
    track: TrackHandle,
    gathering: GatheringPolicy,
    engine: Option<Box<dyn PeerConnectionEngine>>,
    state: NegotiationState,
}

impl NegotiationCoordinator {
    pub fn new(factory: Arc<dyn EngineFactory>, track: TrackHandle) -> Self {
        Self {
            factory,
            track,
            gathering: GatheringPolicy::default(),
            engine: None,
            state: NegotiationState::Idle,
        }
    }

    pub fn with_gathering(mut self, gathering: GatheringPolicy) -> Self {
        self.gathering = gathering;
        self
    }

    pub fn state(&self) -> NegotiationState {
        self.state
    }

    pub fn engine(&self) -> Option<&dyn PeerConnectionEngine> {
        self.engine.as_deref()
    }

    /// Applies one relay message. Returns the reply to send back, if any.
    pub async fn handle(&mut self, message: SignalingMessage) -> Option<SignalingMessage> {
        match message {
            SignalingMessage::ReceiverConnected => {
                info!("Receiver connected, starting negotiation");
                match self.start_negotiation().await {
                    Ok(offer) => return Some(offer),
                    Err(e) => error!("Failed to start negotiation: {}", e),
                }
            }
            SignalingMessage::Answer { sdp } => {
                if let Err(e) = self.apply_answer(sdp).await {
                    error!("Failed to apply answer: {}", e);
                }
            }
            SignalingMessage::Candidate {
                candidate: Some(candidate),
            } => {
                if let Err(e) = self.apply_candidate(&candidate).await {
                    debug!("Ignoring remote candidate: {}", e);
                }
            }
            SignalingMessage::Candidate { candidate: None } => {
                debug!("Remote side finished sending candidates");
            }
            SignalingMessage::ReceiverDisconnected => {
                info!("Receiver disconnected");
                self.teardown().await;
            }
            SignalingMessage::Offer { .. } => {
                warn!("Publisher got an offer, ignoring");
            }
        }
        None
    }

    /// Replaces the current engine with a fresh one and returns its offer.
    ///
    /// On failure the half-built engine is closed and the state is left as
    /// it was after tearing the previous engine down.
    pub async fn start_negotiation(&mut self) -> Result<SignalingMessage, NegotiationError> {
        self.teardown().await;

        let engine = self
            .factory
            .create()
            .await
            .map_err(NegotiationError::CreateEngine)?;

        match self.prepare_offer(engine.as_ref()).await {
            Ok(sdp) => {
                self.engine = Some(engine);
                self.transition(NegotiationState::Negotiating);
                Ok(SignalingMessage::Offer { sdp })
            }
            Err(e) => {
                if let Err(close_err) = engine.close().await {
                    warn!("Failed to close abandoned engine: {:#}", close_err);
                }
                Err(e)
            }
        }
    }

    async fn prepare_offer(&self, engine: &dyn PeerConnectionEngine) -> Result<String, NegotiationError> {
        engine
            .add_track(self.track.clone())
            .await
            .map_err(NegotiationError::AttachTrack)?;

        let offer = engine
            .create_offer()
            .await
            .map_err(NegotiationError::LocalOffer)?;
        engine
            .set_local_description(offer)
            .await
            .map_err(NegotiationError::LocalOffer)?;

        self.gathering.wait(engine).await;

        engine
            .local_description()
            .await
            .ok_or(NegotiationError::MissingLocalDescription)
    }

    pub async fn apply_answer(&mut self, sdp: String) -> Result<(), NegotiationError> {
        let engine = self.engine.as_deref().ok_or(NegotiationError::NoEngine)?;
        engine
            .set_remote_description(sdp)
            .await
            .map_err(NegotiationError::RemoteDescription)?;

        self.transition(NegotiationState::Connected);
        Ok(())
    }

    pub async fn apply_candidate(&self, candidate: &IceCandidate) -> Result<(), NegotiationError> {
        let engine = self.engine.as_deref().ok_or(NegotiationError::NoEngine)?;
        engine
            .add_ice_candidate(candidate)
            .await
            .map_err(NegotiationError::Candidate)
    }

    /// Closes and forgets the current engine, if any.
    pub async fn teardown(&mut self) {
        if let Some(engine) = self.engine.take() {
            if let Err(e) = engine.close().await {
                warn!("Failed to close engine: {:#}", e);
            }
            info!("Peer connection closed");
        }
        self.transition(NegotiationState::Idle);
    }

    fn transition(&mut self, next: NegotiationState) {
        if self.state != next {
            info!("Negotiation {} -> {}", self.state, next);
            self.state = next;
        }
    }
}
