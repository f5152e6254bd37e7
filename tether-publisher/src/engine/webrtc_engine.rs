use crate::engine::{EngineConfig, EngineFactory, EngineState, PeerConnectionEngine, TrackHandle};
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::sync::Arc;
use tether_core::IceCandidate;
use tokio::sync::{Mutex, mpsc, watch};
use tracing::{debug, info};
use webrtc::api::APIBuilder;
use webrtc::api::interceptor_registry::register_default_interceptors;
use webrtc::api::media_engine::MediaEngine;
use webrtc::ice_transport::ice_candidate::RTCIceCandidateInit;
use webrtc::ice_transport::ice_connection_state::RTCIceConnectionState;
use webrtc::ice_transport::ice_server::RTCIceServer;
use webrtc::interceptor::registry::Registry;
use webrtc::peer_connection::RTCPeerConnection;
use webrtc::peer_connection::configuration::RTCConfiguration;
use webrtc::peer_connection::peer_connection_state::RTCPeerConnectionState;
use webrtc::peer_connection::sdp::session_description::RTCSessionDescription;

impl From<RTCPeerConnectionState> for EngineState {
    fn from(state: RTCPeerConnectionState) -> Self {
        match state {
            RTCPeerConnectionState::Unspecified | RTCPeerConnectionState::New => EngineState::New,
            RTCPeerConnectionState::Connecting => EngineState::Connecting,
            RTCPeerConnectionState::Connected => EngineState::Connected,
            RTCPeerConnectionState::Disconnected => EngineState::Disconnected,
            RTCPeerConnectionState::Failed => EngineState::Failed,
            RTCPeerConnectionState::Closed => EngineState::Closed,
        }
    }
}

impl From<RTCIceConnectionState> for EngineState {
    fn from(state: RTCIceConnectionState) -> Self {
        match state {
            RTCIceConnectionState::Unspecified | RTCIceConnectionState::New => EngineState::New,
            RTCIceConnectionState::Checking => EngineState::Connecting,
            RTCIceConnectionState::Connected | RTCIceConnectionState::Completed => {
                EngineState::Connected
            }
            RTCIceConnectionState::Disconnected => EngineState::Disconnected,
            RTCIceConnectionState::Failed => EngineState::Failed,
            RTCIceConnectionState::Closed => EngineState::Closed,
        }
    }
}

/// A webrtc-rs peer connection on the publishing side.
pub struct WebRtcEngine {
    peer_connection: Arc<RTCPeerConnection>,
    connection_state: watch::Receiver<EngineState>,
    ice_state: watch::Receiver<EngineState>,
    gathering: Mutex<Option<mpsc::Receiver<()>>>,
}

impl WebRtcEngine {
    pub async fn new(config: &EngineConfig) -> Result<Self> {
        let mut m = MediaEngine::default();
        m.register_default_codecs()?;
        let registry = register_default_interceptors(Registry::new(), &mut m)?;

        let api = APIBuilder::new()
            .with_media_engine(m)
            .with_interceptor_registry(registry)
            .build();

        let ice_servers = if config.ice_servers.is_empty() {
            Vec::new()
        } else {
            vec![RTCIceServer {
                urls: config.ice_servers.clone(),
                credential: String::new(),
                username: String::new(),
            }]
        };
        let rtc_config = RTCConfiguration {
            ice_servers,
            ..Default::default()
        };

        let peer_connection = Arc::new(
            api.new_peer_connection(rtc_config)
                .await
                .context("Failed to create peer connection")?,
        );

        let (state_tx, connection_state) = watch::channel(EngineState::New);
        peer_connection.on_peer_connection_state_change(Box::new(
            move |s: RTCPeerConnectionState| {
                info!("Peer connection state changed: {:?}", s);
                state_tx.send_replace(EngineState::from(s));
                Box::pin(async {})
            },
        ));

        let (ice_tx, ice_state) = watch::channel(EngineState::New);
        peer_connection.on_ice_connection_state_change(Box::new(
            move |s: RTCIceConnectionState| {
                debug!("ICE connection state changed: {:?}", s);
                ice_tx.send_replace(EngineState::from(s));
                Box::pin(async {})
            },
        ));

        Ok(Self {
            peer_connection,
            connection_state,
            ice_state,
            gathering: Mutex::new(None),
        })
    }
}

#[async_trait]
impl PeerConnectionEngine for WebRtcEngine {
    async fn add_track(&self, track: TrackHandle) -> Result<()> {
        let rtp_sender = self.peer_connection.add_track(track).await?;

        // RTCP has to be drained for interceptors such as NACK to work.
        tokio::spawn(async move {
            let mut rtcp_buf = vec![0u8; 1500];
            while rtp_sender.read(&mut rtcp_buf).await.is_ok() {}
        });
        Ok(())
    }

    async fn create_offer(&self) -> Result<String> {
        let offer = self.peer_connection.create_offer(None).await?;
        Ok(offer.sdp)
    }

    async fn set_local_description(&self, sdp: String) -> Result<()> {
        let desc = RTCSessionDescription::offer(sdp)?;
        // Subscribe before gathering starts so completion cannot be missed.
        let promise = self.peer_connection.gathering_complete_promise().await;
        *self.gathering.lock().await = Some(promise);
        self.peer_connection.set_local_description(desc).await?;
        Ok(())
    }

    async fn gathering_complete(&self) {
        let promise = self.gathering.lock().await.take();
        if let Some(mut rx) = promise {
            let _ = rx.recv().await;
        }
    }

    async fn local_description(&self) -> Option<String> {
        self.peer_connection
            .local_description()
            .await
            .map(|desc| desc.sdp)
    }

    async fn set_remote_description(&self, sdp: String) -> Result<()> {
        let desc = RTCSessionDescription::answer(sdp)?;
        self.peer_connection.set_remote_description(desc).await?;
        Ok(())
    }

    async fn add_ice_candidate(&self, candidate: &IceCandidate) -> Result<()> {
        let init = RTCIceCandidateInit {
            candidate: candidate.sdp_line(),
            sdp_mid: candidate.sdp_mid().map(str::to_owned),
            sdp_mline_index: candidate.sdp_m_line_index(),
            username_fragment: candidate.username_fragment().map(str::to_owned),
        };
        self.peer_connection.add_ice_candidate(init).await?;
        Ok(())
    }

    fn connection_state(&self) -> EngineState {
        *self.connection_state.borrow()
    }

    fn ice_connection_state(&self) -> EngineState {
        *self.ice_state.borrow()
    }

    async fn close(&self) -> Result<()> {
        self.peer_connection.close().await?;
        Ok(())
    }
}

/// Creates a [`WebRtcEngine`] per negotiation from a shared config.
#[derive(Debug, Clone, Default)]
pub struct WebRtcEngineFactory {
    config: EngineConfig,
}

impl WebRtcEngineFactory {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl EngineFactory for WebRtcEngineFactory {
    async fn create(&self) -> Result<Box<dyn PeerConnectionEngine>> {
        let engine = WebRtcEngine::new(&self.config).await?;
        Ok(Box::new(engine))
    }
}
