use crate::model::candidate::IceCandidate;
use crate::model::description::{SdpKind, SessionDescription};
use serde::{Deserialize, Serialize};

/// Every message the relay understands, tagged by its JSON `type` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SignalingMessage {
    Offer {
        sdp: String,
    },
    Answer {
        sdp: String,
    },
    /// `None` marks the end of a candidate stream.
    Candidate {
        #[serde(default)]
        candidate: Option<IceCandidate>,
    },
    /// Generated by the relay when a receiver attaches.
    ReceiverConnected,
    /// Generated by the relay when a receiver's channel goes away.
    ReceiverDisconnected,
}

impl SignalingMessage {
    pub const OFFER: &'static str = "offer";
    pub const ANSWER: &'static str = "answer";
    pub const CANDIDATE: &'static str = "candidate";
    pub const RECEIVER_CONNECTED: &'static str = "receiver_connected";
    pub const RECEIVER_DISCONNECTED: &'static str = "receiver_disconnected";

    pub const TAGS: [&'static str; 5] = [
        Self::OFFER,
        Self::ANSWER,
        Self::CANDIDATE,
        Self::RECEIVER_CONNECTED,
        Self::RECEIVER_DISCONNECTED,
    ];

    pub fn tag(&self) -> &'static str {
        match self {
            SignalingMessage::Offer { .. } => Self::OFFER,
            SignalingMessage::Answer { .. } => Self::ANSWER,
            SignalingMessage::Candidate { .. } => Self::CANDIDATE,
            SignalingMessage::ReceiverConnected => Self::RECEIVER_CONNECTED,
            SignalingMessage::ReceiverDisconnected => Self::RECEIVER_DISCONNECTED,
        }
    }

    /// Notifications only the relay itself may emit.
    pub fn is_relay_generated(&self) -> bool {
        matches!(
            self,
            SignalingMessage::ReceiverConnected | SignalingMessage::ReceiverDisconnected
        )
    }

    pub fn into_description(self) -> Option<SessionDescription> {
        match self {
            SignalingMessage::Offer { sdp } => Some(SessionDescription::offer(sdp)),
            SignalingMessage::Answer { sdp } => Some(SessionDescription::answer(sdp)),
            _ => None,
        }
    }
}

impl From<SessionDescription> for SignalingMessage {
    fn from(description: SessionDescription) -> Self {
        match description.kind {
            SdpKind::Offer => SignalingMessage::Offer {
                sdp: description.sdp,
            },
            SdpKind::Answer => SignalingMessage::Answer {
                sdp: description.sdp,
            },
        }
    }
}
