//! Boundary codec for signaling frames.
//!
//! Frames are decoded exactly once, when they enter the relay or a client.
//! Everything past this point works on [`SignalingMessage`] values.

use crate::model::{SdpKind, SessionDescription, SignalingMessage};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("malformed signaling message: {0}")]
    Malformed(String),

    #[error("unknown message tag {0:?}")]
    UnknownTag(Option<String>),

    #[error("expected `{expected}` message, got `{found}`")]
    UnexpectedTag {
        expected: &'static str,
        found: &'static str,
    },
}

pub fn decode(raw: &str) -> Result<SignalingMessage, DecodeError> {
    let value: Value =
        serde_json::from_str(raw).map_err(|e| DecodeError::Malformed(e.to_string()))?;

    let Value::Object(fields) = &value else {
        return Err(DecodeError::Malformed("expected a JSON object".to_owned()));
    };

    match fields.get("type") {
        Some(Value::String(tag)) if SignalingMessage::TAGS.contains(&tag.as_str()) => {}
        Some(Value::String(tag)) => return Err(DecodeError::UnknownTag(Some(tag.clone()))),
        _ => return Err(DecodeError::UnknownTag(None)),
    }

    serde_json::from_value(value).map_err(|e| DecodeError::Malformed(e.to_string()))
}

pub fn encode(message: &SignalingMessage) -> serde_json::Result<String> {
    serde_json::to_string(message)
}

/// Decodes a polling-endpoint body, insisting on the kind the endpoint stores.
pub fn decode_description(raw: &str, expected: SdpKind) -> Result<SessionDescription, DecodeError> {
    let message = decode(raw)?;
    let found = message.tag();

    match message.into_description() {
        Some(description) if description.kind == expected => Ok(description),
        _ => Err(DecodeError::UnexpectedTag {
            expected: expected.as_str(),
            found,
        }),
    }
}
