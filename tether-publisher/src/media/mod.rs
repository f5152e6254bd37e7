mod ivf_source;

pub use ivf_source::*;

use crate::engine::TrackHandle;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use webrtc::api::media_engine::MIME_TYPE_VP8;
use webrtc::rtp_transceiver::rtp_codec::RTCRtpCodecCapability;
use webrtc::track::track_local::track_local_static_sample::TrackLocalStaticSample;

/// Something that can produce the outgoing video track.
#[async_trait]
pub trait MediaSource: Send + Sync {
    /// Starts (or restarts) playback and returns the track to attach.
    async fn open(&self) -> Result<TrackHandle>;

    /// Stops playback. Safe to call when nothing is playing.
    async fn close(&self);
}

/// An empty VP8 sample track.
pub fn vp8_track(stream_id: &str) -> Arc<TrackLocalStaticSample> {
    Arc::new(TrackLocalStaticSample::new(
        RTCRtpCodecCapability {
            mime_type: MIME_TYPE_VP8.to_owned(),
            ..Default::default()
        },
        "video".to_owned(),
        stream_id.to_owned(),
    ))
}
