use crate::engine::TrackHandle;
use crate::media::{MediaSource, vp8_track};
use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};
use webrtc::media::Sample;
use webrtc::media::io::ivf_reader::IVFReader;
use webrtc::track::track_local::track_local_static_sample::TrackLocalStaticSample;

const STREAM_ID: &str = "tether";

/// Plays a VP8 IVF file in a loop.
pub struct IvfFileSource {
    path: PathBuf,
    player: Mutex<Option<JoinHandle<()>>>,
}

impl IvfFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            player: Mutex::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Checks the file exists and carries an IVF header.
    pub fn validate(&self) -> Result<()> {
        let file = File::open(&self.path)
            .with_context(|| format!("Failed to open video file {}", self.path.display()))?;
        IVFReader::new(BufReader::new(file))
            .with_context(|| format!("{} is not an IVF file", self.path.display()))?;
        Ok(())
    }
}

#[async_trait]
impl MediaSource for IvfFileSource {
    async fn open(&self) -> Result<TrackHandle> {
        self.close().await;
        self.validate()?;

        let track = vp8_track(STREAM_ID);
        let path = self.path.clone();
        let feed = track.clone();
        let player = tokio::spawn(async move {
            if let Err(e) = play_looped(&path, &feed).await {
                error!("Playback of {} stopped: {:#}", path.display(), e);
            }
        });
        *self.player.lock() = Some(player);

        info!("Playing {}", self.path.display());
        Ok(track)
    }

    async fn close(&self) {
        let player = self.player.lock().take();
        if let Some(player) = player {
            player.abort();
            debug!("Stopped playback of {}", self.path.display());
        }
    }
}

impl Drop for IvfFileSource {
    fn drop(&mut self) {
        if let Some(player) = self.player.get_mut().take() {
            player.abort();
        }
    }
}

async fn play_looped(path: &Path, track: &TrackLocalStaticSample) -> Result<()> {
    loop {
        let file = File::open(path)?;
        let (mut reader, header) = IVFReader::new(BufReader::new(file))?;
        if header.timebase_denominator == 0 {
            bail!("IVF header has a zero timebase denominator");
        }
        let millis =
            1000 * u64::from(header.timebase_numerator) / u64::from(header.timebase_denominator);
        let frame_duration = Duration::from_millis(millis.max(1));

        let mut ticker = tokio::time::interval(frame_duration);
        while let Ok((frame, _)) = reader.parse_next_frame() {
            ticker.tick().await;
            track
                .write_sample(&Sample {
                    data: frame.freeze(),
                    duration: frame_duration,
                    ..Default::default()
                })
                .await?;
        }

        debug!("Reached the end of {}, looping", path.display());
    }
}
