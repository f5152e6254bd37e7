use crate::coordinator::{GatheringPolicy, NegotiationCoordinator};
use crate::engine::EngineFactory;
use crate::media::MediaSource;
use crate::pull::{PollPolicy, SlotClient};
use anyhow::{Result, bail};
use std::fmt;
use std::sync::Arc;
use tether_core::SessionDescription;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

/// Why one negotiation round ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestartReason {
    /// The slot now holds a different answer than the first one seen,
    /// whether or not that first answer applied cleanly.
    AnswerReplaced,
    /// The engine reported a failed, disconnected or closed connection.
    ConnectionLost,
}

impl fmt::Display for RestartReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RestartReason::AnswerReplaced => f.write_str("answer replaced"),
            RestartReason::ConnectionLost => f.write_str("connection lost"),
        }
    }
}

/// Publisher loop for the polling endpoints.
///
/// Each round opens the media source, posts a fresh offer, polls for the
/// answer and then watches for a replaced answer or a lost connection.
pub struct PullPublisher {
    slot: Arc<dyn SlotClient>,
    factory: Arc<dyn EngineFactory>,
    media: Arc<dyn MediaSource>,
    gathering: GatheringPolicy,
    poll: PollPolicy,
}

impl PullPublisher {
    pub fn new(
        slot: Arc<dyn SlotClient>,
        factory: Arc<dyn EngineFactory>,
        media: Arc<dyn MediaSource>,
    ) -> Self {
        Self {
            slot,
            factory,
            media,
            gathering: GatheringPolicy::default(),
            poll: PollPolicy::default(),
        }
    }

    pub fn with_gathering(mut self, gathering: GatheringPolicy) -> Self {
        self.gathering = gathering;
        self
    }

    pub fn with_poll(mut self, poll: PollPolicy) -> Self {
        self.poll = poll;
        self
    }

    /// Negotiates forever, restarting from scratch after every round.
    pub async fn run(&self) -> Result<()> {
        loop {
            match self.negotiate_once().await {
                Ok(reason) => info!("Restarting negotiation: {}", reason),
                Err(e) => {
                    error!("Negotiation round failed: {:#}", e);
                    sleep(self.poll.interval).await;
                }
            }
        }
    }

    /// Runs a single round. Media and engine are released before returning.
    pub async fn negotiate_once(&self) -> Result<RestartReason> {
        let track = self.media.open().await?;
        let mut coordinator =
            NegotiationCoordinator::new(self.factory.clone(), track).with_gathering(self.gathering);

        let result = self.drive(&mut coordinator).await;

        coordinator.teardown().await;
        self.media.close().await;
        result
    }

    async fn drive(&self, coordinator: &mut NegotiationCoordinator) -> Result<RestartReason> {
        let Some(offer) = coordinator.start_negotiation().await?.into_description() else {
            bail!("Coordinator produced a non-offer message");
        };
        self.slot.post_offer(&offer).await?;
        info!("Offer posted, waiting for an answer");

        let mut applied: Option<SessionDescription> = None;
        let mut delay = self.poll.interval;
        loop {
            sleep(delay).await;

            match self.slot.fetch_answer().await {
                Ok(Some(answer)) => {
                    if applied.is_none() {
                        info!("Answer received");
                        // A rejected answer is still recorded; only a different one ends the round.
                        if let Err(e) = coordinator.apply_answer(answer.sdp.clone()).await {
                            error!("Failed to apply answer: {}", e);
                            warn!("Keeping rejected answer, waiting for a replacement");
                        }
                        applied = Some(answer);
                        delay = self.poll.interval;
                    } else if applied.as_ref() != Some(&answer) {
                        return Ok(RestartReason::AnswerReplaced);
                    }
                }
                Ok(None) => {
                    if applied.is_none() {
                        debug!("No answer yet");
                        delay = self.poll.next_delay(delay);
                    }
                }
                Err(e) => {
                    warn!("Answer poll failed: {:#}", e);
                    delay = self.poll.next_delay(delay);
                }
            }

            if applied.is_some() {
                if let Some(engine) = coordinator.engine() {
                    let connection = engine.connection_state();
                    let ice = engine.ice_connection_state();
                    if connection.is_lost() || ice.is_lost() {
                        info!("Connection {:?}, ICE {:?}", connection, ice);
                        return Ok(RestartReason::ConnectionLost);
                    }
                }
            }
        }
    }
}
