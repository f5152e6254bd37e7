use crate::coordinator::NegotiationCoordinator;
use anyhow::{Context, Result};
use futures::{SinkExt, StreamExt};
use tether_core::{decode, encode};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, info, warn};

/// Publisher session over the relay's WebSocket endpoint.
pub struct PushPublisher {
    url: String,
    coordinator: NegotiationCoordinator,
}

impl PushPublisher {
    /// `url` is the publisher endpoint, e.g. `ws://localhost:8000/ws/publisher`.
    pub fn new(url: impl Into<String>, coordinator: NegotiationCoordinator) -> Self {
        Self {
            url: url.into(),
            coordinator,
        }
    }

    /// Runs until the relay closes the channel. The engine is released on
    /// every exit path.
    pub async fn run(mut self) -> Result<()> {
        let (socket, _) = connect_async(self.url.as_str())
            .await
            .with_context(|| format!("Failed to connect to signaling server at {}", self.url))?;
        info!("Connected to signaling server at {}", self.url);

        let (mut sender, mut receiver) = socket.split();
        let result: Result<()> = async {
            while let Some(frame) = receiver.next().await {
                let text = match frame.context("Signaling channel failed")? {
                    Message::Text(text) => text,
                    Message::Close(_) => break,
                    _ => continue,
                };

                let message = match decode(text.as_str()) {
                    Ok(message) => message,
                    Err(e) => {
                        warn!("Dropping signaling frame: {}", e);
                        continue;
                    }
                };
                debug!("Received {} from relay", message.tag());

                if let Some(reply) = self.coordinator.handle(message).await {
                    let raw = encode(&reply)?;
                    sender.send(Message::Text(raw.into())).await?;
                    info!("Sent {} to relay", reply.tag());
                }
            }
            Ok(())
        }
        .await;

        info!("Signaling channel closed");
        self.coordinator.teardown().await;
        result
    }
}
