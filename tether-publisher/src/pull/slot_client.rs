use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::StatusCode;
use tether_core::SessionDescription;

/// The publisher's view of the offer/answer slot.
#[async_trait]
pub trait SlotClient: Send + Sync {
    async fn post_offer(&self, offer: &SessionDescription) -> Result<()>;

    /// `None` while no answer has been posted.
    async fn fetch_answer(&self) -> Result<Option<SessionDescription>>;
}

/// Talks to the relay's polling endpoints over HTTP.
#[derive(Debug, Clone)]
pub struct HttpSlotClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpSlotClient {
    /// `base_url` is the relay root or a session prefix such as
    /// `http://localhost:8000/sessions/lobby`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint)
    }
}

#[async_trait]
impl SlotClient for HttpSlotClient {
    async fn post_offer(&self, offer: &SessionDescription) -> Result<()> {
        self.http
            .post(self.url("offer"))
            .json(offer)
            .send()
            .await
            .context("Failed to post offer")?
            .error_for_status()
            .context("Relay rejected offer")?;
        Ok(())
    }

    async fn fetch_answer(&self) -> Result<Option<SessionDescription>> {
        let response = self
            .http
            .get(self.url("answer"))
            .send()
            .await
            .context("Failed to poll answer")?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let answer = response
            .error_for_status()
            .context("Relay rejected answer poll")?
            .json::<SessionDescription>()
            .await
            .context("Answer body is not a session description")?;
        Ok(Some(answer))
    }
}
