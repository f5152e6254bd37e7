use futures::{SinkExt, StreamExt};
use std::net::SocketAddr;
use std::time::Duration;
use tether_core::{SignalingMessage, decode, encode};
use tether_server::{AppState, RelayConfig, app};
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

/// Timeout for a single expected frame (ms).
pub const RECV_TIMEOUT_MS: u64 = 5000;

/// Serves the relay on an ephemeral port. The returned state is shared with
/// the server so tests can observe the registry.
pub async fn spawn_relay() -> (SocketAddr, AppState) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("No local address");
    let state = AppState::new();
    let router = app(state.clone(), &RelayConfig::default());

    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("Relay crashed");
    });

    (addr, state)
}

/// Polls `condition` until it holds or the timeout expires.
pub async fn wait_until<F>(mut condition: F, timeout_ms: u64) -> bool
where
    F: FnMut() -> bool,
{
    let start = std::time::Instant::now();
    let timeout = Duration::from_millis(timeout_ms);

    loop {
        if condition() {
            return true;
        }
        if start.elapsed() > timeout {
            return false;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}

pub struct WsTestClient {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl WsTestClient {
    pub async fn connect(addr: SocketAddr, path: &str) -> anyhow::Result<Self> {
        let (stream, _) = connect_async(format!("ws://{addr}{path}")).await?;
        Ok(Self { stream })
    }

    pub async fn send(&mut self, message: &SignalingMessage) {
        let raw = encode(message).expect("Failed to encode message");
        self.send_raw(&raw).await;
    }

    pub async fn send_raw(&mut self, raw: &str) {
        self.stream
            .send(Message::Text(raw.to_owned().into()))
            .await
            .expect("Failed to send frame");
    }

    pub async fn recv_raw(&mut self) -> anyhow::Result<String> {
        let timeout = Duration::from_millis(RECV_TIMEOUT_MS);
        loop {
            let frame = tokio::time::timeout(timeout, self.stream.next())
                .await
                .map_err(|_| anyhow::anyhow!("Timeout waiting for frame"))?;

            match frame {
                Some(Ok(Message::Text(text))) => return Ok(text.as_str().to_owned()),
                Some(Ok(Message::Close(_))) | None => anyhow::bail!("Connection closed"),
                Some(Ok(_)) => continue,
                Some(Err(e)) => return Err(e.into()),
            }
        }
    }

    pub async fn recv(&mut self) -> SignalingMessage {
        let raw = self.recv_raw().await.expect("Expected a frame");
        decode(&raw).expect("Relay sent an undecodable frame")
    }

    /// Asserts nothing arrives for `ms` milliseconds.
    pub async fn expect_silence(&mut self, ms: u64) {
        let frame = tokio::time::timeout(Duration::from_millis(ms), self.stream.next()).await;
        if let Ok(Some(Ok(Message::Text(text)))) = frame {
            panic!("Unexpected frame: {}", text.as_str());
        }
    }

    pub async fn close(mut self) {
        let _ = self.stream.close(None).await;
    }
}
