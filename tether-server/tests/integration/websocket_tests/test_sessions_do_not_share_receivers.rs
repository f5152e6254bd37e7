use tether_core::{SessionId, SignalingMessage};

use crate::integration::init_tracing;
use crate::utils::{WsTestClient, spawn_relay, wait_until};

#[tokio::test]
async fn test_sessions_do_not_share_receivers() {
    init_tracing();
    let (addr, state) = spawn_relay().await;
    let alpha = state.sessions.get_or_create(&SessionId::from("alpha"));

    let mut alpha_publisher = WsTestClient::connect(addr, "/sessions/alpha/ws/publisher")
        .await
        .expect("Publisher failed to connect");
    let mut default_publisher = WsTestClient::connect(addr, "/ws/publisher")
        .await
        .expect("Publisher failed to connect");
    assert!(wait_until(|| alpha.connections().current_publisher().is_some(), 2000).await);
    let default = state.sessions.default_session();
    assert!(wait_until(|| default.connections().current_publisher().is_some(), 2000).await);

    let _receiver = WsTestClient::connect(addr, "/sessions/alpha/ws/receiver")
        .await
        .expect("Receiver failed to connect");

    assert_eq!(
        alpha_publisher.recv().await,
        SignalingMessage::ReceiverConnected
    );
    default_publisher.expect_silence(200).await;
}
