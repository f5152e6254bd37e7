use tether_core::{Role, SignalingMessage};
use tether_server::{Delivery, Origin, Session};

use crate::integration::init_tracing;
use crate::utils::TestParty;
use super::offer;

#[test]
fn test_failed_receiver_does_not_block_fan_out() {
    init_tracing();
    let session = Session::new("failure".into());
    let mut publisher = TestParty::publisher();
    let mut healthy = TestParty::receiver();

    session.connections().attach_publisher(publisher.connection.clone());
    session
        .connections()
        .attach_receiver(TestParty::closed(Role::Receiver));
    session.connections().attach_receiver(healthy.connection.clone());
    publisher.drain();

    let delivery = session
        .router()
        .dispatch(Origin::Publisher(publisher.connection.id()), &offer("o1"))
        .unwrap();

    assert_eq!(
        delivery,
        Delivery {
            delivered: 1,
            failed: 1
        }
    );
    assert_eq!(
        healthy.next_message(),
        Some(SignalingMessage::Offer { sdp: "o1".into() })
    );
    assert_eq!(session.connections().receiver_count(), 1);
    assert_eq!(
        publisher.drain(),
        vec![SignalingMessage::ReceiverDisconnected]
    );
}
