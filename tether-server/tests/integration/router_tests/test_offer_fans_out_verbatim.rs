use tether_server::{Origin, Session};

use crate::integration::init_tracing;
use crate::utils::TestParty;
use super::offer;

#[test]
fn test_offer_fans_out_verbatim() {
    init_tracing();
    let session = Session::new("fanout".into());
    let mut publisher = TestParty::publisher();
    let mut receivers: Vec<TestParty> = (0..3).map(|_| TestParty::receiver()).collect();

    session.connections().attach_publisher(publisher.connection.clone());
    for receiver in &receivers {
        session.connections().attach_receiver(receiver.connection.clone());
    }
    publisher.drain();

    // Unknown fields survive the trip untouched.
    let raw = r#"{"type":"offer","sdp":"o1","x-trace":"abc"}"#;
    let delivery = session
        .router()
        .dispatch(Origin::Publisher(publisher.connection.id()), raw)
        .unwrap();

    assert_eq!(delivery.delivered, 3);
    for receiver in &mut receivers {
        assert_eq!(receiver.next_frame().as_deref(), Some(raw));
        assert_eq!(receiver.next_frame(), None);
    }
    assert_eq!(publisher.next_frame(), None);
}
