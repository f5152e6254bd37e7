use tether_server::{Origin, Session};

use crate::integration::init_tracing;
use crate::utils::TestParty;
use super::browser_candidate;

#[test]
fn test_candidates_flow_both_ways() {
    init_tracing();
    let session = Session::new("candidates".into());
    let mut publisher = TestParty::publisher();
    let mut receiver = TestParty::receiver();

    session.connections().attach_publisher(publisher.connection.clone());
    let receiver_id = session.connections().attach_receiver(receiver.connection.clone());
    publisher.drain();

    let raw = browser_candidate();
    session
        .router()
        .dispatch(Origin::Receiver(receiver_id), &raw)
        .unwrap();
    assert_eq!(publisher.next_frame(), Some(raw.clone()));

    session
        .router()
        .dispatch(Origin::Publisher(publisher.connection.id()), &raw)
        .unwrap();
    assert_eq!(receiver.next_frame(), Some(raw));
}
