use tether_core::Role;
use tether_server::ConnectionRegistry;

use crate::integration::init_tracing;
use crate::utils::TestParty;

#[test]
fn test_for_each_receiver_visits_snapshot() {
    init_tracing();
    let registry = ConnectionRegistry::new();
    let first = TestParty::receiver();
    let second = TestParty::receiver();

    let a = registry.attach_receiver(first.connection.clone());
    let b = registry.attach_receiver(second.connection.clone());

    let mut seen = Vec::new();
    registry.for_each_receiver(|id, connection| {
        assert_eq!(connection.role(), Role::Receiver);
        seen.push(id);
    });

    seen.sort_by_key(|id| id.0);
    let mut expected = vec![a, b];
    expected.sort_by_key(|id| id.0);
    assert_eq!(seen, expected);
}
