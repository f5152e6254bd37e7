use tether_server::ConnectionRegistry;

use crate::integration::init_tracing;
use crate::utils::TestParty;

#[test]
fn test_superseded_publisher_detach_is_noop() {
    init_tracing();
    let registry = ConnectionRegistry::new();
    let old = TestParty::publisher();
    let new = TestParty::publisher();

    registry.attach_publisher(old.connection.clone());
    registry.attach_publisher(new.connection.clone());

    assert!(!registry.detach_publisher(old.connection.id()));
    assert_eq!(
        registry.current_publisher().map(|p| p.id()),
        Some(new.connection.id())
    );

    assert!(registry.detach_publisher(new.connection.id()));
    assert!(registry.current_publisher().is_none());
}
