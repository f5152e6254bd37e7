use tether_core::Role;
use tether_server::ConnectionRegistry;

use crate::integration::init_tracing;
use crate::utils::TestParty;

#[test]
fn test_failed_notification_drops_publisher() {
    init_tracing();
    let registry = ConnectionRegistry::new();
    registry.attach_publisher(TestParty::closed(Role::Publisher));

    let receiver = TestParty::receiver();
    let id = registry.attach_receiver(receiver.connection.clone());

    assert!(registry.current_publisher().is_none());
    assert!(registry.contains_receiver(id));
}
