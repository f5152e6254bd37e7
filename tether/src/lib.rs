pub use tether_core::{Role, SessionId, SignalingMessage};

pub mod model {
    pub use tether_core::*;
}

#[cfg(feature = "server")]
pub mod server {
    pub use tether_server::*;
}

#[cfg(feature = "publisher")]
pub mod publisher {
    pub use tether_publisher::*;
}
