mod connection;
mod connection_registry;
mod session_registry;

pub use connection::*;
pub use connection_registry::*;
pub use session_registry::*;
