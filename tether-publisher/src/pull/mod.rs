mod poll_policy;
mod pull_publisher;
mod slot_client;

pub use poll_policy::*;
pub use pull_publisher::*;
pub use slot_client::*;
