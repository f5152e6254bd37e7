mod coordinator;
mod engine;
mod error;
mod media;
mod pull;

pub use coordinator::*;
pub use engine::*;
pub use error::*;
pub use media::*;
pub use pull::*;
