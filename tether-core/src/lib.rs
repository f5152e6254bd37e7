pub mod codec;
pub mod model;

pub use codec::{DecodeError, decode, decode_description, encode};
pub use model::*;
