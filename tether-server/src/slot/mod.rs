mod session_slot;

pub use session_slot::*;
