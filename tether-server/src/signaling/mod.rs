mod app_state;
mod http_handler;
mod ws_handler;

pub use app_state::*;
pub use http_handler::*;
pub use ws_handler::*;
