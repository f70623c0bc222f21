//! Gateway protocol definitions
//!
//! Frames are JSON text messages of the form `{"event": "<name>", "data": <payload>}`.

mod close_codes;
mod events;

pub use close_codes::CloseCode;
pub use events::{ClientEvent, JoinChat, ServerEvent, ViewerList};
