//! Room events

mod room_event;

pub use room_event::RoomEvent;
