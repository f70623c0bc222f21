//! Event fan-out to rooms and to the whole platform

mod broadcaster;

pub use broadcaster::RoomBroadcaster;
