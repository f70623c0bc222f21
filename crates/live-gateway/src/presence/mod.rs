//! Viewer presence per stream room

mod registry;

pub use registry::{JoinOutcome, PresenceEntry, PresenceRegistry};
