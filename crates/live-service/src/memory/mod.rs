//! In-process store and publisher implementations

mod ledger;
mod publisher;

pub use ledger::MemoryLedger;
pub use publisher::RecordingPublisher;
