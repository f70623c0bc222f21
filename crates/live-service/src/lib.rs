//! # live-service
//!
//! Application layer: the gift economy engine, leveling use cases, the gift catalog,
//! live status and the process-local ledger used when no database is configured.

pub mod dto;
pub mod memory;
pub mod services;

#[cfg(test)]
mod testing;

pub use memory::{MemoryLedger, RecordingPublisher};
pub use services::{
    AccountService, Caller, EconomyService, GiftService, GiftTransfer, LevelTierService,
    ProgressService, ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult,
    StreamService,
};
