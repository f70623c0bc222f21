//! Business logic services
//!
//! Each service borrows the shared [`ServiceContext`] and orchestrates store calls,
//! leveling rules and room announcements for one area of the platform.

pub mod account;
pub mod context;
pub mod economy;
pub mod error;
pub mod gift;
pub mod level_tier;
pub mod progress;
pub mod stream;

pub use account::{AccountService, Caller};
pub use context::{ServiceContext, ServiceContextBuilder};
pub use economy::{EconomyService, GiftTransfer, GIFT_HISTORY_LIMIT};
pub use error::{ServiceError, ServiceResult};
pub use gift::GiftService;
pub use level_tier::LevelTierService;
pub use progress::ProgressService;
pub use stream::StreamService;
