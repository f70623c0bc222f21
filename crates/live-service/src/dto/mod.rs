//! Data transfer objects for API requests and responses

pub mod requests;
pub mod responses;

pub use requests::{
    AddSpectatorPointsRequest, AddStreamHoursRequest, AddStreamerPointsRequest, CreateGiftRequest,
    CreateLevelRequest, PurchaseCoinsRequest, SendGiftRequest, StartStreamRequest,
    UpdateLevelRequest,
};

pub use responses::{
    AccountResponse, BalanceResponse, GiftTransferResponse, HealthResponse, LiveStreamerResponse,
    ProgressResponse, PurchaseResponse, ReadinessResponse, StreamHoursResponse,
    StreamStartedResponse, StreamStoppedResponse,
};
