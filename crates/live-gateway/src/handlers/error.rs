//! Handler error types

use crate::protocol::CloseCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    /// The session already reached `Disconnected`
    #[error("Connection closed")]
    ConnectionClosed,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl HandlerError {
    /// Close code to end the socket with, `None` when it should just stop quietly
    pub fn to_close_code(&self) -> Option<CloseCode> {
        match self {
            Self::InvalidPayload(_) => Some(CloseCode::DecodeError),
            Self::ConnectionClosed => None,
            Self::Internal(_) => Some(CloseCode::UnknownError),
        }
    }
}

impl From<serde_json::Error> for HandlerError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidPayload(err.to_string())
    }
}

pub type HandlerResult<T> = Result<T, HandlerError>;
