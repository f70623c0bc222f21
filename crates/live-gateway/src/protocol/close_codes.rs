//! WebSocket close codes sent by the gateway

use axum::extract::ws::CloseFrame;

/// Gateway close codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum CloseCode {
    /// Unexpected server-side failure
    UnknownError = 4000,
    /// Frame was not valid JSON, had no event name, or carried a bad payload
    DecodeError = 4002,
    /// Binary frames are not part of the protocol
    UnsupportedFrame = 4003,
    /// No traffic for longer than the idle timeout
    SessionTimeout = 4009,
}

impl CloseCode {
    #[must_use]
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            4000 => Some(Self::UnknownError),
            4002 => Some(Self::DecodeError),
            4003 => Some(Self::UnsupportedFrame),
            4009 => Some(Self::SessionTimeout),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_u16(self) -> u16 {
        self as u16
    }

    /// Whether a client should open a new connection after this close
    #[must_use]
    pub const fn should_reconnect(self) -> bool {
        matches!(self, Self::UnknownError | Self::SessionTimeout)
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::UnknownError => "Unknown error occurred",
            Self::DecodeError => "Invalid event frame",
            Self::UnsupportedFrame => "Binary frames are not supported",
            Self::SessionTimeout => "Session timed out",
        }
    }

    /// Close frame to send before dropping the socket
    #[must_use]
    pub fn frame(self) -> CloseFrame<'static> {
        CloseFrame {
            code: self.as_u16(),
            reason: self.description().into(),
        }
    }
}

impl std::fmt::Display for CloseCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.description(), self.as_u16())
    }
}

impl From<CloseCode> for u16 {
    fn from(code: CloseCode) -> Self {
        code.as_u16()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_close_code_round_trip() {
        for code in [
            CloseCode::UnknownError,
            CloseCode::DecodeError,
            CloseCode::UnsupportedFrame,
            CloseCode::SessionTimeout,
        ] {
            assert_eq!(CloseCode::from_u16(code.as_u16()), Some(code));
        }
        assert_eq!(CloseCode::from_u16(1000), None);
    }

    #[test]
    fn test_should_reconnect() {
        assert!(CloseCode::SessionTimeout.should_reconnect());
        assert!(!CloseCode::DecodeError.should_reconnect());
    }

    #[test]
    fn test_frame_carries_code_and_reason() {
        let frame = CloseCode::SessionTimeout.frame();
        assert_eq!(frame.code, 4009);
        assert_eq!(frame.reason, "Session timed out");
        assert!(CloseCode::SessionTimeout.to_string().contains("4009"));
    }
}
