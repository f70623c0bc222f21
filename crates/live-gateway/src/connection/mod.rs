//! Connection management
//!
//! One [`Connection`] per socket, tracked by the [`ConnectionManager`]; each owns a
//! bounded outbound queue drained by the socket's send task.

mod connection;
mod manager;
mod session;

pub use connection::Connection;
pub use manager::ConnectionManager;
pub use session::SessionState;
