//! Unified error type for the server shell.

use landgrab_room::RoomError;

/// Top-level error for server setup and connection handling.
///
/// The `#[from]` conversions let handler code use `?` on listener,
/// WebSocket, and room failures alike.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Binding or accepting on the TCP listener failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The WebSocket handshake or stream failed.
    #[error(transparent)]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    /// The connection's room went away mid-session.
    #[error(transparent)]
    Room(#[from] RoomError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use landgrab_protocol::RoomCode;

    #[test]
    fn test_from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::AddrInUse, "taken");
        let err: ServerError = io.into();
        assert!(matches!(err, ServerError::Io(_)));
        assert!(err.to_string().contains("taken"));
    }

    #[test]
    fn test_from_room_error() {
        let err: ServerError = RoomError::NotFound(RoomCode::new("AB2X")).into();
        assert!(matches!(err, ServerError::Room(_)));
        assert!(err.to_string().contains("AB2X"));
    }
}
