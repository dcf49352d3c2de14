//! Error types for the room layer.

use landgrab_engine::EngineError;
use landgrab_protocol::RoomCode;

/// Errors from room and registry operations.
#[derive(Debug, thiserror::Error)]
pub enum RoomError {
    /// No room is open under this code.
    #[error("room {0} not found")]
    NotFound(RoomCode),

    /// The room's command channel is closed or the actor is gone.
    #[error("room {0} is unavailable")]
    Unavailable(RoomCode),

    /// A resume named a seat this room never dealt.
    #[error("no such seat in room {0}")]
    UnknownSeat(RoomCode),

    /// The match itself refused the request.
    #[error("{0}")]
    Rejected(#[from] EngineError),
}
