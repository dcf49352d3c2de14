//! Wire types shared by the Landgrab engine, room layer, and server.
//!
//! Everything a client sends or receives is defined here:
//! - [`ClientIntent`] — the closed set of player intents
//! - [`ServerFrame`] — server-to-client messages
//! - [`GameEvent`] — structured match history entries
//! - [`PublicView`] / [`PrivateView`] — projected match state
//!
//! The JSON shapes follow the original wire format: intents and frames
//! are internally tagged with `type`, fields are camelCase, and
//! color/kind tokens are SCREAMING_SNAKE_CASE.

mod event;
mod frame;
mod intent;
mod view;

pub use event::{GameEvent, Improvement};
pub use frame::ServerFrame;
pub use intent::{
    ActionResponse, ClientIntent, PaymentSelection, PlayKind,
    PropertySelection, TargetData,
};
pub use view::{
    HoldingView, LastPlay, Lifecycle, PendingKind, PendingSummary,
    PlayedAs, PrivateView, PublicView, SeatPublic,
};

use serde::{Deserialize, Serialize};

/// Unique identifier for a player's seat within a room.
///
/// Allocated by the room when the seat is created; stable across
/// disconnects and reconnects.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PlayerId(u64);

impl PlayerId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "P-{}", self.0)
    }
}

/// A room's join code.
///
/// Normalized to uppercase on construction and deserialization, so
/// lookups are case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct RoomCode(String);

impl RoomCode {
    pub fn new(raw: impl Into<String>) -> Self {
        Self::from(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for RoomCode {
    fn from(raw: String) -> Self {
        Self(raw.trim().to_ascii_uppercase())
    }
}

impl From<RoomCode> for String {
    fn from(code: RoomCode) -> Self {
        code.0
    }
}

impl std::fmt::Display for RoomCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_display_format() {
        assert_eq!(PlayerId::new(42).to_string(), "P-42");
    }

    #[test]
    fn test_room_code_normalizes_case() {
        assert_eq!(RoomCode::new("ab2x").as_str(), "AB2X");
        assert_eq!(RoomCode::new(" kqrz "), RoomCode::new("KQRZ"));
    }

    #[test]
    fn test_room_code_deserializes_normalized() {
        let code: RoomCode = serde_json::from_str("\"wxyz\"").unwrap();
        assert_eq!(code.as_str(), "WXYZ");
    }
}
