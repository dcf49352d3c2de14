//! Resume tokens: re-binding a new connection to an existing seat.
//!
//! Every `create`/`join` mints a token bound to (room code, seat). A
//! client that loses its socket sends `resume{token}` on a fresh
//! connection and gets its seat back, cards and obligations intact.
//! Tokens die with their room.

use std::collections::HashMap;

use landgrab_protocol::{PlayerId, RoomCode};
use rand::Rng;

/// The seat a resume token re-binds to.
#[derive(Debug, Clone)]
pub(crate) struct SeatRef {
    pub(crate) code: RoomCode,
    pub(crate) player: PlayerId,
}

/// Maps resume tokens to seats across all rooms.
///
/// Not thread-safe by itself; the server wraps it in a mutex.
pub(crate) struct SessionTable {
    tokens: HashMap<String, SeatRef>,
}

impl SessionTable {
    pub(crate) fn new() -> Self {
        Self {
            tokens: HashMap::new(),
        }
    }

    /// Mints a fresh token for a seat and returns it.
    pub(crate) fn mint(&mut self, code: RoomCode, player: PlayerId) -> String {
        let token = loop {
            let candidate = generate_token();
            if !self.tokens.contains_key(&candidate) {
                break candidate;
            }
        };
        self.tokens.insert(token.clone(), SeatRef { code, player });
        token
    }

    /// Looks up the seat a token belongs to.
    pub(crate) fn resolve(&self, token: &str) -> Option<&SeatRef> {
        self.tokens.get(token)
    }

    /// Retires every token minted for a room. Called when the sweeper
    /// evicts it.
    pub(crate) fn purge_room(&mut self, code: &RoomCode) {
        self.tokens.retain(|_, seat| seat.code != *code);
    }
}

/// 128 random bits as lowercase hex. Enough that guessing a live token
/// is not a concern.
fn generate_token() -> String {
    let mut rng = rand::rng();
    let bytes: [u8; 16] = rng.random();
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mint_and_resolve_roundtrip() {
        let mut table = SessionTable::new();
        let code = RoomCode::new("AB2X");
        let token = table.mint(code.clone(), PlayerId::new(1));

        assert_eq!(token.len(), 32);
        let seat = table.resolve(&token).expect("token resolves");
        assert_eq!(seat.code, code);
        assert_eq!(seat.player, PlayerId::new(1));
        assert!(table.resolve("deadbeef").is_none());
    }

    #[test]
    fn test_each_seat_gets_a_distinct_token() {
        let mut table = SessionTable::new();
        let code = RoomCode::new("AB2X");
        let a = table.mint(code.clone(), PlayerId::new(1));
        let b = table.mint(code, PlayerId::new(2));
        assert_ne!(a, b);
    }

    #[test]
    fn test_purge_room_retires_only_its_tokens() {
        let mut table = SessionTable::new();
        let doomed = RoomCode::new("AB2X");
        let kept = RoomCode::new("CD3Y");
        let doomed_token = table.mint(doomed.clone(), PlayerId::new(1));
        let kept_token = table.mint(kept, PlayerId::new(2));

        table.purge_room(&doomed);

        assert!(table.resolve(&doomed_token).is_none());
        assert!(table.resolve(&kept_token).is_some());
    }
}
