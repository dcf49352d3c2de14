//! Room registry: opens rooms, resolves join codes, sweeps idle rooms.

use std::collections::HashMap;

use landgrab_protocol::RoomCode;

use crate::code::random_code;
use crate::room::spawn_room;
use crate::{RoomError, RoomHandle, RoomsConfig};

/// Tracks every open room by join code.
///
/// This is the entry point for room operations from the connection
/// layer. The registry itself holds no locks; the server wraps it in
/// whatever synchronization it needs.
pub struct RoomRegistry {
    rooms: HashMap<RoomCode, RoomHandle>,
    config: RoomsConfig,
}

impl RoomRegistry {
    pub fn new(config: RoomsConfig) -> Self {
        Self {
            rooms: HashMap::new(),
            config,
        }
    }

    /// Opens a room under a fresh join code and returns its handle.
    pub fn create_room(&mut self) -> RoomHandle {
        let code = loop {
            let candidate = random_code();
            if !self.rooms.contains_key(&candidate) {
                break candidate;
            }
        };
        let handle = spawn_room(code.clone(), self.config.seed, self.config.channel_size);
        self.rooms.insert(code.clone(), handle.clone());
        tracing::info!(%code, rooms = self.rooms.len(), "room created");
        handle
    }

    /// Resolves a join code to a handle. Codes are normalized on
    /// construction, so lookups are case-insensitive.
    pub fn lookup(&self, code: &RoomCode) -> Result<RoomHandle, RoomError> {
        self.rooms
            .get(code)
            .cloned()
            .ok_or_else(|| RoomError::NotFound(code.clone()))
    }

    /// Closes rooms that have sat with zero connections for longer
    /// than the eviction window, plus any whose actor stopped
    /// answering. Returns the evicted codes so the caller can retire
    /// their resume tokens.
    pub async fn sweep(&mut self) -> Vec<RoomCode> {
        let mut evicted = Vec::new();
        for (code, handle) in &self.rooms {
            match handle.info().await {
                Ok(info) => {
                    if info.connections == 0 && info.idle >= self.config.evict_after {
                        evicted.push(code.clone());
                    }
                }
                Err(_) => evicted.push(code.clone()),
            }
        }
        for code in &evicted {
            if let Some(handle) = self.rooms.remove(code) {
                handle.shutdown().await;
                tracing::info!(%code, "idle room evicted");
            }
        }
        evicted
    }

    /// Number of open rooms.
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }
}

impl Default for RoomRegistry {
    fn default() -> Self {
        Self::new(RoomsConfig::default())
    }
}
