//! Room layer for Landgrab.
//!
//! Each room runs as an isolated Tokio task (actor model) owning one
//! match; connections reach it only through commands, so the engine
//! never sees concurrent mutation. The registry resolves join codes
//! and periodically sweeps rooms nobody is connected to.
//!
//! # Key types
//!
//! - [`RoomRegistry`] — opens rooms, resolves codes, evicts idle rooms
//! - [`RoomHandle`] — send commands to a running room actor
//! - [`ConnId`] — one live connection attached to a room
//! - [`RoomsConfig`] — eviction window, sweep cadence, channel size

mod code;
mod config;
mod error;
mod registry;
mod room;

pub use config::RoomsConfig;
pub use error::RoomError;
pub use registry::RoomRegistry;
pub use room::{ConnId, ConnectionSender, RoomHandle, RoomInfo};
