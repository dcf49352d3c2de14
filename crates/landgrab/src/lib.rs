//! Landgrab: an authoritative WebSocket server for a property-trading
//! card game.
//!
//! The shell owns the TCP accept loop and one handler task per
//! connection; each room runs as its own actor and owns its match.
//! Wire traffic is JSON text frames,
//! [`ClientIntent`](landgrab_protocol::ClientIntent) in and
//! [`ServerFrame`](landgrab_protocol::ServerFrame) out.

mod error;
mod handler;
mod server;
mod session;

pub use error::ServerError;
pub use server::{LandgrabServer, LandgrabServerBuilder};
