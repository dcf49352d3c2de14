//! Authoritative match engine for Landgrab.
//!
//! [`MatchState`] owns every card zone of one match and applies the whole
//! rule set: seating and lifecycle, the three-play turn, action
//! resolution with its pending-response sub-protocol, payment
//! settlement, wildcard placement, and win detection. Mutating methods
//! validate before they touch anything, so a returned [`EngineError`]
//! always means the match is exactly as it was.
//!
//! Nothing here suspends or blocks. The room layer serializes intents
//! per match and calls straight in; views come back out through
//! [`MatchState::public_view`] and [`MatchState::private_view`].

mod action;
mod error;
mod payment;
mod pending;
mod player;
mod state;
mod turn;
mod view;
mod wild;

pub use error::EngineError;
pub use pending::PendingAction;
pub use player::{Holding, Player, SeatRole};
pub use state::{HAND_LIMIT, MAX_SEATS, MatchState, PLAY_BUDGET, SETS_TO_WIN};
