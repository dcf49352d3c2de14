//! Projected match state.
//!
//! Two projections exist: the public view every connection receives
//! (hands and banks reduced to counts and totals — holdings are open
//! information) and the private view a seated player additionally gets
//! for their own zones.

use std::collections::BTreeMap;

use landgrab_cards::{Card, Color};
use serde::{Deserialize, Serialize};

use crate::{GameEvent, PlayerId};

/// Match lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lifecycle {
    Lobby,
    Playing,
    Gameover,
}

impl std::fmt::Display for Lifecycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Lifecycle::Lobby => "lobby",
            Lifecycle::Playing => "playing",
            Lifecycle::Gameover => "gameover",
        })
    }
}

/// What everyone can see.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicView {
    pub state: Lifecycle,
    /// Seats in creation order.
    pub players: Vec<SeatPublic>,
    /// Shuffled turn order; empty in the lobby.
    pub turn_order: Vec<PlayerId>,
    pub current_player: Option<PlayerId>,
    pub cards_played: u8,
    pub deck_count: usize,
    pub pending_action: Option<PendingSummary>,
    pub winner: Option<PlayerId>,
    /// Most recent events, oldest first, capped at 20.
    pub history: Vec<GameEvent>,
    pub last_play: Option<LastPlay>,
}

/// Public face of one seat.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatPublic {
    pub id: PlayerId,
    pub name: String,
    pub ready: bool,
    pub is_host: bool,
    /// Non-interactive display seat (shared screen).
    pub display: bool,
    pub hand_count: usize,
    pub bank_value: u32,
    pub properties: BTreeMap<Color, HoldingView>,
    pub complete_sets: usize,
}

/// One color's holding, cards included — properties on the table are
/// public.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldingView {
    pub cards: Vec<Card>,
    pub house: bool,
    pub hotel: bool,
    pub complete: bool,
}

/// Summary of the in-flight pending action.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingSummary {
    pub kind: PendingKind,
    pub initiator: PlayerId,
    /// Payment demands only.
    pub amount: Option<u32>,
    pub remaining: Vec<PlayerId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PendingKind {
    Birthday,
    DebtCollector,
    Rent,
    SlyDeal,
    ForcedDeal,
    DealBreaker,
}

impl PendingKind {
    /// Payment demands are settled with `pay`; steal demands with
    /// `respond`.
    pub fn is_payment(&self) -> bool {
        matches!(
            self,
            PendingKind::Birthday | PendingKind::DebtCollector | PendingKind::Rent
        )
    }
}

/// The most recent card to leave a hand, and how.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LastPlay {
    pub card: Card,
    pub by: PlayerId,
    pub played_as: PlayedAs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayedAs {
    Bank,
    Property,
    Action,
    Discarded,
}

/// What one seated player additionally sees about themselves.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrivateView {
    pub hand: Vec<Card>,
    pub bank: Vec<Card>,
    pub properties: BTreeMap<Color, HoldingView>,
    /// Wildcards received through payment, awaiting a color.
    pub pending_wildcards: Vec<Card>,
    pub is_current: bool,
    /// Current player, budget left, nothing pending.
    pub can_play: bool,
    pub needs_payment: bool,
    pub payment_amount: Option<u32>,
    pub needs_steal_response: bool,
    pub steal_action: Option<PendingKind>,
}
