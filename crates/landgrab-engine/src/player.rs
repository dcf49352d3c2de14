use std::collections::BTreeMap;

use landgrab_cards::{Card, CardId, Color};
use landgrab_protocol::PlayerId;

/// How a seat participates in the match.
///
/// Display seats render the shared table on a big screen: they hold no
/// cards, never take a turn, and are skipped by every targeting rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeatRole {
    Interactive,
    Display,
}

/// Cards of one color on a player's table, plus its improvements.
#[derive(Debug, Clone, Default)]
pub struct Holding {
    pub cards: Vec<Card>,
    pub house: bool,
    pub hotel: bool,
}

impl Holding {
    pub fn is_complete(&self, color: Color) -> bool {
        self.cards.len() >= color.set_size()
    }

    /// Drops improvements once the holding shrinks below a full set.
    pub fn recheck_improvements(&mut self, color: Color) {
        if !self.is_complete(color) {
            self.house = false;
            self.hotel = false;
        }
    }

    pub fn value(&self) -> u32 {
        self.cards.iter().map(|c| c.value).sum()
    }

    pub fn position_of(&self, id: CardId) -> Option<usize> {
        self.cards.iter().position(|c| c.id == id)
    }
}

/// One seat at the table and everything it owns.
#[derive(Debug, Clone)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub role: SeatRole,
    pub is_host: bool,
    pub ready: bool,
    pub hand: Vec<Card>,
    pub bank: Vec<Card>,
    pub holdings: BTreeMap<Color, Holding>,
    /// Wildcards received in a payment that still need a color choice.
    pub pending_wildcards: Vec<Card>,
}

impl Player {
    pub(crate) fn new(id: PlayerId, name: String, role: SeatRole, is_host: bool) -> Self {
        Self {
            id,
            name,
            role,
            is_host,
            // Display seats never block a start vote.
            ready: role == SeatRole::Display,
            hand: Vec::new(),
            bank: Vec::new(),
            holdings: BTreeMap::new(),
            pending_wildcards: Vec::new(),
        }
    }

    pub fn is_interactive(&self) -> bool {
        self.role == SeatRole::Interactive
    }

    pub fn bank_value(&self) -> u32 {
        self.bank.iter().map(|c| c.value).sum()
    }

    /// Everything this player could put toward a debt.
    pub fn liquid_value(&self) -> u32 {
        self.bank_value() + self.holdings.values().map(Holding::value).sum::<u32>()
    }

    pub fn complete_sets(&self) -> usize {
        self.holdings
            .iter()
            .filter(|(color, holding)| holding.is_complete(**color))
            .count()
    }

    /// Looks up a hand card by its 1-based wire index.
    pub(crate) fn hand_card(&self, index: usize) -> Option<&Card> {
        index.checked_sub(1).and_then(|i| self.hand.get(i))
    }

    pub(crate) fn take_hand_card(&mut self, id: CardId) -> Option<Card> {
        let pos = self.hand.iter().position(|c| c.id == id)?;
        Some(self.hand.remove(pos))
    }

    pub(crate) fn clear_zones(&mut self) {
        self.hand.clear();
        self.bank.clear();
        self.holdings.clear();
        self.pending_wildcards.clear();
    }
}
