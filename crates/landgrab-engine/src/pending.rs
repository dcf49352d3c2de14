use landgrab_cards::{Card, CardId, Color};
use landgrab_protocol::{PendingKind, PendingSummary, PlayerId};

/// An action waiting on responses from other players.
///
/// At most one exists per match. The card that triggered it lives inside
/// until the last responder resolves, then moves to the discard pile, so
/// no card is ever in two zones or in none.
#[derive(Debug, Clone)]
pub enum PendingAction {
    Birthday {
        initiator: PlayerId,
        card: Card,
        amount: u32,
        remaining: Vec<PlayerId>,
    },
    DebtCollector {
        initiator: PlayerId,
        card: Card,
        amount: u32,
        remaining: Vec<PlayerId>,
    },
    Rent {
        initiator: PlayerId,
        card: Card,
        color: Color,
        amount: u32,
        remaining: Vec<PlayerId>,
    },
    SlyDeal {
        initiator: PlayerId,
        card: Card,
        target: PlayerId,
        color: Color,
        /// Chosen when the action was played, not when it resolves.
        stolen: CardId,
        remaining: Vec<PlayerId>,
    },
    ForcedDeal {
        initiator: PlayerId,
        card: Card,
        target: PlayerId,
        take_color: Color,
        give_color: Color,
        remaining: Vec<PlayerId>,
    },
    DealBreaker {
        initiator: PlayerId,
        card: Card,
        target: PlayerId,
        color: Color,
        remaining: Vec<PlayerId>,
    },
}

impl PendingAction {
    pub fn kind(&self) -> PendingKind {
        match self {
            Self::Birthday { .. } => PendingKind::Birthday,
            Self::DebtCollector { .. } => PendingKind::DebtCollector,
            Self::Rent { .. } => PendingKind::Rent,
            Self::SlyDeal { .. } => PendingKind::SlyDeal,
            Self::ForcedDeal { .. } => PendingKind::ForcedDeal,
            Self::DealBreaker { .. } => PendingKind::DealBreaker,
        }
    }

    pub fn initiator(&self) -> PlayerId {
        match self {
            Self::Birthday { initiator, .. }
            | Self::DebtCollector { initiator, .. }
            | Self::Rent { initiator, .. }
            | Self::SlyDeal { initiator, .. }
            | Self::ForcedDeal { initiator, .. }
            | Self::DealBreaker { initiator, .. } => *initiator,
        }
    }

    /// How much each responder owes, for the payment family.
    pub fn amount(&self) -> Option<u32> {
        match self {
            Self::Birthday { amount, .. }
            | Self::DebtCollector { amount, .. }
            | Self::Rent { amount, .. } => Some(*amount),
            _ => None,
        }
    }

    pub fn remaining(&self) -> &[PlayerId] {
        match self {
            Self::Birthday { remaining, .. }
            | Self::DebtCollector { remaining, .. }
            | Self::Rent { remaining, .. }
            | Self::SlyDeal { remaining, .. }
            | Self::ForcedDeal { remaining, .. }
            | Self::DealBreaker { remaining, .. } => remaining,
        }
    }

    pub(crate) fn remaining_mut(&mut self) -> &mut Vec<PlayerId> {
        match self {
            Self::Birthday { remaining, .. }
            | Self::DebtCollector { remaining, .. }
            | Self::Rent { remaining, .. }
            | Self::SlyDeal { remaining, .. }
            | Self::ForcedDeal { remaining, .. }
            | Self::DealBreaker { remaining, .. } => remaining,
        }
    }

    pub fn awaits(&self, player: PlayerId) -> bool {
        self.remaining().contains(&player)
    }

    /// The card that raised this action, still owned by the match.
    pub fn card(&self) -> &Card {
        match self {
            Self::Birthday { card, .. }
            | Self::DebtCollector { card, .. }
            | Self::Rent { card, .. }
            | Self::SlyDeal { card, .. }
            | Self::ForcedDeal { card, .. }
            | Self::DealBreaker { card, .. } => card,
        }
    }

    /// Surrenders the triggering card for the discard pile.
    pub(crate) fn into_card(self) -> Card {
        match self {
            Self::Birthday { card, .. }
            | Self::DebtCollector { card, .. }
            | Self::Rent { card, .. }
            | Self::SlyDeal { card, .. }
            | Self::ForcedDeal { card, .. }
            | Self::DealBreaker { card, .. } => card,
        }
    }

    pub fn summary(&self) -> PendingSummary {
        PendingSummary {
            kind: self.kind(),
            initiator: self.initiator(),
            amount: self.amount(),
            remaining: self.remaining().to_vec(),
        }
    }
}
