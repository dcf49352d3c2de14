//! Card types and the fixed deck for the Landgrab rules engine.
//!
//! Everything here is plain data: the ten property colors with their set
//! sizes and rent tables, the five card kinds, and the 108-card catalog
//! the deck is built from. Each physical card gets a stable [`CardId`] at
//! deck construction; all cross-zone transfers elsewhere in the engine
//! resolve player-supplied positions to these ids before mutating
//! anything.

mod catalog;
pub mod deck;

pub use deck::{DECK_SIZE, build_deck, rent_for, shuffle};

use serde::{Deserialize, Serialize};

/// Stable identity of one physical card within a match.
///
/// Assigned sequentially by [`build_deck`] and never reused until a match
/// reset rebuilds the deck.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct CardId(u32);

impl CardId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "c-{}", self.0)
    }
}

/// A property color, including the railroad and utility groups.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Color {
    Brown,
    LightBlue,
    Pink,
    Orange,
    Red,
    Yellow,
    Green,
    DarkBlue,
    Railroad,
    Utility,
}

impl Color {
    pub const ALL: [Color; 10] = [
        Color::Brown,
        Color::LightBlue,
        Color::Pink,
        Color::Orange,
        Color::Red,
        Color::Yellow,
        Color::Green,
        Color::DarkBlue,
        Color::Railroad,
        Color::Utility,
    ];

    /// Number of cards required to complete a set of this color.
    pub fn set_size(&self) -> usize {
        match self {
            Color::Brown | Color::DarkBlue | Color::Utility => 2,
            Color::Railroad => 4,
            _ => 3,
        }
    }

    /// Rent table indexed by owned-card count (1-based, clamped to the
    /// set size).
    pub fn rent_table(&self) -> &'static [u32] {
        match self {
            Color::Brown => &[1, 2],
            Color::LightBlue => &[1, 2, 3],
            Color::Pink => &[1, 2, 4],
            Color::Orange => &[1, 3, 5],
            Color::Red => &[2, 3, 6],
            Color::Yellow => &[2, 4, 6],
            Color::Green => &[2, 4, 7],
            Color::DarkBlue => &[3, 8],
            Color::Railroad => &[1, 2, 3, 4],
            Color::Utility => &[1, 2],
        }
    }

    /// Whether a House/Hotel can be built on a complete set of this color.
    pub fn improvable(&self) -> bool {
        !matches!(self, Color::Railroad | Color::Utility)
    }

    /// Wire token for this color, e.g. `DARK_BLUE`.
    pub fn label(&self) -> &'static str {
        match self {
            Color::Brown => "BROWN",
            Color::LightBlue => "LIGHT_BLUE",
            Color::Pink => "PINK",
            Color::Orange => "ORANGE",
            Color::Red => "RED",
            Color::Yellow => "YELLOW",
            Color::Green => "GREEN",
            Color::DarkBlue => "DARK_BLUE",
            Color::Railroad => "RAILROAD",
            Color::Utility => "UTILITY",
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Which colors a wildcard may stand in for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WildAffinity {
    /// Usable as either of two specific colors.
    Pair(Color, Color),
    /// Usable as any color.
    Any,
}

impl WildAffinity {
    pub fn permits(&self, color: Color) -> bool {
        match self {
            WildAffinity::Pair(a, b) => color == *a || color == *b,
            WildAffinity::Any => true,
        }
    }

    /// Default color when a pair wildcard is played without an explicit
    /// choice. `None` for the universal wildcard, which always needs one.
    pub fn default_color(&self) -> Option<Color> {
        match self {
            WildAffinity::Pair(a, _) => Some(*a),
            WildAffinity::Any => None,
        }
    }
}

impl Serialize for WildAffinity {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            WildAffinity::Pair(a, b) => [a.label(), b.label()].serialize(serializer),
            WildAffinity::Any => ["ALL"].serialize(serializer),
        }
    }
}

/// Which colors a rent card can charge for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RentScope {
    Pair(Color, Color),
    Any,
}

impl RentScope {
    pub fn permits(&self, color: Color) -> bool {
        match self {
            RentScope::Pair(a, b) => color == *a || color == *b,
            RentScope::Any => true,
        }
    }

    /// Universal rent cards target one chosen player instead of everyone.
    pub fn is_universal(&self) -> bool {
        matches!(self, RentScope::Any)
    }
}

impl Serialize for RentScope {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            RentScope::Pair(a, b) => [a.label(), b.label()].serialize(serializer),
            RentScope::Any => ["ALL"].serialize(serializer),
        }
    }
}

/// The specific effect of an action card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionKind {
    PassGo,
    Birthday,
    DebtCollector,
    SlyDeal,
    ForcedDeal,
    DealBreaker,
    JustSayNo,
    House,
    Hotel,
    DoubleRent,
}

impl ActionKind {
    /// Printed card title.
    pub fn title(&self) -> &'static str {
        match self {
            ActionKind::PassGo => "Pass Go",
            ActionKind::Birthday => "It's My Birthday",
            ActionKind::DebtCollector => "Debt Collector",
            ActionKind::SlyDeal => "Sly Deal",
            ActionKind::ForcedDeal => "Forced Deal",
            ActionKind::DealBreaker => "Deal Breaker",
            ActionKind::JustSayNo => "Just Say No",
            ActionKind::House => "House",
            ActionKind::Hotel => "Hotel",
            ActionKind::DoubleRent => "Double The Rent",
        }
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

/// Kind-specific card data. Serialized flattened into [`Card`] under a
/// `type` tag, matching the original wire shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CardKind {
    Property {
        name: &'static str,
        color: Color,
    },
    Wildcard {
        affinity: WildAffinity,
        /// Color the wildcard currently stands in for, once on the board.
        assigned: Option<Color>,
        /// Locked wildcards can never be relocated again.
        locked: bool,
    },
    Money,
    Rent {
        scope: RentScope,
    },
    Action {
        action: ActionKind,
    },
}

/// One physical card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Card {
    pub id: CardId,
    /// Monetary value when banked or offered in payment.
    pub value: u32,
    #[serde(flatten)]
    pub kind: CardKind,
}

impl Card {
    /// Property and wildcard cards can sit in a holding.
    pub fn is_property_like(&self) -> bool {
        matches!(
            self.kind,
            CardKind::Property { .. } | CardKind::Wildcard { .. }
        )
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self.kind, CardKind::Wildcard { .. })
    }

    pub fn action_kind(&self) -> Option<ActionKind> {
        match self.kind {
            CardKind::Action { action } => Some(action),
            _ => None,
        }
    }

    pub fn rent_scope(&self) -> Option<RentScope> {
        match self.kind {
            CardKind::Rent { scope } => Some(scope),
            _ => None,
        }
    }

    pub fn affinity(&self) -> Option<WildAffinity> {
        match self.kind {
            CardKind::Wildcard { affinity, .. } => Some(affinity),
            _ => None,
        }
    }

    pub fn assigned_color(&self) -> Option<Color> {
        match self.kind {
            CardKind::Wildcard { assigned, .. } => assigned,
            _ => None,
        }
    }

    pub fn is_locked(&self) -> bool {
        matches!(self.kind, CardKind::Wildcard { locked: true, .. })
    }

    /// Whether the wildcard is fixed to the universal affinity.
    pub fn is_universal_wildcard(&self) -> bool {
        matches!(
            self.kind,
            CardKind::Wildcard {
                affinity: WildAffinity::Any,
                ..
            }
        )
    }

    /// Color a property-like card lands on when transferred into a
    /// holding: a property's printed color, or a wildcard's assigned
    /// color, falling back to the holding it came from.
    pub fn placement_color(&self, fallback: Color) -> Color {
        match self.kind {
            CardKind::Property { color, .. } => color,
            CardKind::Wildcard { assigned, .. } => assigned.unwrap_or(fallback),
            _ => fallback,
        }
    }

    /// Points a wildcard at a color. No-op for other kinds.
    pub fn assign_color(&mut self, color: Color) {
        if let CardKind::Wildcard { assigned, .. } = &mut self.kind {
            *assigned = Some(color);
        }
    }

    /// Permanently locks a wildcard in place. No-op for other kinds.
    pub fn lock(&mut self) {
        if let CardKind::Wildcard { locked, .. } = &mut self.kind {
            *locked = true;
        }
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            CardKind::Property { name, .. } => f.write_str(name),
            CardKind::Wildcard { .. } => write!(f, "Wildcard ({}M)", self.value),
            CardKind::Money => write!(f, "{}M", self.value),
            CardKind::Rent { scope } => match scope {
                RentScope::Any => f.write_str("Rent (any color)"),
                RentScope::Pair(a, b) => write!(f, "Rent ({a}/{b})"),
            },
            CardKind::Action { action } => f.write_str(action.title()),
        }
    }
}
