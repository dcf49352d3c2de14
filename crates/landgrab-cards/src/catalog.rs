//! The fixed 108-card catalog.
//!
//! Counts per kind: 28 properties, 12 wildcards, 20 money, 13 rent,
//! 35 action cards.

use crate::{ActionKind, Color, RentScope, WildAffinity};

/// (name, color, value)
pub(crate) const PROPERTIES: &[(&str, Color, u32)] = &[
    ("Mediterranean Avenue", Color::Brown, 1),
    ("Baltic Avenue", Color::Brown, 1),
    ("Oriental Avenue", Color::LightBlue, 1),
    ("Vermont Avenue", Color::LightBlue, 1),
    ("Connecticut Avenue", Color::LightBlue, 1),
    ("St. Charles Place", Color::Pink, 2),
    ("States Avenue", Color::Pink, 2),
    ("Virginia Avenue", Color::Pink, 2),
    ("St. James Place", Color::Orange, 2),
    ("Tennessee Avenue", Color::Orange, 2),
    ("New York Avenue", Color::Orange, 2),
    ("Kentucky Avenue", Color::Red, 3),
    ("Indiana Avenue", Color::Red, 3),
    ("Illinois Avenue", Color::Red, 3),
    ("Atlantic Avenue", Color::Yellow, 3),
    ("Ventnor Avenue", Color::Yellow, 3),
    ("Marvin Gardens", Color::Yellow, 3),
    ("Pacific Avenue", Color::Green, 4),
    ("North Carolina Avenue", Color::Green, 4),
    ("Pennsylvania Avenue", Color::Green, 4),
    ("Park Place", Color::DarkBlue, 4),
    ("Boardwalk", Color::DarkBlue, 4),
    ("Reading Railroad", Color::Railroad, 2),
    ("Pennsylvania Railroad", Color::Railroad, 2),
    ("B. & O. Railroad", Color::Railroad, 2),
    ("Short Line", Color::Railroad, 2),
    ("Electric Company", Color::Utility, 2),
    ("Water Works", Color::Utility, 2),
];

/// (affinity, value, copies)
pub(crate) const WILDCARDS: &[(WildAffinity, u32, usize)] = &[
    (WildAffinity::Pair(Color::DarkBlue, Color::Green), 4, 1),
    (WildAffinity::Pair(Color::Green, Color::Railroad), 4, 1),
    (WildAffinity::Pair(Color::LightBlue, Color::Brown), 1, 1),
    (WildAffinity::Pair(Color::LightBlue, Color::Railroad), 4, 1),
    (WildAffinity::Pair(Color::Orange, Color::Pink), 2, 2),
    (WildAffinity::Pair(Color::Railroad, Color::Utility), 2, 2),
    (WildAffinity::Pair(Color::Red, Color::Yellow), 3, 2),
    (WildAffinity::Any, 0, 2),
];

/// (value, copies)
pub(crate) const MONEY: &[(u32, usize)] =
    &[(10, 1), (5, 2), (4, 3), (3, 3), (2, 5), (1, 6)];

/// (scope, value, copies)
pub(crate) const RENTS: &[(RentScope, u32, usize)] = &[
    (RentScope::Pair(Color::DarkBlue, Color::Green), 1, 2),
    (RentScope::Pair(Color::Red, Color::Yellow), 1, 2),
    (RentScope::Pair(Color::Pink, Color::Orange), 1, 2),
    (RentScope::Pair(Color::LightBlue, Color::Brown), 1, 2),
    (RentScope::Pair(Color::Railroad, Color::Utility), 1, 2),
    (RentScope::Any, 3, 3),
];

/// (kind, value, copies)
pub(crate) const ACTIONS: &[(ActionKind, u32, usize)] = &[
    (ActionKind::PassGo, 1, 10),
    (ActionKind::Birthday, 2, 3),
    (ActionKind::DebtCollector, 3, 3),
    (ActionKind::SlyDeal, 3, 3),
    (ActionKind::ForcedDeal, 3, 4),
    (ActionKind::DealBreaker, 5, 2),
    (ActionKind::JustSayNo, 4, 3),
    (ActionKind::House, 3, 3),
    (ActionKind::Hotel, 4, 2),
    (ActionKind::DoubleRent, 1, 2),
];
