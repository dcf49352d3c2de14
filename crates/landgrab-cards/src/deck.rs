//! Deck construction, shuffling, and rent lookup.

use rand::Rng;

use crate::catalog;
use crate::{Card, CardId, CardKind, Color};

/// Total cards in a freshly built deck.
pub const DECK_SIZE: usize = 108;

/// Instantiates the full catalog into a shuffled deck.
///
/// Ids are assigned sequentially from 0 in catalog order, so within one
/// deck every id is unique. Draws come from the end of the returned
/// vector.
pub fn build_deck(rng: &mut impl Rng) -> Vec<Card> {
    let mut deck = Vec::with_capacity(DECK_SIZE);
    let mut next_id = 0u32;
    let mut alloc = move || {
        let id = CardId::new(next_id);
        next_id += 1;
        id
    };

    for &(name, color, value) in catalog::PROPERTIES {
        deck.push(Card {
            id: alloc(),
            value,
            kind: CardKind::Property { name, color },
        });
    }
    for &(affinity, value, copies) in catalog::WILDCARDS {
        for _ in 0..copies {
            deck.push(Card {
                id: alloc(),
                value,
                kind: CardKind::Wildcard {
                    affinity,
                    assigned: None,
                    locked: false,
                },
            });
        }
    }
    for &(value, copies) in catalog::MONEY {
        for _ in 0..copies {
            deck.push(Card {
                id: alloc(),
                value,
                kind: CardKind::Money,
            });
        }
    }
    for &(scope, value, copies) in catalog::RENTS {
        for _ in 0..copies {
            deck.push(Card {
                id: alloc(),
                value,
                kind: CardKind::Rent { scope },
            });
        }
    }
    for &(action, value, copies) in catalog::ACTIONS {
        for _ in 0..copies {
            deck.push(Card {
                id: alloc(),
                value,
                kind: CardKind::Action { action },
            });
        }
    }

    shuffle(&mut deck, rng);
    deck
}

/// Four independent Fisher–Yates passes.
///
/// One uniform pass is already unbiased; the extra passes are kept from
/// the upstream design as belt-and-braces against a weak RNG, not as a
/// cryptographic guarantee.
pub fn shuffle<T>(cards: &mut [T], rng: &mut impl Rng) {
    for _ in 0..4 {
        for i in (1..cards.len()).rev() {
            let j = rng.random_range(0..=i);
            cards.swap(i, j);
        }
    }
}

/// Rent owed against a holding of `owned` cards of `color`.
///
/// Looks up `table[min(owned, set_size) - 1]`, 0 for an empty holding;
/// a house adds 3 and a hotel adds 4 more.
pub fn rent_for(color: Color, owned: usize, house: bool, hotel: bool) -> u32 {
    if owned == 0 {
        return 0;
    }
    let idx = owned.min(color.set_size()) - 1;
    let mut rent = color.rent_table()[idx];
    if house {
        rent += 3;
    }
    if hotel {
        rent += 4;
    }
    rent
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ActionKind;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    fn deck() -> Vec<Card> {
        build_deck(&mut StdRng::seed_from_u64(7))
    }

    #[test]
    fn test_build_deck_has_full_catalog() {
        let deck = deck();
        assert_eq!(deck.len(), DECK_SIZE);

        let count = |pred: fn(&Card) -> bool| deck.iter().filter(|c| pred(c)).count();
        assert_eq!(
            count(|c| matches!(c.kind, CardKind::Property { .. })),
            28
        );
        assert_eq!(
            count(|c| matches!(c.kind, CardKind::Wildcard { .. })),
            12
        );
        assert_eq!(count(|c| matches!(c.kind, CardKind::Money)), 20);
        assert_eq!(count(|c| matches!(c.kind, CardKind::Rent { .. })), 13);
        assert_eq!(count(|c| matches!(c.kind, CardKind::Action { .. })), 35);
    }

    #[test]
    fn test_build_deck_assigns_unique_ids() {
        let ids: HashSet<_> = deck().iter().map(|c| c.id).collect();
        assert_eq!(ids.len(), DECK_SIZE);
    }

    #[test]
    fn test_build_deck_action_copy_counts() {
        let deck = deck();
        let count = |kind: ActionKind| {
            deck.iter()
                .filter(|c| c.action_kind() == Some(kind))
                .count()
        };
        assert_eq!(count(ActionKind::PassGo), 10);
        assert_eq!(count(ActionKind::ForcedDeal), 4);
        assert_eq!(count(ActionKind::DealBreaker), 2);
        assert_eq!(count(ActionKind::JustSayNo), 3);
        assert_eq!(count(ActionKind::DoubleRent), 2);
    }

    #[test]
    fn test_shuffle_preserves_elements() {
        let mut rng = StdRng::seed_from_u64(99);
        let mut cards: Vec<u32> = (0..50).collect();
        shuffle(&mut cards, &mut rng);
        let mut sorted = cards.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn test_rent_for_dark_blue_base() {
        assert_eq!(rent_for(Color::DarkBlue, 1, false, false), 3);
    }

    #[test]
    fn test_rent_for_dark_blue_improved() {
        assert_eq!(rent_for(Color::DarkBlue, 2, true, true), 15);
    }

    #[test]
    fn test_rent_for_empty_holding_is_zero() {
        assert_eq!(rent_for(Color::Green, 0, false, false), 0);
    }

    #[test]
    fn test_rent_for_clamps_oversized_holdings() {
        // A railroad holding can exceed its set size via wildcards.
        assert_eq!(rent_for(Color::Railroad, 6, false, false), 4);
    }
}
