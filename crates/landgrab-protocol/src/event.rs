//! Structured match-history events.
//!
//! The engine records what happened as typed events; turning them into
//! display strings is a presentation concern, handled by the `Display`
//! impl here (and free for clients to replace with their own rendering).

use landgrab_cards::{ActionKind, Color};
use serde::{Deserialize, Serialize};

/// One entry in the bounded match history.
///
/// Player references carry the seat's display name: names are fixed for
/// a room's lifetime and the history is read far more often than it is
/// written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE", rename_all_fields = "camelCase")]
pub enum GameEvent {
    GameStarted { players: usize },
    TurnStarted { player: String },
    CardsDrawn { player: String, count: usize },
    PropertyPlayed { player: String, color: Color },
    MoneyBanked { player: String, amount: u32 },
    RentCharged { player: String, color: Color, amount: u32 },
    PaymentMade { from: String, to: String, amount: u32 },
    ActionPlayed { player: String, action: ActionKind },
    ImprovementBuilt {
        player: String,
        color: Color,
        improvement: Improvement,
    },
    ActionBlocked { player: String },
    CardDiscarded { player: String, card: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Improvement {
    House,
    Hotel,
}

impl std::fmt::Display for Improvement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Improvement::House => "house",
            Improvement::Hotel => "hotel",
        })
    }
}

impl std::fmt::Display for GameEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameEvent::GameStarted { players } => {
                write!(f, "Game started with {players} players")
            }
            GameEvent::TurnStarted { player } => write!(f, "{player}'s turn"),
            GameEvent::CardsDrawn { player, count } => {
                write!(f, "{player} drew {count} cards")
            }
            GameEvent::PropertyPlayed { player, color } => {
                write!(f, "{player} played {color} property")
            }
            GameEvent::MoneyBanked { player, amount } => {
                write!(f, "{player} banked ${amount}M")
            }
            GameEvent::RentCharged { player, color, amount } => {
                write!(f, "{player} charged ${amount}M rent on {color}")
            }
            GameEvent::PaymentMade { from, to, amount } => {
                write!(f, "{from} paid {to} ${amount}M")
            }
            GameEvent::ActionPlayed { player, action } => {
                write!(f, "{player}: {action}")
            }
            GameEvent::ImprovementBuilt {
                player,
                color,
                improvement,
            } => write!(f, "{player} built a {improvement} on {color}"),
            GameEvent::ActionBlocked { player } => {
                write!(f, "{player}: Just Say No!")
            }
            GameEvent::CardDiscarded { player, card } => {
                write!(f, "{player} discarded {card}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serializes_with_kind_tag() {
        let event = GameEvent::RentCharged {
            player: "Alice".into(),
            color: Color::DarkBlue,
            amount: 8,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["kind"], "RENT_CHARGED");
        assert_eq!(json["color"], "DARK_BLUE");
        assert_eq!(json["amount"], 8);
    }

    #[test]
    fn test_event_display_renders_history_line() {
        let event = GameEvent::PaymentMade {
            from: "Bob".into(),
            to: "Alice".into(),
            amount: 5,
        };
        assert_eq!(event.to_string(), "Bob paid Alice $5M");

        let blocked = GameEvent::ActionBlocked { player: "Cara".into() };
        assert_eq!(blocked.to_string(), "Cara: Just Say No!");
    }
}
