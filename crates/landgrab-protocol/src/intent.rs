//! Client-to-server intents.
//!
//! The intent set is closed: anything that fails to parse into
//! [`ClientIntent`] is dropped by the server after logging. Positions
//! follow the original client's conventions — hand, bank, and holding
//! positions are 1-based, the pending-wildcard queue index is 0-based.

use landgrab_cards::Color;
use serde::{Deserialize, Serialize};

use crate::{PlayerId, RoomCode};

/// Every message a client can send.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ClientIntent {
    /// Open a new room and take its first seat (the host).
    Create {
        name: String,
        #[serde(default)]
        display: bool,
    },
    /// Take a seat in an existing lobby.
    Join {
        code: RoomCode,
        name: String,
        #[serde(default)]
        display: bool,
    },
    /// Observe a room without a seat; receives public views only.
    Spectate { code: RoomCode },
    /// Re-bind this connection to an existing seat.
    Resume { token: String },
    /// Toggle the lobby ready flag.
    Ready,
    /// Host only: begin the match.
    Start,
    /// Play the card at a 1-based hand position.
    PlayCard {
        card_index: usize,
        play_type: PlayKind,
        #[serde(default)]
        target_data: Option<TargetData>,
    },
    /// Settle a payment demand with the selected cards.
    Pay { payment: PaymentSelection },
    /// Answer a pending action: block it or accept a steal.
    Respond {
        response: ActionResponse,
        /// Hand position of the Just Say No card when blocking.
        #[serde(default)]
        card_index: Option<usize>,
    },
    /// Assign a color to the queued wildcard at a 0-based queue index.
    PlaceWild { index: usize, color: Color },
    /// Relocate an unlocked wildcard between two own holdings.
    MoveWild {
        from_color: Color,
        card_index: usize,
        to_color: Color,
    },
    EndTurn,
    /// Return a finished (or abandoned) match to the lobby.
    PlayAgain,
}

/// How a hand card is being played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayKind {
    Bank,
    Property,
    Action,
}

/// Optional action-play parameters; which fields matter depends on the
/// card being played.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TargetData {
    /// Color choice for property/wildcard plays, rent, House/Hotel.
    pub color: Option<Color>,
    /// Chosen opponent for targeted demands.
    pub target_id: Option<PlayerId>,
    /// 1-based position inside the target's holding (Sly Deal).
    pub card_index: Option<usize>,
    /// Target-side holding for Forced Deal.
    pub their_color: Option<Color>,
    /// Own-side holding for Forced Deal.
    pub your_color: Option<Color>,
    /// 1-based hand position of a Double The Rent card to consume.
    pub double_rent_index: Option<usize>,
}

/// Cards offered to settle a payment demand.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PaymentSelection {
    /// 1-based positions into the payer's bank.
    pub bank_indices: Vec<usize>,
    /// Property cards by holding color and 1-based position.
    pub property_data: Vec<PropertySelection>,
}

impl PaymentSelection {
    pub fn is_empty(&self) -> bool {
        self.bank_indices.is_empty() && self.property_data.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertySelection {
    pub color: Color,
    pub index: usize,
}

/// The two ways to answer a pending action short of paying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionResponse {
    JustSayNo,
    Accept,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_play_card_intent_parses_original_wire_shape() {
        let raw = r#"{
            "type": "playCard",
            "cardIndex": 3,
            "playType": "action",
            "targetData": { "color": "DARK_BLUE", "targetId": 2 }
        }"#;
        let intent: ClientIntent = serde_json::from_str(raw).unwrap();
        match intent {
            ClientIntent::PlayCard {
                card_index,
                play_type,
                target_data: Some(target),
            } => {
                assert_eq!(card_index, 3);
                assert_eq!(play_type, PlayKind::Action);
                assert_eq!(target.color, Some(Color::DarkBlue));
                assert_eq!(target.target_id, Some(PlayerId::new(2)));
                assert_eq!(target.card_index, None);
            }
            other => panic!("unexpected intent: {other:?}"),
        }
    }

    #[test]
    fn test_pay_intent_parses_selection() {
        let raw = r#"{
            "type": "pay",
            "payment": {
                "bankIndices": [1, 2],
                "propertyData": [{ "color": "BROWN", "index": 1 }]
            }
        }"#;
        let intent: ClientIntent = serde_json::from_str(raw).unwrap();
        let ClientIntent::Pay { payment } = intent else {
            panic!("expected pay");
        };
        assert_eq!(payment.bank_indices, vec![1, 2]);
        assert_eq!(payment.property_data.len(), 1);
        assert!(!payment.is_empty());
    }

    #[test]
    fn test_respond_intent_accepts_missing_card_index() {
        let raw = r#"{ "type": "respond", "response": "ACCEPT" }"#;
        let intent: ClientIntent = serde_json::from_str(raw).unwrap();
        assert_eq!(
            intent,
            ClientIntent::Respond {
                response: ActionResponse::Accept,
                card_index: None,
            }
        );
    }

    #[test]
    fn test_simple_intents_are_bare_tags() {
        let end: ClientIntent = serde_json::from_str(r#"{"type":"endTurn"}"#).unwrap();
        assert_eq!(end, ClientIntent::EndTurn);
        let again: ClientIntent =
            serde_json::from_str(r#"{"type":"playAgain"}"#).unwrap();
        assert_eq!(again, ClientIntent::PlayAgain);
    }

    #[test]
    fn test_unknown_intent_type_is_rejected() {
        let result =
            serde_json::from_str::<ClientIntent>(r#"{"type":"cheat"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_move_wild_round_trips() {
        let intent = ClientIntent::MoveWild {
            from_color: Color::Red,
            card_index: 2,
            to_color: Color::Yellow,
        };
        let json = serde_json::to_string(&intent).unwrap();
        assert!(json.contains("\"fromColor\":\"RED\""), "{json}");
        let back: ClientIntent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, intent);
    }
}
