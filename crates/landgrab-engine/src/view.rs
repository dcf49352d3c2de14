use std::collections::BTreeMap;

use landgrab_cards::Color;
use landgrab_protocol::{HoldingView, Lifecycle, PlayerId, PrivateView, PublicView, SeatPublic};

use crate::player::Player;
use crate::state::{MatchState, PLAY_BUDGET};

fn holding_views(player: &Player) -> BTreeMap<Color, HoldingView> {
    player
        .holdings
        .iter()
        .map(|(&color, holding)| {
            (
                color,
                HoldingView {
                    cards: holding.cards.clone(),
                    house: holding.house,
                    hotel: holding.hotel,
                    complete: holding.is_complete(color),
                },
            )
        })
        .collect()
}

impl MatchState {
    /// The spectator-safe projection: holdings are public, hands and
    /// banks appear only as counts and totals.
    pub fn public_view(&self) -> PublicView {
        PublicView {
            state: self.lifecycle,
            players: self
                .seats
                .values()
                .map(|p| SeatPublic {
                    id: p.id,
                    name: p.name.clone(),
                    ready: p.ready,
                    is_host: p.is_host,
                    display: !p.is_interactive(),
                    hand_count: p.hand.len(),
                    bank_value: p.bank_value(),
                    properties: holding_views(p),
                    complete_sets: p.complete_sets(),
                })
                .collect(),
            turn_order: self.turn_order.clone(),
            current_player: self.current_player_id(),
            cards_played: self.plays_this_turn,
            deck_count: self.deck.len(),
            pending_action: self.pending.as_ref().map(|p| p.summary()),
            winner: self.winner,
            history: self.history.iter().cloned().collect(),
            last_play: self.last_play.clone(),
        }
    }

    /// One seat's own cards plus the prompts derived for it. `None` for
    /// ids that never held a seat, which is how spectators come out.
    pub fn private_view(&self, id: PlayerId) -> Option<PrivateView> {
        let player = self.seats.get(&id)?;
        let is_current = self.current_player_id() == Some(id);
        let (needs_payment, payment_amount, needs_steal_response, steal_action) =
            match self.pending.as_ref() {
                Some(pending) if pending.awaits(id) => {
                    let kind = pending.kind();
                    if kind.is_payment() {
                        (true, pending.amount(), false, None)
                    } else {
                        (false, None, true, Some(kind))
                    }
                }
                _ => (false, None, false, None),
            };
        Some(PrivateView {
            hand: player.hand.clone(),
            bank: player.bank.clone(),
            properties: holding_views(player),
            pending_wildcards: player.pending_wildcards.clone(),
            is_current,
            can_play: self.lifecycle == Lifecycle::Playing
                && is_current
                && self.pending.is_none()
                && self.plays_this_turn < PLAY_BUDGET,
            needs_payment,
            payment_amount,
            needs_steal_response,
            steal_action,
        })
    }
}
