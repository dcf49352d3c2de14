use rand::Rng;

use landgrab_cards::{Card, CardId, CardKind, Color};
use landgrab_protocol::{GameEvent, LastPlay, PlayKind, PlayedAs, PlayerId, TargetData};

use crate::error::EngineError;
use crate::state::{HAND_LIMIT, MatchState, PLAY_BUDGET};

impl MatchState {
    /// Plays one hand card (1-based index) as money, property, or action.
    ///
    /// Checks run in a fixed order so the reported error is stable:
    /// pending action, turn, unplaced wildcards, play budget, then the
    /// card itself.
    pub fn play_card(
        &mut self,
        actor: PlayerId,
        card_index: usize,
        play: PlayKind,
        target: Option<TargetData>,
    ) -> Result<(), EngineError> {
        self.require_playing()?;
        self.player(actor)?;
        if self.pending.is_some() {
            return Err(EngineError::PendingActionInProgress);
        }
        if self.current_player_id() != Some(actor) {
            return Err(EngineError::NotYourTurn);
        }
        let player = self.player(actor)?;
        if !player.pending_wildcards.is_empty() {
            return Err(EngineError::MustPlaceWildcardsFirst);
        }
        if self.plays_this_turn >= PLAY_BUDGET {
            return Err(EngineError::PlayBudgetExceeded);
        }
        let card = player.hand_card(card_index).ok_or(EngineError::InvalidCard)?;
        // Snapshot before any mutation so the table can show what was
        // played even after the card changes zones.
        let snapshot = card.clone();
        let target = target.unwrap_or_default();

        let played_as = match play {
            PlayKind::Bank => {
                self.bank_card(actor, snapshot.id)?;
                PlayedAs::Bank
            }
            PlayKind::Property => {
                self.table_card(actor, snapshot.id, target.color)?;
                PlayedAs::Property
            }
            PlayKind::Action => {
                self.resolve_action(actor, snapshot.id, target)?;
                PlayedAs::Action
            }
        };

        self.plays_this_turn += 1;
        self.last_play = Some(LastPlay {
            card: snapshot,
            by: actor,
            played_as,
        });
        self.check_win(actor);
        Ok(())
    }

    fn bank_card(&mut self, actor: PlayerId, id: CardId) -> Result<(), EngineError> {
        let player = self.player_mut(actor)?;
        let pos = player
            .hand
            .iter()
            .position(|c| c.id == id)
            .ok_or(EngineError::InvalidCard)?;
        // Zero-value cards (the universal wildcard) cannot be banked.
        if player.hand[pos].value == 0 {
            return Err(EngineError::InvalidCard);
        }
        let card = player.hand.remove(pos);
        let name = player.name.clone();
        let amount = card.value;
        player.bank.push(card);
        self.push_event(GameEvent::MoneyBanked {
            player: name,
            amount,
        });
        Ok(())
    }

    fn table_card(
        &mut self,
        actor: PlayerId,
        id: CardId,
        color_choice: Option<Color>,
    ) -> Result<(), EngineError> {
        let player = self.player(actor)?;
        let card = player
            .hand
            .iter()
            .find(|c| c.id == id)
            .ok_or(EngineError::InvalidCard)?;
        let color = match &card.kind {
            CardKind::Property { color, .. } => *color,
            CardKind::Wildcard { affinity, .. } => {
                let color = color_choice
                    .or_else(|| affinity.default_color())
                    .ok_or(EngineError::InvalidColor)?;
                if !affinity.permits(color) {
                    return Err(EngineError::InvalidColor);
                }
                color
            }
            _ => return Err(EngineError::InvalidCard),
        };

        let player = self.player_mut(actor)?;
        let mut card = player.take_hand_card(id).ok_or(EngineError::InvalidCard)?;
        card.assign_color(color);
        player.holdings.entry(color).or_default().cards.push(card);
        let name = player.name.clone();
        self.push_event(GameEvent::PropertyPlayed {
            player: name,
            color,
        });
        Ok(())
    }

    /// Ends the turn: trims the hand to the limit, hands play to the next
    /// interactive seat, and deals their draw.
    pub fn end_turn(&mut self, actor: PlayerId) -> Result<(), EngineError> {
        self.require_playing()?;
        self.player(actor)?;
        if self.pending.is_some() {
            return Err(EngineError::PendingActionInProgress);
        }
        if self.current_player_id() != Some(actor) {
            return Err(EngineError::NotYourTurn);
        }
        if !self.player(actor)?.pending_wildcards.is_empty() {
            return Err(EngineError::MustPlaceWildcardsFirst);
        }

        let mut discarded: Vec<Card> = Vec::new();
        {
            let Some(player) = self.seats.get_mut(&actor) else {
                return Err(EngineError::UnknownPlayer);
            };
            while player.hand.len() > HAND_LIMIT {
                let idx = self.rng.random_range(0..player.hand.len());
                discarded.push(player.hand.remove(idx));
            }
        }
        let name = self.name_of(actor);
        for card in discarded {
            self.push_event(GameEvent::CardDiscarded {
                player: name.clone(),
                card: card.to_string(),
            });
            self.last_play = Some(LastPlay {
                card: card.clone(),
                by: actor,
                played_as: PlayedAs::Discarded,
            });
            self.discard.push(card);
        }

        self.advance_turn();
        self.plays_this_turn = 0;

        let next = match self.current_player_id() {
            Some(id) => id,
            None => return Ok(()),
        };
        let count = if self.player(next)?.hand.is_empty() { 5 } else { 2 };
        self.draw_cards(next, count);
        let next_name = self.name_of(next);
        self.push_event(GameEvent::CardsDrawn {
            player: next_name.clone(),
            count,
        });
        self.push_event(GameEvent::TurnStarted { player: next_name });
        self.recycle_discard();
        Ok(())
    }
}
