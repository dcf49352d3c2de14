use landgrab_cards::{ActionKind, CardId, RentScope, deck};
use landgrab_protocol::{GameEvent, Improvement, PlayerId, TargetData};

use crate::error::EngineError;
use crate::pending::PendingAction;
use crate::state::MatchState;

impl MatchState {
    /// Routes an action-kind play to its handler. The card is still in the
    /// actor's hand here; each handler removes it only once its own
    /// validation passes.
    pub(crate) fn resolve_action(
        &mut self,
        actor: PlayerId,
        id: CardId,
        target: TargetData,
    ) -> Result<(), EngineError> {
        let player = self.player(actor)?;
        let card = player
            .hand
            .iter()
            .find(|c| c.id == id)
            .ok_or(EngineError::InvalidCard)?;
        if let Some(scope) = card.rent_scope() {
            return self.charge_rent(actor, id, scope, target);
        }
        match card.action_kind().ok_or(EngineError::InvalidCard)? {
            ActionKind::PassGo => self.pass_go(actor, id),
            ActionKind::Birthday => self.birthday(actor, id),
            ActionKind::DebtCollector => self.debt_collector(actor, id, target),
            ActionKind::SlyDeal => self.sly_deal(actor, id, target),
            ActionKind::ForcedDeal => self.forced_deal(actor, id, target),
            ActionKind::DealBreaker => self.deal_breaker(actor, id, target),
            ActionKind::House => self.build_improvement(actor, id, target, Improvement::House),
            ActionKind::Hotel => self.build_improvement(actor, id, target, Improvement::Hotel),
            // Both only ever ride along with another play.
            ActionKind::JustSayNo | ActionKind::DoubleRent => Err(EngineError::InvalidCard),
        }
    }

    /// A demand may only point at another interactive seat.
    fn validate_mark(&self, actor: PlayerId, mark: PlayerId) -> Result<(), EngineError> {
        if mark == actor {
            return Err(EngineError::InvalidTarget);
        }
        match self.seats.get(&mark) {
            Some(p) if p.is_interactive() => Ok(()),
            _ => Err(EngineError::InvalidTarget),
        }
    }

    fn pass_go(&mut self, actor: PlayerId, id: CardId) -> Result<(), EngineError> {
        let player = self.player_mut(actor)?;
        let card = player.take_hand_card(id).ok_or(EngineError::InvalidCard)?;
        let name = player.name.clone();
        self.discard.push(card);
        self.draw_cards(actor, 2);
        self.push_event(GameEvent::ActionPlayed {
            player: name,
            action: ActionKind::PassGo,
        });
        Ok(())
    }

    fn birthday(&mut self, actor: PlayerId, id: CardId) -> Result<(), EngineError> {
        let remaining = self.interactive_others(actor);
        let player = self.player_mut(actor)?;
        let card = player.take_hand_card(id).ok_or(EngineError::InvalidCard)?;
        let name = player.name.clone();
        self.pending = Some(PendingAction::Birthday {
            initiator: actor,
            card,
            amount: 2,
            remaining,
        });
        self.push_event(GameEvent::ActionPlayed {
            player: name,
            action: ActionKind::Birthday,
        });
        Ok(())
    }

    fn debt_collector(
        &mut self,
        actor: PlayerId,
        id: CardId,
        target: TargetData,
    ) -> Result<(), EngineError> {
        let mark = target.target_id.ok_or(EngineError::InvalidTarget)?;
        self.validate_mark(actor, mark)?;
        let player = self.player_mut(actor)?;
        let card = player.take_hand_card(id).ok_or(EngineError::InvalidCard)?;
        let name = player.name.clone();
        self.pending = Some(PendingAction::DebtCollector {
            initiator: actor,
            card,
            amount: 5,
            remaining: vec![mark],
        });
        self.push_event(GameEvent::ActionPlayed {
            player: name,
            action: ActionKind::DebtCollector,
        });
        Ok(())
    }

    fn charge_rent(
        &mut self,
        actor: PlayerId,
        id: CardId,
        scope: RentScope,
        target: TargetData,
    ) -> Result<(), EngineError> {
        let color = target.color.ok_or(EngineError::InvalidColor)?;
        if !scope.permits(color) {
            return Err(EngineError::InvalidColor);
        }
        let player = self.player(actor)?;
        let holding = player
            .holdings
            .get(&color)
            .filter(|h| !h.cards.is_empty())
            .ok_or(EngineError::InvalidColor)?;
        let mut amount = deck::rent_for(color, holding.cards.len(), holding.house, holding.hotel);

        // Universal rent singles out one player; color-pair rent charges
        // the whole table.
        let remaining = if scope.is_universal() {
            let mark = target.target_id.ok_or(EngineError::InvalidTarget)?;
            self.validate_mark(actor, mark)?;
            vec![mark]
        } else {
            self.interactive_others(actor)
        };

        let double_id = match target.double_rent_index {
            Some(index) => {
                let card = self
                    .player(actor)?
                    .hand_card(index)
                    .ok_or(EngineError::InvalidCard)?;
                if card.id == id || card.action_kind() != Some(ActionKind::DoubleRent) {
                    return Err(EngineError::InvalidCard);
                }
                Some(card.id)
            }
            None => None,
        };

        let player = self.player_mut(actor)?;
        let card = player.take_hand_card(id).ok_or(EngineError::InvalidCard)?;
        let name = player.name.clone();
        if let Some(double_id) = double_id {
            let double = player.take_hand_card(double_id).ok_or(EngineError::InvalidCard)?;
            self.discard.push(double);
            amount *= 2;
            // Doubling spends a second play from the turn budget.
            self.plays_this_turn += 1;
        }
        self.pending = Some(PendingAction::Rent {
            initiator: actor,
            card,
            color,
            amount,
            remaining,
        });
        self.push_event(GameEvent::RentCharged {
            player: name,
            color,
            amount,
        });
        Ok(())
    }

    fn sly_deal(
        &mut self,
        actor: PlayerId,
        id: CardId,
        target: TargetData,
    ) -> Result<(), EngineError> {
        let mark = target.target_id.ok_or(EngineError::InvalidTarget)?;
        let color = target.color.ok_or(EngineError::InvalidColor)?;
        self.validate_mark(actor, mark)?;
        let victim = self.player(mark)?;
        let holding = victim
            .holdings
            .get(&color)
            .filter(|h| !h.cards.is_empty())
            .ok_or(EngineError::InvalidTarget)?;
        // Complete sets are out of reach; that is Deal Breaker territory.
        if holding.is_complete(color) {
            return Err(EngineError::InvalidTarget);
        }
        let index = target.card_index.unwrap_or(1);
        let stolen = index
            .checked_sub(1)
            .and_then(|i| holding.cards.get(i))
            .ok_or(EngineError::InvalidTarget)?
            .id;

        let player = self.player_mut(actor)?;
        let card = player.take_hand_card(id).ok_or(EngineError::InvalidCard)?;
        let name = player.name.clone();
        self.pending = Some(PendingAction::SlyDeal {
            initiator: actor,
            card,
            target: mark,
            color,
            stolen,
            remaining: vec![mark],
        });
        self.push_event(GameEvent::ActionPlayed {
            player: name,
            action: ActionKind::SlyDeal,
        });
        Ok(())
    }

    fn forced_deal(
        &mut self,
        actor: PlayerId,
        id: CardId,
        target: TargetData,
    ) -> Result<(), EngineError> {
        let mark = target.target_id.ok_or(EngineError::InvalidTarget)?;
        let take_color = target.their_color.ok_or(EngineError::InvalidColor)?;
        let give_color = target.your_color.ok_or(EngineError::InvalidColor)?;
        self.validate_mark(actor, mark)?;
        let victim = self.player(mark)?;
        let theirs = victim
            .holdings
            .get(&take_color)
            .filter(|h| !h.cards.is_empty())
            .ok_or(EngineError::InvalidTarget)?;
        if theirs.is_complete(take_color) {
            return Err(EngineError::InvalidTarget);
        }
        let player = self.player(actor)?;
        let mine = player
            .holdings
            .get(&give_color)
            .filter(|h| !h.cards.is_empty())
            .ok_or(EngineError::InvalidColor)?;
        // Trading out of a complete set would break it for free.
        if mine.is_complete(give_color) {
            return Err(EngineError::InvalidTarget);
        }

        let player = self.player_mut(actor)?;
        let card = player.take_hand_card(id).ok_or(EngineError::InvalidCard)?;
        let name = player.name.clone();
        self.pending = Some(PendingAction::ForcedDeal {
            initiator: actor,
            card,
            target: mark,
            take_color,
            give_color,
            remaining: vec![mark],
        });
        self.push_event(GameEvent::ActionPlayed {
            player: name,
            action: ActionKind::ForcedDeal,
        });
        Ok(())
    }

    fn deal_breaker(
        &mut self,
        actor: PlayerId,
        id: CardId,
        target: TargetData,
    ) -> Result<(), EngineError> {
        let mark = target.target_id.ok_or(EngineError::InvalidTarget)?;
        let color = target.color.ok_or(EngineError::InvalidColor)?;
        self.validate_mark(actor, mark)?;
        let victim = self.player(mark)?;
        let holding = victim
            .holdings
            .get(&color)
            .ok_or(EngineError::InvalidTarget)?;
        if !holding.is_complete(color) {
            return Err(EngineError::IncompleteSet);
        }

        let player = self.player_mut(actor)?;
        let card = player.take_hand_card(id).ok_or(EngineError::InvalidCard)?;
        let name = player.name.clone();
        self.pending = Some(PendingAction::DealBreaker {
            initiator: actor,
            card,
            target: mark,
            color,
            remaining: vec![mark],
        });
        self.push_event(GameEvent::ActionPlayed {
            player: name,
            action: ActionKind::DealBreaker,
        });
        Ok(())
    }

    fn build_improvement(
        &mut self,
        actor: PlayerId,
        id: CardId,
        target: TargetData,
        improvement: Improvement,
    ) -> Result<(), EngineError> {
        let color = target.color.ok_or(EngineError::InvalidColor)?;
        let player = self.player(actor)?;
        let holding = player
            .holdings
            .get(&color)
            .ok_or(EngineError::InvalidColor)?;
        if !holding.is_complete(color) {
            return Err(EngineError::IncompleteSet);
        }
        match improvement {
            Improvement::House => {
                if holding.house {
                    return Err(EngineError::AlreadyImproved);
                }
                if !color.improvable() {
                    return Err(EngineError::InvalidColor);
                }
            }
            Improvement::Hotel => {
                // A hotel goes on top of a house.
                if !holding.house {
                    return Err(EngineError::IncompleteSet);
                }
                if holding.hotel {
                    return Err(EngineError::AlreadyImproved);
                }
            }
        }

        let player = self.player_mut(actor)?;
        let card = player.take_hand_card(id).ok_or(EngineError::InvalidCard)?;
        let name = player.name.clone();
        match improvement {
            Improvement::House => {
                if let Some(holding) = player.holdings.get_mut(&color) {
                    holding.house = true;
                }
            }
            Improvement::Hotel => {
                if let Some(holding) = player.holdings.get_mut(&color) {
                    holding.hotel = true;
                }
            }
        }
        self.discard.push(card);
        self.push_event(GameEvent::ImprovementBuilt {
            player: name,
            color,
            improvement,
        });
        Ok(())
    }
}
