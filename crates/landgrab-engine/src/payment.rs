use std::collections::HashSet;

use landgrab_cards::{ActionKind, Card, CardId, Color};
use landgrab_protocol::{ActionResponse, GameEvent, PaymentSelection, PlayerId};

use crate::error::EngineError;
use crate::pending::PendingAction;
use crate::state::MatchState;

impl MatchState {
    /// Settles one responder's share of a payment demand.
    ///
    /// The selection is resolved to card ids and priced before anything
    /// moves, so a rejected offering leaves every zone untouched.
    pub fn pay(&mut self, actor: PlayerId, selection: &PaymentSelection) -> Result<(), EngineError> {
        self.require_playing()?;
        self.player(actor)?;
        let pending = self.pending.as_ref().ok_or(EngineError::NoPendingAction)?;
        if !pending.kind().is_payment() || !pending.awaits(actor) {
            return Err(EngineError::NotAwaitingResponse);
        }
        let owed = pending.amount().unwrap_or(0);
        let recipient = pending.initiator();

        let payer = self.player(actor)?;
        let mut seen: HashSet<CardId> = HashSet::new();
        let mut offered = 0u32;
        let mut bank_ids: Vec<CardId> = Vec::with_capacity(selection.bank_indices.len());
        for &index in &selection.bank_indices {
            let card = index
                .checked_sub(1)
                .and_then(|i| payer.bank.get(i))
                .ok_or(EngineError::InvalidCard)?;
            if !seen.insert(card.id) {
                return Err(EngineError::InvalidCard);
            }
            offered += card.value;
            bank_ids.push(card.id);
        }
        let mut property_ids: Vec<(Color, CardId)> = Vec::with_capacity(selection.property_data.len());
        for pick in &selection.property_data {
            let holding = payer
                .holdings
                .get(&pick.color)
                .ok_or(EngineError::InvalidCard)?;
            let card = pick
                .index
                .checked_sub(1)
                .and_then(|i| holding.cards.get(i))
                .ok_or(EngineError::InvalidCard)?;
            if !seen.insert(card.id) {
                return Err(EngineError::InvalidCard);
            }
            offered += card.value;
            property_ids.push((pick.color, card.id));
        }

        // A payer who can cover the debt must cover it; one who cannot
        // pays what they have, which may be nothing only when they own
        // nothing at all.
        let liquid = payer.liquid_value();
        if liquid >= owed && offered < owed {
            return Err(EngineError::InsufficientOffering);
        }
        if liquid > 0 && liquid < owed && selection.is_empty() {
            return Err(EngineError::InsufficientOffering);
        }

        let mut moved_bank: Vec<Card> = Vec::new();
        let mut moved_props: Vec<(Color, Card)> = Vec::new();
        {
            let payer = self.player_mut(actor)?;
            for id in bank_ids {
                if let Some(pos) = payer.bank.iter().position(|c| c.id == id) {
                    moved_bank.push(payer.bank.remove(pos));
                }
            }
            for (color, id) in property_ids {
                if let Some(holding) = payer.holdings.get_mut(&color) {
                    if let Some(pos) = holding.position_of(id) {
                        moved_props.push((color, holding.cards.remove(pos)));
                    }
                    holding.recheck_improvements(color);
                    if holding.cards.is_empty() {
                        payer.holdings.remove(&color);
                    }
                }
            }
        }
        {
            let recipient = self.player_mut(recipient)?;
            for card in moved_bank {
                recipient.bank.push(card);
            }
            for (source, card) in moved_props {
                // A color-pair wildcard arrives unplaced; the new owner
                // chooses its holding before doing anything else.
                if card.is_wildcard() && !card.is_universal_wildcard() && !card.is_locked() {
                    recipient.pending_wildcards.push(card);
                } else {
                    let dest = card.placement_color(source);
                    recipient.holdings.entry(dest).or_default().cards.push(card);
                }
            }
        }

        let from = self.name_of(actor);
        let to = self.name_of(recipient);
        self.push_event(GameEvent::PaymentMade {
            from,
            to,
            amount: offered,
        });

        let done = match self.pending.as_mut() {
            Some(pending) => {
                pending.remaining_mut().retain(|&id| id != actor);
                pending.remaining().is_empty()
            }
            None => false,
        };
        if done {
            self.finish_pending();
        }
        Ok(())
    }

    /// Handles a responder's block or acceptance of the pending action.
    pub fn respond(
        &mut self,
        actor: PlayerId,
        response: ActionResponse,
        card_index: Option<usize>,
    ) -> Result<(), EngineError> {
        self.require_playing()?;
        self.player(actor)?;
        let pending = self.pending.as_ref().ok_or(EngineError::NoPendingAction)?;
        if !pending.awaits(actor) {
            return Err(EngineError::NotAwaitingResponse);
        }
        match response {
            ActionResponse::JustSayNo => self.block_with_just_say_no(actor, card_index),
            ActionResponse::Accept => {
                // Payment demands resolve through `pay`, never here.
                if pending.kind().is_payment() {
                    return Err(EngineError::NotAwaitingResponse);
                }
                self.accept_steal(actor)
            }
        }
    }

    /// Cancels the actor's own obligation by discarding a Just Say No.
    /// Works against payment and steal demands alike; no counter-counter.
    fn block_with_just_say_no(
        &mut self,
        actor: PlayerId,
        card_index: Option<usize>,
    ) -> Result<(), EngineError> {
        let index = card_index.ok_or(EngineError::InvalidCard)?;
        let player = self.player(actor)?;
        let card = player.hand_card(index).ok_or(EngineError::InvalidCard)?;
        if card.action_kind() != Some(ActionKind::JustSayNo) {
            return Err(EngineError::InvalidCard);
        }
        let id = card.id;

        let player = self.player_mut(actor)?;
        let card = player.take_hand_card(id).ok_or(EngineError::InvalidCard)?;
        let name = player.name.clone();
        self.discard.push(card);
        self.push_event(GameEvent::ActionBlocked { player: name });

        let done = match self.pending.as_mut() {
            Some(pending) => {
                pending.remaining_mut().retain(|&id| id != actor);
                pending.remaining().is_empty()
            }
            None => false,
        };
        if done {
            self.finish_pending();
        }
        Ok(())
    }

    fn accept_steal(&mut self, actor: PlayerId) -> Result<(), EngineError> {
        let pending = self.pending.clone().ok_or(EngineError::NoPendingAction)?;
        match pending {
            PendingAction::SlyDeal {
                initiator,
                target,
                color,
                stolen,
                ..
            } => {
                debug_assert_eq!(actor, target);
                self.transfer_stolen_card(target, initiator, color, stolen);
            }
            PendingAction::ForcedDeal {
                initiator,
                target,
                take_color,
                give_color,
                ..
            } => {
                debug_assert_eq!(actor, target);
                self.swap_holding_cards(initiator, target, take_color, give_color);
            }
            PendingAction::DealBreaker {
                initiator,
                target,
                color,
                ..
            } => {
                debug_assert_eq!(actor, target);
                self.transfer_holding(target, initiator, color);
            }
            _ => return Err(EngineError::NotAwaitingResponse),
        }
        if let Some(pending) = self.pending.as_mut() {
            pending.remaining_mut().clear();
        }
        self.finish_pending();
        Ok(())
    }

    fn transfer_stolen_card(&mut self, from: PlayerId, to: PlayerId, color: Color, id: CardId) {
        let mut moved: Option<Card> = None;
        if let Some(victim) = self.seats.get_mut(&from) {
            if let Some(holding) = victim.holdings.get_mut(&color) {
                if let Some(pos) = holding.position_of(id) {
                    moved = Some(holding.cards.remove(pos));
                }
                holding.recheck_improvements(color);
                if holding.cards.is_empty() {
                    victim.holdings.remove(&color);
                }
            }
        }
        if let Some(card) = moved {
            self.deposit_card(to, card, color);
        }
    }

    /// Swaps the top card of each named holding. Both sides must still
    /// have cards when the target accepts, else nothing moves.
    fn swap_holding_cards(
        &mut self,
        initiator: PlayerId,
        target: PlayerId,
        take_color: Color,
        give_color: Color,
    ) {
        let theirs_live = self
            .seats
            .get(&target)
            .and_then(|p| p.holdings.get(&take_color))
            .is_some_and(|h| !h.cards.is_empty());
        let mine_live = self
            .seats
            .get(&initiator)
            .and_then(|p| p.holdings.get(&give_color))
            .is_some_and(|h| !h.cards.is_empty());
        if !theirs_live || !mine_live {
            return;
        }
        let taken = self.pop_top_card(target, take_color);
        let given = self.pop_top_card(initiator, give_color);
        if let Some(card) = taken {
            self.deposit_card(initiator, card, take_color);
        }
        if let Some(card) = given {
            self.deposit_card(target, card, give_color);
        }
    }

    fn transfer_holding(&mut self, from: PlayerId, to: PlayerId, color: Color) {
        let seized = self
            .seats
            .get_mut(&from)
            .and_then(|victim| victim.holdings.remove(&color));
        if let Some(holding) = seized {
            if let Some(taker) = self.seats.get_mut(&to) {
                let entry = taker.holdings.entry(color).or_default();
                entry.cards.extend(holding.cards);
                // Improvements travel with the set.
                entry.house = holding.house;
                entry.hotel = holding.hotel;
            }
        }
    }

    fn pop_top_card(&mut self, owner: PlayerId, color: Color) -> Option<Card> {
        let player = self.seats.get_mut(&owner)?;
        let holding = player.holdings.get_mut(&color)?;
        let card = holding.cards.pop();
        holding.recheck_improvements(color);
        if holding.cards.is_empty() {
            player.holdings.remove(&color);
        }
        card
    }

    fn deposit_card(&mut self, owner: PlayerId, card: Card, source: Color) {
        if let Some(player) = self.seats.get_mut(&owner) {
            let dest = card.placement_color(source);
            player.holdings.entry(dest).or_default().cards.push(card);
        }
    }
}
