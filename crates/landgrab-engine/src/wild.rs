use landgrab_cards::Color;
use landgrab_protocol::PlayerId;

use crate::error::EngineError;
use crate::state::MatchState;

impl MatchState {
    /// Places a queued wildcard (0-based queue position) onto one of the
    /// actor's holdings and locks it there for good. Allowed at any time
    /// while the match runs, including during someone else's turn.
    pub fn place_wildcard(
        &mut self,
        actor: PlayerId,
        index: usize,
        color: Color,
    ) -> Result<(), EngineError> {
        self.require_playing()?;
        let player = self.player(actor)?;
        let card = player
            .pending_wildcards
            .get(index)
            .ok_or(EngineError::InvalidCard)?;
        let affinity = card.affinity().ok_or(EngineError::InvalidCard)?;
        if !affinity.permits(color) {
            return Err(EngineError::InvalidColor);
        }

        let player = self.player_mut(actor)?;
        let mut card = player.pending_wildcards.remove(index);
        card.assign_color(color);
        card.lock();
        player.holdings.entry(color).or_default().cards.push(card);
        self.check_win(actor);
        Ok(())
    }

    /// Relocates an unlocked wildcard between two of the actor's own
    /// holdings. Own turn only, with no queued wildcards outstanding.
    pub fn move_wildcard(
        &mut self,
        actor: PlayerId,
        from: Color,
        card_index: usize,
        to: Color,
    ) -> Result<(), EngineError> {
        self.require_playing()?;
        self.player(actor)?;
        if self.current_player_id() != Some(actor) {
            return Err(EngineError::NotYourTurn);
        }
        let player = self.player(actor)?;
        if !player.pending_wildcards.is_empty() {
            return Err(EngineError::MustPlaceWildcardsFirst);
        }
        let holding = player.holdings.get(&from).ok_or(EngineError::InvalidColor)?;
        let card = card_index
            .checked_sub(1)
            .and_then(|i| holding.cards.get(i))
            .ok_or(EngineError::InvalidCard)?;
        if !card.is_wildcard() || card.is_locked() {
            return Err(EngineError::InvalidCard);
        }
        let affinity = card.affinity().ok_or(EngineError::InvalidCard)?;
        if !affinity.permits(to) {
            return Err(EngineError::InvalidColor);
        }
        let id = card.id;

        let player = self.player_mut(actor)?;
        let Some(holding) = player.holdings.get_mut(&from) else {
            return Err(EngineError::InvalidColor);
        };
        let Some(pos) = holding.position_of(id) else {
            return Err(EngineError::InvalidCard);
        };
        let mut card = holding.cards.remove(pos);
        holding.recheck_improvements(from);
        if holding.cards.is_empty() {
            player.holdings.remove(&from);
        }
        card.assign_color(to);
        player.holdings.entry(to).or_default().cards.push(card);
        self.check_win(actor);
        Ok(())
    }
}
