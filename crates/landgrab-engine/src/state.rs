use std::collections::{BTreeMap, VecDeque};

use rand::SeedableRng;
use rand::rngs::StdRng;

use landgrab_cards::{Card, deck};
use landgrab_protocol::{GameEvent, LastPlay, Lifecycle, PlayerId};

use crate::error::EngineError;
use crate::pending::PendingAction;
use crate::player::{Player, SeatRole};

/// Interactive seats plus at most one display seat.
pub const MAX_SEATS: usize = 5;
/// Cards a player may play per turn.
pub const PLAY_BUDGET: u8 = 3;
/// Hand size enforced at end of turn.
pub const HAND_LIMIT: usize = 7;
/// Complete sets needed to win.
pub const SETS_TO_WIN: usize = 3;

const HISTORY_CAP: usize = 20;

/// Authoritative state of one match.
///
/// All rule checks happen here; the room layer above only routes intents
/// and fans out views. Mutating methods either complete fully or return an
/// [`EngineError`] with the state untouched.
pub struct MatchState {
    pub(crate) seats: BTreeMap<PlayerId, Player>,
    pub(crate) turn_order: Vec<PlayerId>,
    pub(crate) current_index: usize,
    pub(crate) deck: Vec<Card>,
    pub(crate) discard: Vec<Card>,
    pub(crate) plays_this_turn: u8,
    pub(crate) pending: Option<PendingAction>,
    pub(crate) history: VecDeque<GameEvent>,
    pub(crate) lifecycle: Lifecycle,
    pub(crate) winner: Option<PlayerId>,
    pub(crate) last_play: Option<LastPlay>,
    next_seat: u64,
    pub(crate) rng: StdRng,
}

impl MatchState {
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_os_rng())
    }

    /// Deterministic match for tests and replays.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            seats: BTreeMap::new(),
            turn_order: Vec::new(),
            current_index: 0,
            deck: Vec::new(),
            discard: Vec::new(),
            plays_this_turn: 0,
            pending: None,
            history: VecDeque::new(),
            lifecycle: Lifecycle::Lobby,
            winner: None,
            last_play: None,
            next_seat: 1,
            rng,
        }
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    pub fn seat_count(&self) -> usize {
        self.seats.len()
    }

    pub fn contains(&self, id: PlayerId) -> bool {
        self.seats.contains_key(&id)
    }

    pub fn seat(&self, id: PlayerId) -> Option<&Player> {
        self.seats.get(&id)
    }

    /// Seats a new player. The first seat becomes host.
    pub fn add_seat(&mut self, name: String, role: SeatRole) -> Result<PlayerId, EngineError> {
        self.require_lobby()?;
        if self.seats.len() >= MAX_SEATS {
            return Err(EngineError::MatchFull);
        }
        if role == SeatRole::Display && self.seats.values().any(|p| !p.is_interactive()) {
            return Err(EngineError::DisplaySeatTaken);
        }
        let id = PlayerId::new(self.next_seat);
        self.next_seat += 1;
        let is_host = self.seats.is_empty();
        self.seats.insert(id, Player::new(id, name, role, is_host));
        Ok(id)
    }

    pub fn toggle_ready(&mut self, actor: PlayerId) -> Result<(), EngineError> {
        self.require_lobby()?;
        let player = self.player_mut(actor)?;
        player.ready = !player.ready;
        Ok(())
    }

    /// Deals a fresh game. Host only, lobby only, and every interactive
    /// seat must be ready.
    pub fn start(&mut self, actor: PlayerId) -> Result<(), EngineError> {
        self.require_lobby()?;
        if !self.player(actor)?.is_host {
            return Err(EngineError::NotHost);
        }
        let interactive: Vec<PlayerId> = self
            .seats
            .values()
            .filter(|p| p.is_interactive())
            .map(|p| p.id)
            .collect();
        if interactive.len() < 2 || interactive.iter().any(|id| !self.seats[id].ready) {
            return Err(EngineError::NotEnoughPlayers);
        }

        self.deck = deck::build_deck(&mut self.rng);
        self.discard.clear();
        self.pending = None;
        self.winner = None;
        self.history.clear();
        self.last_play = None;
        self.plays_this_turn = 0;
        for player in self.seats.values_mut() {
            player.clear_zones();
        }

        // Interactive seats take turns in shuffled order. A display seat
        // rides along at the end so targeting can skip it uniformly.
        let mut order = interactive.clone();
        deck::shuffle(&mut order, &mut self.rng);
        order.extend(self.seats.values().filter(|p| !p.is_interactive()).map(|p| p.id));
        self.turn_order = order;
        self.current_index = 0;

        for &id in &interactive {
            self.draw_cards(id, 5);
        }
        let first = self.turn_order[0];
        self.draw_cards(first, 2);

        self.lifecycle = Lifecycle::Playing;
        self.push_event(GameEvent::GameStarted {
            players: interactive.len(),
        });
        let first_name = self.name_of(first);
        self.push_event(GameEvent::TurnStarted { player: first_name });
        Ok(())
    }

    /// Returns the table to the lobby, dropping every card zone.
    pub fn reset(&mut self, actor: PlayerId) -> Result<(), EngineError> {
        self.player(actor)?;
        if self.lifecycle == Lifecycle::Lobby {
            return Ok(());
        }
        self.lifecycle = Lifecycle::Lobby;
        self.deck.clear();
        self.discard.clear();
        self.turn_order.clear();
        self.current_index = 0;
        self.plays_this_turn = 0;
        self.pending = None;
        self.winner = None;
        self.history.clear();
        self.last_play = None;
        for player in self.seats.values_mut() {
            player.clear_zones();
            player.ready = !player.is_interactive();
        }
        Ok(())
    }

    pub fn current_player_id(&self) -> Option<PlayerId> {
        self.turn_order.get(self.current_index).copied()
    }

    pub(crate) fn player(&self, id: PlayerId) -> Result<&Player, EngineError> {
        self.seats.get(&id).ok_or(EngineError::UnknownPlayer)
    }

    pub(crate) fn player_mut(&mut self, id: PlayerId) -> Result<&mut Player, EngineError> {
        self.seats.get_mut(&id).ok_or(EngineError::UnknownPlayer)
    }

    pub(crate) fn name_of(&self, id: PlayerId) -> String {
        self.seats
            .get(&id)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| id.to_string())
    }

    /// Interactive seats other than `of`, in turn order.
    pub(crate) fn interactive_others(&self, of: PlayerId) -> Vec<PlayerId> {
        self.turn_order
            .iter()
            .copied()
            .filter(|&id| id != of && self.seats.get(&id).is_some_and(Player::is_interactive))
            .collect()
    }

    pub(crate) fn require_playing(&self) -> Result<(), EngineError> {
        match self.lifecycle {
            Lifecycle::Playing => Ok(()),
            Lifecycle::Lobby => Err(EngineError::NotStarted),
            Lifecycle::Gameover => Err(EngineError::MatchOver),
        }
    }

    fn require_lobby(&self) -> Result<(), EngineError> {
        match self.lifecycle {
            Lifecycle::Lobby => Ok(()),
            Lifecycle::Playing => Err(EngineError::AlreadyStarted),
            Lifecycle::Gameover => Err(EngineError::MatchOver),
        }
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        if self.history.len() == HISTORY_CAP {
            self.history.pop_front();
        }
        self.history.push_back(event);
    }

    /// Draws up to `count` cards; stops quietly when the deck runs dry.
    pub(crate) fn draw_cards(&mut self, id: PlayerId, count: usize) -> usize {
        let Some(player) = self.seats.get_mut(&id) else {
            return 0;
        };
        let mut drawn = 0;
        for _ in 0..count {
            match self.deck.pop() {
                Some(card) => {
                    player.hand.push(card);
                    drawn += 1;
                }
                None => break,
            }
        }
        drawn
    }

    /// Moves the spent discard pile back under the deck once it empties.
    pub(crate) fn recycle_discard(&mut self) {
        if self.deck.is_empty() && !self.discard.is_empty() {
            self.deck.append(&mut self.discard);
            deck::shuffle(&mut self.deck, &mut self.rng);
        }
    }

    pub(crate) fn advance_turn(&mut self) {
        if self.turn_order.is_empty() {
            return;
        }
        // Skip the display seat; at least two interactive seats exist.
        loop {
            self.current_index = (self.current_index + 1) % self.turn_order.len();
            let id = self.turn_order[self.current_index];
            if self.seats.get(&id).is_some_and(Player::is_interactive) {
                break;
            }
        }
    }

    /// Ends the match if `id` now owns enough complete sets.
    pub(crate) fn check_win(&mut self, id: PlayerId) {
        if self.lifecycle != Lifecycle::Playing {
            return;
        }
        let won = self
            .seats
            .get(&id)
            .is_some_and(|p| p.complete_sets() >= SETS_TO_WIN);
        if won {
            self.lifecycle = Lifecycle::Gameover;
            self.winner = Some(id);
        }
    }

    /// Retires the resolved action's card and credits the initiator with
    /// any sets it gained along the way.
    pub(crate) fn finish_pending(&mut self) {
        if let Some(pending) = self.pending.take() {
            let initiator = pending.initiator();
            self.discard.push(pending.into_card());
            self.check_win(initiator);
        }
    }
}

impl Default for MatchState {
    fn default() -> Self {
        Self::new()
    }
}
