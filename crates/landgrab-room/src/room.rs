//! Room actor: an isolated Tokio task that owns one match outright.
//!
//! Connections reach a room only through its mpsc command channel, and
//! the actor processes commands to completion in arrival order. That
//! sequencing is the single-writer discipline the engine relies on.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use landgrab_engine::{MatchState, SeatRole};
use landgrab_protocol::{ClientIntent, Lifecycle, PlayerId, RoomCode, ServerFrame};
use tokio::sync::{mpsc, oneshot};

use crate::RoomError;

/// Counter behind [`ConnId`] allocation. Process-wide, so ids never
/// collide across rooms.
static NEXT_CONN_ID: AtomicU64 = AtomicU64::new(1);

/// One live WebSocket connection attached to a room.
///
/// Seats are stable across reconnects; connections are not. A detach
/// removes the connection and leaves the seat (cards, obligations,
/// turn position) untouched for a later resume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnId(u64);

impl ConnId {
    fn next() -> Self {
        Self(NEXT_CONN_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ConnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "C-{}", self.0)
    }
}

/// Channel sender that feeds a connection's writer task.
pub type ConnectionSender = mpsc::UnboundedSender<ServerFrame>;

/// What a connection may do inside the room.
#[derive(Debug, Clone, Copy)]
enum Binding {
    /// Controls a seat and receives that seat's private view.
    Seat(PlayerId),
    /// Watches only; receives public views.
    Spectator,
}

struct Attachment {
    sender: ConnectionSender,
    binding: Binding,
}

/// Commands sent to a room actor through its channel.
pub(crate) enum RoomCommand {
    /// Take a new seat and attach this connection to it.
    Join {
        name: String,
        display: bool,
        sender: ConnectionSender,
        reply: oneshot::Sender<Result<(ConnId, PlayerId), RoomError>>,
    },

    /// Attach a fresh connection to a seat dealt earlier (resume).
    Rebind {
        player: PlayerId,
        sender: ConnectionSender,
        reply: oneshot::Sender<Result<ConnId, RoomError>>,
    },

    /// Attach a watch-only connection.
    Spectate {
        sender: ConnectionSender,
        reply: oneshot::Sender<ConnId>,
    },

    /// Drop a connection. Its seat, if any, survives.
    Detach { conn: ConnId },

    /// Apply a decoded client intent.
    Intent { conn: ConnId, intent: ClientIntent },

    /// Snapshot room metadata.
    Info { reply: oneshot::Sender<RoomInfo> },

    /// Stop the actor.
    Shutdown,
}

/// A snapshot of room metadata (not the match state itself).
#[derive(Debug, Clone)]
pub struct RoomInfo {
    pub code: RoomCode,
    pub lifecycle: Lifecycle,
    /// Seats dealt so far, connected or not.
    pub seats: usize,
    /// Live connections, spectators included.
    pub connections: usize,
    /// Time since the last command other than an info poll.
    pub idle: Duration,
}

/// Handle to a running room actor.
///
/// Cheap to clone — the join code plus an `mpsc::Sender`. The registry
/// holds one per room; connection handlers clone it on bind.
#[derive(Clone)]
pub struct RoomHandle {
    code: RoomCode,
    sender: mpsc::Sender<RoomCommand>,
}

impl RoomHandle {
    /// The room's join code.
    pub fn code(&self) -> &RoomCode {
        &self.code
    }

    /// Takes a seat and attaches the connection to it.
    pub async fn join(
        &self,
        name: String,
        display: bool,
        sender: ConnectionSender,
    ) -> Result<(ConnId, PlayerId), RoomError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(RoomCommand::Join {
                name,
                display,
                sender,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RoomError::Unavailable(self.code.clone()))?;
        reply_rx
            .await
            .map_err(|_| RoomError::Unavailable(self.code.clone()))?
    }

    /// Re-attaches a connection to an existing seat.
    pub async fn rebind(
        &self,
        player: PlayerId,
        sender: ConnectionSender,
    ) -> Result<ConnId, RoomError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(RoomCommand::Rebind {
                player,
                sender,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RoomError::Unavailable(self.code.clone()))?;
        reply_rx
            .await
            .map_err(|_| RoomError::Unavailable(self.code.clone()))?
    }

    /// Attaches a watch-only connection.
    pub async fn spectate(&self, sender: ConnectionSender) -> Result<ConnId, RoomError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(RoomCommand::Spectate {
                sender,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RoomError::Unavailable(self.code.clone()))?;
        reply_rx
            .await
            .map_err(|_| RoomError::Unavailable(self.code.clone()))
    }

    /// Drops a connection (fire-and-forget).
    pub async fn detach(&self, conn: ConnId) {
        let _ = self.sender.send(RoomCommand::Detach { conn }).await;
    }

    /// Forwards a decoded intent. Outcomes travel back over the
    /// connection's own frame channel, not this call.
    pub async fn intent(&self, conn: ConnId, intent: ClientIntent) -> Result<(), RoomError> {
        self.sender
            .send(RoomCommand::Intent { conn, intent })
            .await
            .map_err(|_| RoomError::Unavailable(self.code.clone()))
    }

    /// Requests current room metadata.
    pub async fn info(&self) -> Result<RoomInfo, RoomError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(RoomCommand::Info { reply: reply_tx })
            .await
            .map_err(|_| RoomError::Unavailable(self.code.clone()))?;
        reply_rx
            .await
            .map_err(|_| RoomError::Unavailable(self.code.clone()))
    }

    /// Tells the room to stop.
    pub async fn shutdown(&self) {
        let _ = self.sender.send(RoomCommand::Shutdown).await;
    }
}

/// The internal actor state. Runs inside a Tokio task.
struct RoomActor {
    code: RoomCode,
    match_state: MatchState,
    connections: HashMap<ConnId, Attachment>,
    last_activity: Instant,
    receiver: mpsc::Receiver<RoomCommand>,
}

impl RoomActor {
    /// Runs the actor loop, processing commands until shutdown.
    async fn run(mut self) {
        tracing::info!(code = %self.code, "room opened");

        while let Some(cmd) = self.receiver.recv().await {
            match cmd {
                RoomCommand::Join {
                    name,
                    display,
                    sender,
                    reply,
                } => {
                    self.touch();
                    let result = self.handle_join(name, display, sender);
                    let _ = reply.send(result);
                }
                RoomCommand::Rebind {
                    player,
                    sender,
                    reply,
                } => {
                    self.touch();
                    let result = self.handle_rebind(player, sender);
                    let _ = reply.send(result);
                }
                RoomCommand::Spectate { sender, reply } => {
                    self.touch();
                    let conn = self.handle_spectate(sender);
                    let _ = reply.send(conn);
                }
                RoomCommand::Detach { conn } => {
                    self.touch();
                    self.handle_detach(conn);
                }
                RoomCommand::Intent { conn, intent } => {
                    self.touch();
                    self.apply_intent(conn, intent);
                }
                RoomCommand::Info { reply } => {
                    // Info polls come from the sweeper and must not
                    // count as activity.
                    let _ = reply.send(self.info());
                }
                RoomCommand::Shutdown => break,
            }
        }

        tracing::info!(code = %self.code, "room closed");
    }

    fn touch(&mut self) {
        self.last_activity = Instant::now();
    }

    fn handle_join(
        &mut self,
        name: String,
        display: bool,
        sender: ConnectionSender,
    ) -> Result<(ConnId, PlayerId), RoomError> {
        let role = if display {
            SeatRole::Display
        } else {
            SeatRole::Interactive
        };
        let player = self.match_state.add_seat(name, role)?;
        let conn = ConnId::next();
        self.connections.insert(
            conn,
            Attachment {
                sender,
                binding: Binding::Seat(player),
            },
        );
        tracing::info!(
            code = %self.code,
            %conn,
            %player,
            seats = self.match_state.seat_count(),
            "seat taken"
        );
        self.broadcast();
        Ok((conn, player))
    }

    fn handle_rebind(
        &mut self,
        player: PlayerId,
        sender: ConnectionSender,
    ) -> Result<ConnId, RoomError> {
        if !self.match_state.contains(player) {
            return Err(RoomError::UnknownSeat(self.code.clone()));
        }

        // One connection per seat: a resumed session replaces any
        // connection still bound to it.
        self.connections
            .retain(|_, att| !matches!(att.binding, Binding::Seat(p) if p == player));

        let conn = ConnId::next();
        self.connections.insert(
            conn,
            Attachment {
                sender,
                binding: Binding::Seat(player),
            },
        );
        tracing::info!(code = %self.code, %conn, %player, "seat resumed");
        self.broadcast();
        Ok(conn)
    }

    fn handle_spectate(&mut self, sender: ConnectionSender) -> ConnId {
        let conn = ConnId::next();
        self.connections.insert(
            conn,
            Attachment {
                sender,
                binding: Binding::Spectator,
            },
        );
        tracing::info!(code = %self.code, %conn, "spectator attached");
        self.send_state(conn);
        conn
    }

    fn handle_detach(&mut self, conn: ConnId) {
        if let Some(att) = self.connections.remove(&conn) {
            match att.binding {
                Binding::Seat(player) => tracing::info!(
                    code = %self.code,
                    %conn,
                    %player,
                    "connection detached, seat kept"
                ),
                Binding::Spectator => {
                    tracing::debug!(code = %self.code, %conn, "spectator left");
                }
            }
        }
    }

    fn apply_intent(&mut self, conn: ConnId, intent: ClientIntent) {
        let player = match self.connections.get(&conn) {
            Some(att) => match att.binding {
                Binding::Seat(player) => player,
                Binding::Spectator => {
                    self.send_error(conn, "spectators can only watch");
                    return;
                }
            },
            None => return,
        };

        let result = match intent {
            ClientIntent::Create { .. }
            | ClientIntent::Join { .. }
            | ClientIntent::Spectate { .. }
            | ClientIntent::Resume { .. } => {
                self.send_error(conn, "this connection is already in a room");
                return;
            }
            ClientIntent::Ready => self.match_state.toggle_ready(player),
            ClientIntent::Start => self.match_state.start(player),
            ClientIntent::PlayCard {
                card_index,
                play_type,
                target_data,
            } => self
                .match_state
                .play_card(player, card_index, play_type, target_data),
            ClientIntent::Pay { payment } => self.match_state.pay(player, &payment),
            ClientIntent::Respond {
                response,
                card_index,
            } => self.match_state.respond(player, response, card_index),
            ClientIntent::PlaceWild { index, color } => {
                self.match_state.place_wildcard(player, index, color)
            }
            ClientIntent::MoveWild {
                from_color,
                card_index,
                to_color,
            } => self
                .match_state
                .move_wildcard(player, from_color, card_index, to_color),
            ClientIntent::EndTurn => self.match_state.end_turn(player),
            ClientIntent::PlayAgain => self.match_state.reset(player),
        };

        if let Err(err) = result {
            tracing::debug!(code = %self.code, %conn, %player, %err, "intent rejected");
            self.send_error(conn, err.to_string());
        }

        // Rejected intents re-broadcast too; a client that drifted out
        // of sync gets pulled back by the same frame.
        self.broadcast();
    }

    /// Re-sends the full state to every connection, each with its own
    /// private view. Connections whose receiver is gone are dropped.
    fn broadcast(&mut self) {
        let code = &self.code;
        let state = &self.match_state;
        let public = state.public_view();
        self.connections.retain(|_, att| {
            let private = match att.binding {
                Binding::Seat(player) => state.private_view(player),
                Binding::Spectator => None,
            };
            let frame = ServerFrame::State {
                code: code.clone(),
                public: public.clone(),
                private,
            };
            att.sender.send(frame).is_ok()
        });
    }

    /// Sends one state frame to a single connection.
    fn send_state(&self, conn: ConnId) {
        if let Some(att) = self.connections.get(&conn) {
            let private = match att.binding {
                Binding::Seat(player) => self.match_state.private_view(player),
                Binding::Spectator => None,
            };
            let frame = ServerFrame::State {
                code: self.code.clone(),
                public: self.match_state.public_view(),
                private,
            };
            let _ = att.sender.send(frame);
        }
    }

    /// Sends an error frame to a single connection. Silently drops if
    /// the receiver is gone.
    fn send_error(&self, conn: ConnId, message: impl Into<String>) {
        if let Some(att) = self.connections.get(&conn) {
            let _ = att.sender.send(ServerFrame::Error {
                message: message.into(),
            });
        }
    }

    fn info(&self) -> RoomInfo {
        RoomInfo {
            code: self.code.clone(),
            lifecycle: self.match_state.lifecycle(),
            seats: self.match_state.seat_count(),
            connections: self.connections.len(),
            idle: self.last_activity.elapsed(),
        }
    }
}

/// Spawns a room actor task and returns a handle to it.
///
/// `channel_size` bounds the command channel; senders wait when it
/// fills.
pub(crate) fn spawn_room(code: RoomCode, seed: Option<u64>, channel_size: usize) -> RoomHandle {
    let (tx, rx) = mpsc::channel(channel_size);

    let match_state = match seed {
        Some(seed) => MatchState::with_seed(seed),
        None => MatchState::new(),
    };

    let actor = RoomActor {
        code: code.clone(),
        match_state,
        connections: HashMap::new(),
        last_activity: Instant::now(),
        receiver: rx,
    };

    tokio::spawn(actor.run());

    RoomHandle { code, sender: tx }
}
