//! Per-connection handler: WebSocket upgrade, intent decoding, routing.
//!
//! Each accepted connection runs this handler in its own task, plus a
//! writer task that drains the connection's frame channel. The handler
//! owns the read side and the room binding; everything match-related
//! stays inside the room actor.

use std::net::SocketAddr;
use std::sync::Arc;

use futures_util::{SinkExt, StreamExt};
use landgrab_protocol::{ClientIntent, ServerFrame};
use landgrab_room::{ConnId, ConnectionSender, RoomHandle};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;

use crate::server::ServerState;
use crate::ServerError;

/// Handles a single connection from accept to close.
pub(crate) async fn handle_connection(
    stream: TcpStream,
    addr: SocketAddr,
    state: Arc<ServerState>,
) -> Result<(), ServerError> {
    let ws = tokio_tungstenite::accept_async(stream).await?;
    tracing::debug!(%addr, "connection opened");

    let (mut sink, mut reader) = ws.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<ServerFrame>();

    // Writer task: every frame pushed into the channel, by this
    // handler or by the room actor, goes out as one text message.
    tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            let text = match serde_json::to_string(&frame) {
                Ok(text) => text,
                Err(e) => {
                    tracing::error!(error = %e, "frame serialization failed");
                    continue;
                }
            };
            if sink.send(Message::Text(text.into())).await.is_err() {
                break;
            }
        }
        let _ = sink.close().await;
    });

    let mut binding: Option<(RoomHandle, ConnId)> = None;
    let mut result = Ok(());

    while let Some(msg) = reader.next().await {
        let msg = match msg {
            Ok(msg) => msg,
            Err(e) => {
                tracing::debug!(%addr, error = %e, "read error");
                break;
            }
        };
        let text = match msg {
            Message::Text(text) => text,
            Message::Close(_) => break,
            // The protocol is text-only; control frames are handled by
            // tungstenite itself.
            _ => continue,
        };

        let intent: ClientIntent = match serde_json::from_str(text.as_str()) {
            Ok(intent) => intent,
            Err(e) => {
                tracing::debug!(%addr, error = %e, "dropping malformed intent");
                continue;
            }
        };

        if let Err(e) = route_intent(&state, &tx, &mut binding, intent).await {
            result = Err(e);
            break;
        }
    }

    if let Some((handle, conn)) = binding {
        handle.detach(conn).await;
    }
    tracing::debug!(%addr, "connection closed");
    result
}

/// Routes one decoded intent.
///
/// Connection-level intents (`create`, `join`, `spectate`, `resume`)
/// bind the connection to a room; every other intent requires a bound
/// seat and is forwarded to the room actor. Refusals go back over the
/// frame channel; only a vanished room ends the connection.
async fn route_intent(
    state: &Arc<ServerState>,
    tx: &ConnectionSender,
    binding: &mut Option<(RoomHandle, ConnId)>,
    intent: ClientIntent,
) -> Result<(), ServerError> {
    match intent {
        ClientIntent::Create { name, display } => {
            if binding.is_some() {
                send_error(tx, "this connection is already in a room");
                return Ok(());
            }
            let handle = state.registry.lock().await.create_room();
            match handle.join(name, display, tx.clone()).await {
                Ok((conn, player)) => {
                    let code = handle.code().clone();
                    let token = state.sessions.lock().await.mint(code.clone(), player);
                    send(
                        tx,
                        ServerFrame::Created {
                            code,
                            player_id: player,
                            resume_token: token,
                        },
                    );
                    *binding = Some((handle, conn));
                }
                Err(e) => send_error(tx, e),
            }
        }

        ClientIntent::Join {
            code,
            name,
            display,
        } => {
            if binding.is_some() {
                send_error(tx, "this connection is already in a room");
                return Ok(());
            }
            let handle = match state.registry.lock().await.lookup(&code) {
                Ok(handle) => handle,
                Err(e) => {
                    send_error(tx, e);
                    return Ok(());
                }
            };
            match handle.join(name, display, tx.clone()).await {
                Ok((conn, player)) => {
                    let code = handle.code().clone();
                    let token = state.sessions.lock().await.mint(code.clone(), player);
                    send(
                        tx,
                        ServerFrame::Joined {
                            code,
                            player_id: player,
                            resume_token: token,
                        },
                    );
                    *binding = Some((handle, conn));
                }
                Err(e) => send_error(tx, e),
            }
        }

        ClientIntent::Spectate { code } => {
            if binding.is_some() {
                send_error(tx, "this connection is already in a room");
                return Ok(());
            }
            let handle = match state.registry.lock().await.lookup(&code) {
                Ok(handle) => handle,
                Err(e) => {
                    send_error(tx, e);
                    return Ok(());
                }
            };
            match handle.spectate(tx.clone()).await {
                Ok(conn) => {
                    send(
                        tx,
                        ServerFrame::Spectating {
                            code: handle.code().clone(),
                        },
                    );
                    *binding = Some((handle, conn));
                }
                Err(e) => send_error(tx, e),
            }
        }

        ClientIntent::Resume { token } => {
            if binding.is_some() {
                send_error(tx, "this connection is already in a room");
                return Ok(());
            }
            let seat = state.sessions.lock().await.resolve(&token).cloned();
            let seat = match seat {
                Some(seat) => seat,
                None => {
                    send_error(tx, "unknown resume token");
                    return Ok(());
                }
            };
            let handle = match state.registry.lock().await.lookup(&seat.code) {
                Ok(handle) => handle,
                Err(e) => {
                    send_error(tx, e);
                    return Ok(());
                }
            };
            match handle.rebind(seat.player, tx.clone()).await {
                Ok(conn) => {
                    send(
                        tx,
                        ServerFrame::Resumed {
                            code: seat.code,
                            player_id: seat.player,
                        },
                    );
                    *binding = Some((handle, conn));
                }
                Err(e) => send_error(tx, e),
            }
        }

        seat_intent => match binding {
            Some((handle, conn)) => {
                handle.intent(*conn, seat_intent).await?;
            }
            None => send_error(tx, "join a room first"),
        },
    }

    Ok(())
}

fn send(tx: &ConnectionSender, frame: ServerFrame) {
    let _ = tx.send(frame);
}

fn send_error(tx: &ConnectionSender, message: impl ToString) {
    let _ = tx.send(ServerFrame::Error {
        message: message.to_string(),
    });
}
