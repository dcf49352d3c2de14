//! `LandgrabServer` builder, accept loop, and the eviction sweeper.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use landgrab_room::{RoomRegistry, RoomsConfig};
use tokio::net::TcpListener;
use tokio::sync::Mutex;

use crate::handler::handle_connection;
use crate::session::SessionTable;
use crate::ServerError;

/// Shared server state passed to each connection handler task.
///
/// Wrapped in `Arc` so it can be cheaply cloned across tasks, with a
/// mutex around each piece of mutable state. Handlers hold the locks
/// only while binding a connection, never across the message loop.
pub(crate) struct ServerState {
    pub(crate) registry: Mutex<RoomRegistry>,
    pub(crate) sessions: Mutex<SessionTable>,
}

/// Builder for configuring and starting a Landgrab server.
///
/// # Example
///
/// ```rust,no_run
/// # async fn run() -> Result<(), landgrab::ServerError> {
/// let server = landgrab::LandgrabServer::builder()
///     .bind("0.0.0.0:8080")
///     .build()
///     .await?;
/// server.run().await
/// # }
/// ```
pub struct LandgrabServerBuilder {
    bind_addr: String,
    rooms: RoomsConfig,
}

impl LandgrabServerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".to_string(),
            rooms: RoomsConfig::default(),
        }
    }

    /// Sets the address to bind the server to.
    pub fn bind(mut self, addr: &str) -> Self {
        self.bind_addr = addr.to_string();
        self
    }

    /// Sets the room-layer configuration.
    pub fn rooms(mut self, config: RoomsConfig) -> Self {
        self.rooms = config;
        self
    }

    /// Binds the listener and assembles the server.
    pub async fn build(self) -> Result<LandgrabServer, ServerError> {
        let listener = TcpListener::bind(&self.bind_addr).await?;
        tracing::info!(addr = %self.bind_addr, "listening");

        let sweep_interval = self.rooms.sweep_interval;
        let state = Arc::new(ServerState {
            registry: Mutex::new(RoomRegistry::new(self.rooms)),
            sessions: Mutex::new(SessionTable::new()),
        });

        Ok(LandgrabServer {
            listener,
            state,
            sweep_interval,
        })
    }
}

impl Default for LandgrabServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A running Landgrab server.
///
/// Call [`run()`](Self::run) to start accepting connections.
pub struct LandgrabServer {
    listener: TcpListener,
    state: Arc<ServerState>,
    sweep_interval: Duration,
}

impl LandgrabServer {
    /// Creates a new builder.
    pub fn builder() -> LandgrabServerBuilder {
        LandgrabServerBuilder::new()
    }

    /// Returns the local address the listener is bound to.
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Runs the accept loop and the eviction sweeper until the process
    /// is terminated.
    ///
    /// Each accepted connection gets its own handler task; a panicking
    /// or erroring handler takes down only its own connection.
    pub async fn run(self) -> Result<(), ServerError> {
        tracing::info!("landgrab server running");

        let sweeper_state = Arc::clone(&self.state);
        let sweep_interval = self.sweep_interval;
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(sweep_interval);
            // The first tick completes immediately.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let evicted = sweeper_state.registry.lock().await.sweep().await;
                if !evicted.is_empty() {
                    let mut sessions = sweeper_state.sessions.lock().await;
                    for code in &evicted {
                        sessions.purge_room(code);
                    }
                    tracing::info!(rooms = evicted.len(), "swept idle rooms");
                }
            }
        });

        loop {
            match self.listener.accept().await {
                Ok((stream, addr)) => {
                    let state = Arc::clone(&self.state);
                    tokio::spawn(async move {
                        if let Err(e) = handle_connection(stream, addr, state).await {
                            tracing::debug!(error = %e, "connection ended with error");
                        }
                    });
                }
                Err(e) => {
                    tracing::error!(error = %e, "accept failed");
                }
            }
        }
    }
}
