//! Registry - the live connections, keyed by network.
//!
//! Owned by the router task, so it needs no locking. Dialing happens on a
//! separate task which reports back through the router's `from_server`
//! channel, so a slow server never stalls routing.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{Instrument, info, warn};

use super::connection::{Connection, ConnectionSettings};
use super::event::ServerEvent;
use super::target::NetworkTarget;
use crate::error::{ConnectionError, RegistryError};
use crate::rawlog::RawLog;
use crate::telemetry::spans;

/// Every connection the bouncer holds, keyed by network identifier.
pub struct Registry {
    connections: HashMap<String, Connection>,
    events: mpsc::Sender<ServerEvent>,
    raw_log: Arc<RawLog>,
    settings: ConnectionSettings,
}

impl Registry {
    pub fn new(
        events: mpsc::Sender<ServerEvent>,
        raw_log: Arc<RawLog>,
        settings: ConnectionSettings,
    ) -> Self {
        Self {
            connections: HashMap::new(),
            events,
            raw_log,
            settings,
        }
    }

    /// Dial `target` on a new task.
    ///
    /// The outcome arrives on the events channel as
    /// [`ServerEvent::Connected`] (followed by the connection's lines) or
    /// [`ServerEvent::DialFailed`].
    pub fn connect(&self, target: NetworkTarget) {
        let events = self.events.clone();
        let raw_log = Arc::clone(&self.raw_log);
        let settings = self.settings.clone();
        let span = spans::dial(&target.network, &target.address);

        tokio::spawn(
            async move {
                info!(tls = target.tls, "Dialing");
                match Connection::dial(&target, &settings, events.clone(), raw_log).await {
                    Ok((conn, read_loop)) => {
                        if events.send(ServerEvent::Connected(conn)).await.is_ok() {
                            read_loop.run().await;
                        }
                    }
                    Err(error) => {
                        warn!(error = %error, code = error.error_code(), "Dial failed");
                        let _ = events
                            .send(ServerEvent::DialFailed {
                                network: target.network,
                                error,
                            })
                            .await;
                    }
                }
            }
            .instrument(span),
        );
    }

    /// Take ownership of a freshly dialed connection, closing any older
    /// connection to the same network.
    pub async fn insert(&mut self, conn: Connection) {
        info!(network = %conn.network(), id = conn.id(), "Network registered");
        if let Some(old) = self.connections.insert(conn.network().to_string(), conn) {
            info!(network = %old.network(), id = old.id(), "Replacing connection");
            old.close().await;
        }
    }

    /// `PRIVMSG` on `network`.
    pub async fn send_message(
        &mut self,
        network: &str,
        channel: &str,
        text: &str,
    ) -> Result<(), RegistryError> {
        let result = self.get(network)?.send_message(channel, text).await;
        self.check(network, result).await
    }

    /// `/me` on `network`.
    pub async fn send_action(
        &mut self,
        network: &str,
        channel: &str,
        text: &str,
    ) -> Result<(), RegistryError> {
        let result = self.get(network)?.send_action(channel, text).await;
        self.check(network, result).await
    }

    /// Raw slash command on `network`.
    pub async fn do_command(&mut self, network: &str, command: &str) -> Result<(), RegistryError> {
        let result = self.get(network)?.do_command(command).await;
        self.check(network, result).await
    }

    /// NickServ identify on `network`.
    pub async fn identify(&mut self, network: &str, password: &str) -> Result<(), RegistryError> {
        let result = self.get(network)?.identify(password).await;
        self.check(network, result).await
    }

    /// Drop the connection to `network` if it is still connection `id`.
    ///
    /// Returns whether anything was removed. A disconnect reported by an
    /// already replaced connection leaves the newer one alone.
    pub fn forget(&mut self, network: &str, id: u64) -> bool {
        match self.connections.get(network) {
            Some(conn) if conn.id() == id => {
                self.connections.remove(network);
                true
            }
            _ => false,
        }
    }

    /// Quit and close every connection.
    pub async fn close_all(&mut self) {
        for (network, conn) in self.connections.drain() {
            info!(network = %network, "Closing connection");
            conn.close().await;
        }
    }

    fn get(&self, network: &str) -> Result<&Connection, RegistryError> {
        self.connections
            .get(network)
            .ok_or_else(|| RegistryError::UnknownNetwork(network.to_string()))
    }

    /// A failed write ends that connection only.
    async fn check(
        &mut self,
        network: &str,
        result: Result<(), ConnectionError>,
    ) -> Result<(), RegistryError> {
        let Err(source) = result else {
            return Ok(());
        };

        if let Some(conn) = self.connections.remove(network) {
            conn.close().await;
        }
        Err(RegistryError::Connection {
            network: network.to_string(),
            source,
        })
    }
}
