//! Connection - one socket to one IRC network.
//!
//! Dialing splits the stream in two:
//!
//! ```text
//!            ┌──────────────┐  send_raw   ┌───────────────────┐
//!  Router ──▶│  Connection  │────────────▶│ Outbound          │──▶ server
//!            └──────────────┘             │ (FramedWrite)     │
//!                                         └─────────▲─────────┘
//!                                                   │ PONG, VERSION,
//!                                                   │ identify
//!  server ──▶ FramedRead ──▶ ReadLoop::act ─────────┘
//!                                 │
//!                                 └──▶ ServerEvent::Line ──▶ Router
//! ```
//!
//! The [`Connection`] is owned by the registry; the [`ReadLoop`] runs in
//! its own task. Both share the write half.

mod read_loop;
mod tagging;

pub use read_loop::ReadLoop;
pub use tagging::channel_for;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use futures_util::SinkExt;
use hatcog_proto::format::first_line;
use hatcog_proto::{LineCodec, outbound};
use tokio::io::{AsyncWriteExt, WriteHalf};
use tokio::sync::{Mutex, mpsc};
use tokio_util::codec::{FramedRead, FramedWrite};
use tracing::{debug, info};

use super::event::ServerEvent;
use super::stream::IrcStream;
use super::target::NetworkTarget;
use crate::config::ConnectionConfig;
use crate::error::{ConnectionError, DialError};
use crate::rawlog::RawLog;

static NEXT_CONNECTION_ID: AtomicU64 = AtomicU64::new(1);

/// Connection behaviour shared by every network.
#[derive(Debug, Clone)]
pub struct ConnectionSettings {
    /// How long a read may block before the closing flag is checked again.
    pub read_timeout: Duration,
    /// Text sent in reply to VERSION queries.
    pub version: String,
}

impl From<&ConnectionConfig> for ConnectionSettings {
    fn from(config: &ConnectionConfig) -> Self {
        Self {
            read_timeout: config.read_timeout(),
            version: config.version.clone(),
        }
    }
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        Self::from(&ConnectionConfig::default())
    }
}

type Writer = FramedWrite<WriteHalf<IrcStream>, LineCodec>;

/// The write half, shared between a [`Connection`] and its [`ReadLoop`].
pub(crate) struct Outbound {
    network: String,
    sink: Mutex<Writer>,
    raw_log: Arc<RawLog>,
}

impl Outbound {
    /// Write one line. Anything after the first line ending is dropped so a
    /// single send can never carry two commands.
    pub(crate) async fn send_raw(&self, text: &str) -> Result<(), ConnectionError> {
        let line = format!("{}\n", first_line(text));
        self.raw_log.outbound(&self.network, &line);
        self.sink.lock().await.send(line).await?;
        Ok(())
    }

    async fn shutdown(&self) -> Result<(), ConnectionError> {
        let mut sink = self.sink.lock().await;
        sink.get_mut().shutdown().await?;
        Ok(())
    }
}

/// A registered connection to one IRC network.
pub struct Connection {
    id: u64,
    network: String,
    nick: String,
    display_name: String,
    outbound: Arc<Outbound>,
    closing: Arc<AtomicBool>,
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("id", &self.id)
            .field("network", &self.network)
            .field("nick", &self.nick)
            .finish_non_exhaustive()
    }
}

impl Connection {
    /// Open the socket, send USER and NICK, and hand back the connection
    /// together with its not yet running read loop.
    ///
    /// A password on the target is held by the read loop and sent to
    /// NickServ once the server's welcome numeric arrives.
    pub async fn dial(
        target: &NetworkTarget,
        settings: &ConnectionSettings,
        events: mpsc::Sender<ServerEvent>,
        raw_log: Arc<RawLog>,
    ) -> Result<(Connection, ReadLoop), DialError> {
        let stream = IrcStream::connect(target).await?;
        info!(
            network = %target.network,
            address = %target.address,
            tls = stream.is_tls(),
            "Connected"
        );

        let (read, write) = tokio::io::split(stream);
        let outbound = Arc::new(Outbound {
            network: target.network.clone(),
            sink: Mutex::new(FramedWrite::new(write, LineCodec::new())),
            raw_log: Arc::clone(&raw_log),
        });

        let conn = Connection {
            id: NEXT_CONNECTION_ID.fetch_add(1, Ordering::Relaxed),
            network: target.network.clone(),
            nick: target.nick.clone(),
            display_name: target.display_name.clone(),
            outbound,
            closing: Arc::new(AtomicBool::new(false)),
        };
        conn.register().await.map_err(DialError::Handshake)?;

        let read_loop = ReadLoop {
            id: conn.id,
            network: conn.network.clone(),
            reader: FramedRead::new(read, LineCodec::new()),
            outbound: Arc::clone(&conn.outbound),
            closing: Arc::clone(&conn.closing),
            events,
            raw_log,
            settings: settings.clone(),
            pending_identify: target.password.clone(),
        };

        Ok((conn, read_loop))
    }

    async fn register(&self) -> Result<(), ConnectionError> {
        self.send_raw(&outbound::user(&self.nick, &self.display_name))
            .await?;
        self.send_raw(&outbound::nick(&self.nick)).await
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn network(&self) -> &str {
        &self.network
    }

    pub fn nick(&self) -> &str {
        &self.nick
    }

    /// Send a line as-is, adding the `\n` terminator.
    pub async fn send_raw(&self, text: &str) -> Result<(), ConnectionError> {
        if self.is_closing() {
            return Err(ConnectionError::Closed);
        }
        self.outbound.send_raw(text).await
    }

    /// `PRIVMSG <channel> :<text>`
    pub async fn send_message(&self, channel: &str, text: &str) -> Result<(), ConnectionError> {
        self.send_raw(&outbound::privmsg(channel, text)).await
    }

    /// `PRIVMSG <channel> :\x01ACTION <text>\x01`
    pub async fn send_action(&self, channel: &str, text: &str) -> Result<(), ConnectionError> {
        self.send_raw(&outbound::action(channel, text)).await
    }

    /// Send a slash command's text verbatim, minus the leading `/`.
    pub async fn do_command(&self, command: &str) -> Result<(), ConnectionError> {
        self.send_raw(command.strip_prefix('/').unwrap_or(command))
            .await
    }

    /// Identify with NickServ.
    pub async fn identify(&self, password: &str) -> Result<(), ConnectionError> {
        self.send_raw(&outbound::identify(password)).await
    }

    /// Stop the read loop. It notices within one read timeout.
    pub fn quit(&self) {
        self.closing.store(true, Ordering::Release);
    }

    pub fn is_closing(&self) -> bool {
        self.closing.load(Ordering::Acquire)
    }

    /// Quit and shut down the write half.
    pub async fn close(&self) {
        self.quit();
        if let Err(e) = self.outbound.shutdown().await {
            debug!(network = %self.network, error = %e, "Shutdown after close failed");
        }
    }
}
