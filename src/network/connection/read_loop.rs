//! Per-connection read loop.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use futures_util::StreamExt;
use hatcog_proto::response::RPL_WELCOME;
use hatcog_proto::{CtcpKind, Line, LineCodec, outbound};
use tokio::io::ReadHalf;
use tokio::sync::mpsc;
use tokio::time::timeout;
use tokio_util::codec::FramedRead;
use tracing::{debug, info, instrument, warn};

use super::tagging::channel_for;
use super::{ConnectionSettings, Outbound};
use crate::error::ConnectionError;
use crate::network::event::ServerEvent;
use crate::network::stream::IrcStream;
use crate::rawlog::RawLog;

/// Reads lines from one network until the connection quits or fails.
///
/// Returned by [`Connection::dial`](super::Connection::dial); spawn
/// [`ReadLoop::run`] on its own task.
pub struct ReadLoop {
    pub(super) id: u64,
    pub(super) network: String,
    pub(super) reader: FramedRead<ReadHalf<IrcStream>, LineCodec>,
    pub(super) outbound: Arc<Outbound>,
    pub(super) closing: Arc<AtomicBool>,
    pub(super) events: mpsc::Sender<ServerEvent>,
    pub(super) raw_log: Arc<RawLog>,
    pub(super) settings: ConnectionSettings,
    /// NickServ password waiting for the welcome numeric.
    pub(super) pending_identify: Option<String>,
}

impl ReadLoop {
    /// Run until quit, EOF or an I/O error.
    ///
    /// Failures end only this connection and are reported to the router as
    /// [`ServerEvent::Disconnected`].
    #[instrument(skip(self), fields(network = %self.network, id = self.id), name = "network")]
    pub async fn run(mut self) {
        match self.read_lines().await {
            Ok(()) => debug!("Read loop stopped"),
            Err(ConnectionError::RouterGone) => debug!("Router gone, read loop stopped"),
            Err(reason) => {
                warn!(error = %reason, code = reason.error_code(), "Connection lost");
                let event = ServerEvent::Disconnected {
                    network: self.network.clone(),
                    id: self.id,
                    reason,
                };
                let _ = self.events.send(event).await;
            }
        }
    }

    async fn read_lines(&mut self) -> Result<(), ConnectionError> {
        loop {
            if self.closing.load(Ordering::Acquire) {
                return Ok(());
            }

            let next = match timeout(self.settings.read_timeout, self.reader.next()).await {
                Ok(next) => next,
                // Check the closing flag again
                Err(_) => continue,
            };

            let raw = match next {
                Some(Ok(Ok(raw))) => raw,
                Some(Ok(Err(e))) => {
                    warn!(error = %e, "Skipping unreadable line");
                    continue;
                }
                Some(Err(e)) => return Err(e.into()),
                None => return Err(ConnectionError::Closed),
            };

            let text = raw.trim_end_matches(['\r', '\n']);
            if text.is_empty() {
                continue;
            }
            self.raw_log.inbound(&self.network, text);

            match Line::parse(text) {
                Ok(line) => self.act(line).await?,
                Err(e) => warn!(error = %e, code = e.error_code(), line = %text, "Invalid line"),
            }
        }
    }

    /// Answer what the connection handles itself, forward the rest.
    async fn act(&mut self, line: Line) -> Result<(), ConnectionError> {
        if line.command == "PING" {
            let token = if line.content.is_empty() {
                line.arg(0)
            } else {
                line.content.as_str()
            };
            return self.outbound.send_raw(&outbound::pong(token)).await;
        }

        if is_version_query(&line) {
            if !line.user.is_empty() {
                let reply = outbound::version_reply(&line.user, &self.settings.version);
                self.outbound.send_raw(&reply).await?;
            }
            return Ok(());
        }

        if line.command == RPL_WELCOME
            && let Some(password) = self.pending_identify.take()
        {
            info!("Identifying with NickServ");
            self.outbound.send_raw(&outbound::identify(&password)).await?;
        }

        let channel = channel_for(&line);
        let line = line.routed(self.network.as_str(), channel);
        self.events
            .send(ServerEvent::Line(line))
            .await
            .map_err(|_| ConnectionError::RouterGone)
    }
}

/// A VERSION command, or a CTCP VERSION request in a PRIVMSG. CTCP in a
/// NOTICE is a reply and must never be answered.
fn is_version_query(line: &Line) -> bool {
    line.command == "VERSION" || (line.command == "PRIVMSG" && line.is_ctcp(&CtcpKind::Version))
}
