//! Gateway - TCP listener for local sessions.
//!
//! Each session is a UI pane showing one channel (or one private
//! conversation) on one network. The gateway accepts sessions, forwards
//! what they type to the router as [`Message`]s, and fans router events
//! out to them.
//!
//! Shared state is held in concurrent maps since sessions run on their own
//! tasks while the router writes from its task.

mod protocol;
mod session;

pub use protocol::{Hello, SessionEvent};

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use hatcog_proto::{irc_eq, irc_to_lower};
use parking_lot::{Mutex, RwLock};
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, debug, error, info, warn};

use crate::config::GatewayConfig;
use crate::router::{Message, Sessions};
use crate::telemetry::spans;

/// Handle to one connected session, used to write events to it.
struct SessionHandle {
    network: String,
    channel: String,
    tx: mpsc::Sender<String>,
}

impl SessionHandle {
    fn shows(&self, network: &str, channel: &str) -> bool {
        self.network == network && irc_eq(&self.channel, channel)
    }
}

struct Inner {
    listener: Mutex<Option<TcpListener>>,
    local_addr: SocketAddr,
    sessions: DashMap<u64, SessionHandle>,
    next_id: AtomicU64,
    nick: RwLock<String>,
    /// Last private message per (network, lowercased nick), waiting for a
    /// session for that conversation.
    last_private: DashMap<(String, String), String>,
    from_user: mpsc::Sender<Message>,
    shutdown: CancellationToken,
    queue: usize,
}

/// The local session gateway. Cheap to clone.
#[derive(Clone)]
pub struct Gateway {
    inner: Arc<Inner>,
}

impl Gateway {
    /// Bind the listener. Sessions are accepted once [`Sessions::start`]
    /// is called.
    pub async fn bind(
        config: &GatewayConfig,
        nick: &str,
        from_user: mpsc::Sender<Message>,
    ) -> io::Result<Self> {
        let listener = TcpListener::bind(config.listen).await?;
        let local_addr = listener.local_addr()?;
        info!(address = %local_addr, "Gateway listener bound");

        Ok(Self {
            inner: Arc::new(Inner {
                listener: Mutex::new(Some(listener)),
                local_addr,
                sessions: DashMap::new(),
                next_id: AtomicU64::new(1),
                nick: RwLock::new(nick.to_string()),
                last_private: DashMap::new(),
                from_user,
                shutdown: CancellationToken::new(),
                queue: config.session_queue.max(1),
            }),
        })
    }

    /// Address the listener is bound to.
    pub fn local_addr(&self) -> SocketAddr {
        self.inner.local_addr
    }

    /// Number of sessions currently attached.
    pub fn session_count(&self) -> usize {
        self.inner.sessions.len()
    }

    fn nick(&self) -> String {
        self.inner.nick.read().clone()
    }

    async fn accept_loop(self, listener: TcpListener) {
        let shutdown = self.inner.shutdown.clone();
        loop {
            tokio::select! {
                _ = shutdown.cancelled() => break,
                accepted = listener.accept() => match accepted {
                    Ok((stream, peer)) => {
                        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
                        debug!(id = id, peer = %peer, "Session connected");
                        tokio::spawn(
                            session::run(self.clone(), id, stream)
                                .instrument(spans::session(id, peer)),
                        );
                    }
                    Err(e) => {
                        warn!(error = %e, "Accept failed");
                    }
                }
            }
        }
        info!("Gateway stopped accepting");
    }

    /// Attach a session that completed its hello. The welcome (and any
    /// waiting private message) is queued before the session becomes
    /// visible to the router, so it is always written first.
    fn attach(&self, id: u64, hello: &Hello) -> mpsc::Receiver<String> {
        let (tx, rx) = mpsc::channel(self.inner.queue);

        let nick = self.nick();
        let _ = tx.try_send(SessionEvent::Welcome { nick: &nick }.to_json());

        let key = (hello.network.clone(), irc_to_lower(&hello.channel));
        if let Some((_, last)) = self.inner.last_private.remove(&key) {
            let _ = tx.try_send(last);
        }

        self.inner.sessions.insert(
            id,
            SessionHandle {
                network: hello.network.clone(),
                channel: hello.channel.clone(),
                tx,
            },
        );
        info!(id = id, network = %hello.network, channel = %hello.channel, "Session attached");
        rx
    }

    fn detach(&self, id: u64) {
        if self.inner.sessions.remove(&id).is_some() {
            info!(id = id, "Session detached");
        }
    }

    fn deliver(&self, id: u64, handle: &SessionHandle, event: &str) {
        match handle.tx.try_send(event.to_string()) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                warn!(id = id, network = %handle.network, channel = %handle.channel, "Session queue full, dropping event");
            }
            // Session task is finishing and will detach itself
            Err(TrySendError::Closed(_)) => {}
        }
    }
}

impl Sessions for Gateway {
    fn write_all(&self, network: &str, event: &str) {
        for entry in self.inner.sessions.iter() {
            if entry.network == network {
                self.deliver(*entry.key(), entry.value(), event);
            }
        }
    }

    fn write_channel(&self, network: &str, channel: &str, event: &str) {
        for entry in self.inner.sessions.iter() {
            if entry.shows(network, channel) {
                self.deliver(*entry.key(), entry.value(), event);
            }
        }
    }

    fn has_channel(&self, network: &str, channel: &str) -> bool {
        self.inner
            .sessions
            .iter()
            .any(|entry| entry.shows(network, channel))
    }

    fn set_nick(&self, nick: &str) {
        *self.inner.nick.write() = nick.to_string();

        let event = SessionEvent::Nick { nick }.to_json();
        for entry in self.inner.sessions.iter() {
            self.deliver(*entry.key(), entry.value(), &event);
        }
    }

    fn set_last_private(&self, network: &str, nick: &str, event: &str) {
        self.inner.last_private.insert(
            (network.to_string(), irc_to_lower(nick)),
            event.to_string(),
        );
    }

    fn start(&self) {
        let Some(listener) = self.inner.listener.lock().take() else {
            error!("Gateway already started");
            return;
        };
        tokio::spawn(self.clone().accept_loop(listener));
    }

    fn close(&self) {
        self.inner.shutdown.cancel();
    }
}
