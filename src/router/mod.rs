//! Router - the single task routing traffic between networks and sessions.
//!
//! ```text
//!   connections ──ServerEvent──▶ ┌────────┐ ──JSON events──▶ Sessions
//!                                │ Router │
//!   Sessions ─────Message──────▶ └────────┘ ──send ops────▶ Registry
//! ```
//!
//! All router state is owned by the task running [`Router::run`], so none
//! of it is locked.

mod command;
mod private;

pub use command::UserCommand;
pub use private::{CommandOpener, PaneOpener};

use std::collections::HashSet;
use std::future::Future;

use hatcog_proto::response::{is_info, requires_channel};
use hatcog_proto::{Line, NickExt, irc_eq, irc_to_lower, outbound};
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use crate::config::IdentityConfig;
use crate::error::RegistryError;
use crate::gateway::SessionEvent;
use crate::network::{NetworkTarget, Registry, ServerEvent};

/// Text typed into a session, bound for a network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub network: String,
    pub channel: String,
    /// Plain text, or a slash command when it starts with `/`.
    pub content: String,
}

/// The router's view of the local session gateway.
///
/// Events are JSON strings, see [`SessionEvent`].
pub trait Sessions: Send + 'static {
    /// Write to every session on `network`.
    fn write_all(&self, network: &str, event: &str);
    /// Write to the sessions showing `channel` on `network`.
    fn write_channel(&self, network: &str, channel: &str, event: &str);
    /// Whether any session shows `channel` on `network`.
    fn has_channel(&self, network: &str, channel: &str) -> bool;
    /// Record our nick and tell every session.
    fn set_nick(&self, nick: &str);
    /// Keep the last private message from `nick`, delivered to the session
    /// for that conversation when it connects.
    fn set_last_private(&self, network: &str, nick: &str, event: &str);
    /// Start accepting sessions.
    fn start(&self);
    /// Stop accepting and close every session.
    fn close(&self);
}

/// Routes inbound lines to sessions and session input to networks.
pub struct Router<S, P> {
    nick: String,
    display_name: String,
    registry: Registry,
    sessions: S,
    opener: P,
    from_server: mpsc::Receiver<ServerEvent>,
    from_user: mpsc::Receiver<Message>,
    /// (network, lowercased nick) with a pane requested but no session yet.
    pending_private: HashSet<(String, String)>,
}

impl<S: Sessions, P: PaneOpener> Router<S, P> {
    pub fn new(
        identity: &IdentityConfig,
        registry: Registry,
        sessions: S,
        opener: P,
        from_server: mpsc::Receiver<ServerEvent>,
        from_user: mpsc::Receiver<Message>,
    ) -> Self {
        Self {
            nick: identity.nick.clone(),
            display_name: identity.display_name().to_string(),
            registry,
            sessions,
            opener,
            from_server,
            from_user,
            pending_private: HashSet::new(),
        }
    }

    /// Our current nick.
    pub fn nick(&self) -> &str {
        &self.nick
    }

    /// Dial a network. The result comes back as a [`ServerEvent`].
    pub fn connect(&self, target: NetworkTarget) {
        self.registry.connect(target);
    }

    /// Route until `shutdown` resolves, then close every connection and
    /// session.
    pub async fn run(mut self, shutdown: impl Future<Output = ()>) {
        self.sessions.start();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("Shutdown requested");
                    break;
                }
                Some(event) = self.from_server.recv() => self.on_server(event).await,
                Some(message) = self.from_user.recv() => self.on_user(message).await,
                else => break,
            }
        }

        self.registry.close_all().await;
        self.sessions.close();
        info!("Router stopped");
    }

    /// Handle one event from the network side.
    pub async fn on_server(&mut self, event: ServerEvent) {
        match event {
            ServerEvent::Line(line) => self.on_line(&line),
            ServerEvent::Connected(conn) => self.registry.insert(conn).await,
            ServerEvent::DialFailed { network, error } => {
                error!(network = %network, error = %error, code = error.error_code(), "Could not connect");
                self.notify_network(&network, &format!("could not connect: {}", error));
            }
            ServerEvent::Disconnected {
                network,
                id,
                reason,
            } => {
                if self.registry.forget(&network, id) {
                    warn!(network = %network, id = id, error = %reason, "Network disconnected");
                    self.notify_network(&network, &format!("disconnected: {}", reason));
                }
            }
        }
    }

    fn on_line(&mut self, line: &Line) {
        if is_info(&line.command) {
            info!(network = %line.network, command = %line.command, "{}", line.content);
        }

        let event = SessionEvent::Line(line).to_json();
        if line.channel.is_empty() && !requires_channel(&line.command) {
            self.sessions.write_all(&line.network, &event);
        } else {
            self.sessions
                .write_channel(&line.network, &line.channel, &event);
        }

        if is_private(line) {
            self.on_private(line, &event);
        }
    }

    fn on_private(&mut self, line: &Line, event: &str) {
        let key = (line.network.clone(), irc_to_lower(&line.user));
        if self.sessions.has_channel(&line.network, &line.channel) {
            self.pending_private.remove(&key);
            return;
        }

        self.sessions
            .set_last_private(&line.network, &line.user, event);
        if self.pending_private.insert(key) {
            self.opener.open(&line.network, &line.user);
        }
    }

    /// Handle one line typed into a session.
    pub async fn on_user(&mut self, message: Message) {
        let Message {
            network,
            channel,
            content,
        } = message;

        let result = match UserCommand::parse(&content) {
            None => {
                self.registry
                    .send_message(&network, &channel, &content)
                    .await
            }
            Some(UserCommand::Identify(password)) => self.registry.identify(&network, password).await,
            Some(UserCommand::Action(text)) => {
                self.registry.send_action(&network, &channel, text).await
            }
            Some(UserCommand::Nick("")) => self.registry.do_command(&network, &content).await,
            Some(UserCommand::Nick(nick)) => {
                if !nick.is_valid_nick() {
                    self.notify(&network, &channel, &format!("invalid nick: {}", nick));
                    return;
                }
                self.nick = nick.to_string();
                self.sessions.set_nick(nick);
                self.registry
                    .do_command(&network, &outbound::nick(nick))
                    .await
            }
            Some(UserCommand::Connect(args)) => {
                match NetworkTarget::from_connect_args(args, &self.nick, &self.display_name) {
                    Ok(target) => self.registry.connect(target),
                    Err(e) => {
                        warn!(error = %e, code = e.error_code(), "Bad /connect");
                        self.notify(&network, &channel, &e.to_string());
                    }
                }
                return;
            }
            Some(UserCommand::Raw(command)) => self.registry.do_command(&network, command).await,
        };

        if let Err(e) = result {
            self.report(&network, &channel, e);
        }
    }

    fn report(&self, network: &str, channel: &str, e: RegistryError) {
        warn!(network = %network, error = %e, code = e.error_code(), "Send failed");
        self.notify(network, channel, &e.to_string());
    }

    fn notify(&self, network: &str, channel: &str, message: &str) {
        let event = SessionEvent::Error { message }.to_json();
        self.sessions.write_channel(network, channel, &event);
    }

    fn notify_network(&self, network: &str, message: &str) {
        let event = SessionEvent::Error { message }.to_json();
        self.sessions.write_all(network, &event);
    }
}

/// A direct message to us: tagged with the sender as its channel.
fn is_private(line: &Line) -> bool {
    line.command == "PRIVMSG" && !line.user.is_empty() && irc_eq(&line.user, &line.channel)
}
