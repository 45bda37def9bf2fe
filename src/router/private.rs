//! Opening a pane for a new private conversation.

use hatcog_proto::NickExt;
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::config::PrivateConfig;

/// Opens a UI pane for a private conversation.
pub trait PaneOpener: Send + 'static {
    /// Open a pane for `nick` on `network`. Must not block.
    fn open(&self, network: &str, nick: &str);
}

/// Runs the configured launcher as an external process.
///
/// The launcher is split on whitespace and gets one extra argument,
/// `<client> --network=<network> --private=<nick>`, which it is expected to
/// run (e.g. `tmux new-window`).
#[derive(Debug, Clone)]
pub struct CommandOpener {
    program: Option<String>,
    args: Vec<String>,
    client: String,
}

impl CommandOpener {
    pub fn new(config: &PrivateConfig) -> Self {
        let mut parts = config.command.split_whitespace().map(str::to_string);
        Self {
            program: parts.next(),
            args: parts.collect(),
            client: config.client.clone(),
        }
    }

    /// The extra argument handed to the launcher.
    pub fn client_arg(&self, network: &str, nick: &str) -> String {
        format!("{} --network={} --private={}", self.client, network, nick)
    }

    /// Build the process, or `None` when the inputs are unsafe to pass on.
    ///
    /// Launchers like `tmux new-window` hand their argument to a shell, so
    /// both names must be plain identifiers.
    fn command(&self, network: &str, nick: &str) -> Option<Command> {
        let program = self.program.as_ref()?;
        if !nick.is_valid_nick() {
            warn!(nick = %nick, "Refusing to open pane for invalid nick");
            return None;
        }
        if !is_plain_network(network) {
            warn!(network = %network, "Refusing to open pane for odd network name");
            return None;
        }

        let mut command = Command::new(program);
        command.args(&self.args).arg(self.client_arg(network, nick));
        Some(command)
    }
}

impl PaneOpener for CommandOpener {
    fn open(&self, network: &str, nick: &str) {
        if self.program.is_none() {
            debug!(network = %network, nick = %nick, "No pane launcher configured");
            return;
        }
        let Some(mut command) = self.command(network, nick) else {
            return;
        };

        info!(network = %network, nick = %nick, "Opening private pane");
        let nick = nick.to_string();
        tokio::spawn(async move {
            match command.status().await {
                Ok(status) if status.success() => {}
                Ok(status) => warn!(nick = %nick, status = %status, "Pane launcher failed"),
                Err(e) => warn!(nick = %nick, error = %e, "Failed to run pane launcher"),
            }
        });
    }
}

fn is_plain_network(network: &str) -> bool {
    !network.is_empty()
        && network
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_' | ':'))
}
