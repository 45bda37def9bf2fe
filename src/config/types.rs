//! Core configuration types and loading.

use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use super::defaults::*;
use super::validation::{self, ValidationError};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {}", join_errors(.0))]
    Invalid(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Bouncer configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Who we are on every network unless a network block overrides it.
    pub identity: IdentityConfig,
    /// Local session listener.
    #[serde(default)]
    pub gateway: GatewayConfig,
    /// Per-connection behaviour.
    #[serde(default)]
    pub connection: ConnectionConfig,
    /// Private conversation pane launcher.
    #[serde(default)]
    pub private: PrivateConfig,
    /// Log output.
    #[serde(default)]
    pub log: LogConfig,
    /// `[[network]]` blocks.
    #[serde(default, rename = "network")]
    pub networks: Vec<NetworkBlock>,
}

impl Config {
    /// Load configuration from a TOML file and validate it.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Run the startup checks, collecting every problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validation::validate(self).map_err(ConfigError::Invalid)
    }

    /// Network blocks to dial at startup.
    pub fn autoconnect(&self) -> impl Iterator<Item = &NetworkBlock> {
        self.networks.iter().filter(|n| n.autoconnect)
    }
}

/// Identity used for registration.
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityConfig {
    /// Nickname.
    pub nick: String,
    /// Real name sent in USER. Defaults to the nick.
    #[serde(default)]
    pub display_name: Option<String>,
}

impl IdentityConfig {
    /// The real name to register with.
    pub fn display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.nick)
    }
}

/// Local session listener configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    /// Address to bind to (default: 127.0.0.1:8790).
    #[serde(default = "default_listen")]
    pub listen: SocketAddr,
    /// Outbound events buffered per session before new ones are dropped.
    #[serde(default = "default_session_queue")]
    pub session_queue: usize,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            session_queue: default_session_queue(),
        }
    }
}

/// Per-connection configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ConnectionConfig {
    /// Read timeout in milliseconds. Bounds how long a closing connection
    /// keeps its read loop alive (default: 1000).
    #[serde(default = "default_read_timeout_ms")]
    pub read_timeout_ms: u64,
    /// Text sent in reply to CTCP VERSION.
    #[serde(default = "default_version")]
    pub version: String,
    /// Capacity of the router's inbound and outbound queues.
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
}

impl ConnectionConfig {
    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            read_timeout_ms: default_read_timeout_ms(),
            version: default_version(),
            channel_capacity: default_channel_capacity(),
        }
    }
}

/// Private conversation pane launcher.
///
/// When a direct message arrives for which no session exists, `command`
/// is split on whitespace and run with one extra argument:
/// `<client> --network=<network> --private=<nick>`.
#[derive(Debug, Clone, Deserialize)]
pub struct PrivateConfig {
    /// Launcher, e.g. `tmux new-window`. Empty disables pane opening.
    #[serde(default)]
    pub command: String,
    /// Client program the launcher starts.
    #[serde(default = "default_private_client")]
    pub client: String,
}

impl Default for PrivateConfig {
    fn default() -> Self {
        Self {
            command: String::new(),
            client: default_private_client(),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LogConfig {
    /// Append every wire line here. Unset disables the raw log.
    #[serde(default)]
    pub raw: Option<PathBuf>,
    /// Diagnostic log format.
    #[serde(default)]
    pub format: LogFormat,
}

/// One `[[network]]` block.
#[derive(Debug, Clone, Deserialize)]
pub struct NetworkBlock {
    /// Network identifier used in session handshakes and logs.
    pub name: String,
    /// Server address as `host:port`.
    pub address: String,
    /// Nick override.
    #[serde(default)]
    pub nick: Option<String>,
    /// Real name override.
    #[serde(default)]
    pub display_name: Option<String>,
    /// NickServ password, sent once the server welcomes us.
    #[serde(default)]
    pub password: Option<String>,
    /// Force TLS on or off. Defaults to TLS on port 6697 only.
    #[serde(default)]
    pub tls: Option<bool>,
    /// Expected SHA-256 fingerprint of the server certificate.
    #[serde(default)]
    pub fingerprint: Option<String>,
    /// Dial at startup (default: true).
    #[serde(default = "default_true")]
    pub autoconnect: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const MINIMAL: &str = r#"
[identity]
nick = "hatcog"
"#;

    const FULL: &str = r#"
[identity]
nick = "hatcog"
display_name = "Hat Cog"

[gateway]
listen = "127.0.0.1:9000"

[connection]
read_timeout_ms = 250
version = "test-version"

[private]
command = "tmux new-window"
client = "hjoin"

[log]
raw = "/tmp/raw.log"
format = "json"

[[network]]
name = "libera"
address = "irc.libera.chat:6697"
password = "hunter2"

[[network]]
name = "local"
address = "127.0.0.1:6667"
nick = "other"
autoconnect = false
"#;

    #[test]
    fn test_minimal_defaults() {
        let config: Config = toml::from_str(MINIMAL).unwrap();
        assert_eq!(config.identity.display_name(), "hatcog");
        assert_eq!(config.gateway.listen, default_listen());
        assert_eq!(config.connection.read_timeout(), Duration::from_secs(1));
        assert!(config.connection.version.starts_with("hatcogd v"));
        assert!(config.private.command.is_empty());
        assert!(config.log.raw.is_none());
        assert!(config.networks.is_empty());
        config.validate().unwrap();
    }

    #[test]
    fn test_full() {
        let config: Config = toml::from_str(FULL).unwrap();
        assert_eq!(config.identity.display_name(), "Hat Cog");
        assert_eq!(config.gateway.listen.port(), 9000);
        assert_eq!(config.connection.read_timeout_ms, 250);
        assert_eq!(config.log.format, LogFormat::Json);
        assert_eq!(config.networks.len(), 2);
        assert!(config.networks[0].autoconnect);
        assert_eq!(config.networks[0].password.as_deref(), Some("hunter2"));

        let auto: Vec<_> = config.autoconnect().map(|n| n.name.as_str()).collect();
        assert_eq!(auto, vec!["libera"]);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(FULL.as_bytes()).unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.identity.nick, "hatcog");
    }

    #[test]
    fn test_example_config_loads() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/hatcogd.example.toml");
        let config = Config::load(path).unwrap();
        assert_eq!(config.autoconnect().count(), 1);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load("/nonexistent/hatcogd.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_load_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"[identity\nnick = ").unwrap();

        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_invalid() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"[identity]\nnick = \"9bad\"\n").unwrap();

        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(err.to_string().contains("9bad"));
    }
}
