//! Where and as whom to connect.

use hatcog_proto::NickExt;

use crate::config::{IdentityConfig, NetworkBlock};
use crate::error::TargetError;

/// Conventional port for IRC over TLS.
pub const TLS_PORT: u16 = 6697;

/// Split `host:port` (or `[v6]:port`) into its parts.
///
/// Returns `None` when there is no port, the port is not a number, or the
/// host is empty.
pub fn split_address(address: &str) -> Option<(&str, u16)> {
    let (host, port) = match address.strip_prefix('[') {
        Some(rest) => rest.split_once("]:")?,
        None => {
            let (host, port) = address.rsplit_once(':')?;
            if host.contains(':') {
                return None;
            }
            (host, port)
        }
    };

    if host.is_empty() {
        return None;
    }
    Some((host, port.parse().ok()?))
}

/// Everything needed to dial and register with one network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkTarget {
    /// Network identifier.
    pub network: String,
    /// `host:port`
    pub address: String,
    pub nick: String,
    pub display_name: String,
    /// NickServ password, sent after the welcome numeric.
    pub password: Option<String>,
    pub tls: bool,
    /// Pinned SHA-256 certificate fingerprint.
    pub fingerprint: Option<String>,
}

impl NetworkTarget {
    /// Build a target from a `[[network]]` block, falling back to the
    /// global identity.
    pub fn from_block(block: &NetworkBlock, identity: &IdentityConfig) -> Self {
        Self {
            network: block.name.clone(),
            address: block.address.clone(),
            nick: block.nick.clone().unwrap_or_else(|| identity.nick.clone()),
            display_name: block
                .display_name
                .clone()
                .unwrap_or_else(|| identity.display_name().to_string()),
            password: block.password.clone().filter(|p| !p.is_empty()),
            tls: block.tls.unwrap_or_else(|| uses_tls_port(&block.address)),
            fingerprint: block.fingerprint.clone(),
        }
    }

    /// Parse `/connect` arguments: `<host:port> [nick] [password]`.
    ///
    /// The network identifier is the host part of the address.
    ///
    /// ```
    /// use hatcogd::network::NetworkTarget;
    ///
    /// let target = NetworkTarget::from_connect_args("irc.libera.chat:6697 bob", "me", "Me").unwrap();
    /// assert_eq!(target.network, "irc.libera.chat");
    /// assert_eq!(target.nick, "bob");
    /// assert!(target.tls);
    /// ```
    pub fn from_connect_args(
        args: &str,
        nick: &str,
        display_name: &str,
    ) -> Result<Self, TargetError> {
        let mut parts = args.split_whitespace();
        let address = parts.next().ok_or(TargetError::MissingAddress)?;
        let (host, _) =
            split_address(address).ok_or_else(|| TargetError::InvalidAddress(address.to_string()))?;

        let nick = parts.next().unwrap_or(nick);
        if !nick.is_valid_nick() {
            return Err(TargetError::InvalidNick(nick.to_string()));
        }

        Ok(Self {
            network: host.to_string(),
            address: address.to_string(),
            nick: nick.to_string(),
            display_name: display_name.to_string(),
            password: parts.next().map(str::to_string),
            tls: uses_tls_port(address),
            fingerprint: None,
        })
    }

    /// Host part of the address, used for TLS server name checks.
    pub fn host(&self) -> &str {
        split_address(&self.address)
            .map(|(host, _)| host)
            .unwrap_or(&self.address)
    }
}

fn uses_tls_port(address: &str) -> bool {
    split_address(address).is_some_and(|(_, port)| port == TLS_PORT)
}
