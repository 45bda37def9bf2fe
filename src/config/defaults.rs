//! Default value functions for configuration.
//!
//! Separated into its own module for clarity and reuse.

use std::net::{Ipv4Addr, SocketAddr};

/// Returns `true` (for serde defaults).
pub fn default_true() -> bool {
    true
}

// =============================================================================
// Gateway Defaults
// =============================================================================

pub fn default_listen() -> SocketAddr {
    SocketAddr::from((Ipv4Addr::LOCALHOST, 8790))
}

pub fn default_session_queue() -> usize {
    256
}

// =============================================================================
// Connection Defaults
// =============================================================================

pub fn default_read_timeout_ms() -> u64 {
    1000
}

pub fn default_version() -> String {
    format!("hatcogd v{}", env!("CARGO_PKG_VERSION"))
}

pub fn default_channel_capacity() -> usize {
    1024
}

// =============================================================================
// Private Pane Defaults
// =============================================================================

pub fn default_private_client() -> String {
    "hjoin".to_string()
}
