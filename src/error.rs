//! Unified error handling for hatcogd.
//!
//! Each layer has its own error enum. Errors are logged where they stop,
//! labeled with [`error_code`](DialError::error_code) so log lines group
//! cleanly; none of them take the whole process down once it is running.

use std::io;

use hatcog_proto::ProtocolError;
use thiserror::Error;

// ============================================================================
// Dial Errors (opening a network connection)
// ============================================================================

/// Failures while opening a connection to an IRC network.
#[derive(Debug, Error)]
pub enum DialError {
    #[error("failed to connect to {address}: {source}")]
    Connect {
        address: String,
        #[source]
        source: io::Error,
    },

    #[error("TLS handshake with {host} failed: {source}")]
    Tls {
        host: String,
        #[source]
        source: io::Error,
    },

    #[error("invalid TLS server name: {0}")]
    InvalidServerName(String),

    #[error("certificate fingerprint mismatch for {host}: expected {expected}, got {actual}")]
    FingerprintMismatch {
        host: String,
        expected: String,
        actual: String,
    },

    #[error("registration handshake failed: {0}")]
    Handshake(#[source] ConnectionError),
}

impl DialError {
    /// Get a static error code string for log labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Connect { .. } => "connect",
            Self::Tls { .. } => "tls",
            Self::InvalidServerName(_) => "invalid_server_name",
            Self::FingerprintMismatch { .. } => "fingerprint_mismatch",
            Self::Handshake(_) => "handshake",
        }
    }
}

// ============================================================================
// Connection Errors (an established connection)
// ============================================================================

/// Failures on an established connection. Each one ends only that
/// connection.
#[derive(Debug, Error)]
pub enum ConnectionError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    #[error("connection closed by server")]
    Closed,

    #[error("router is gone")]
    RouterGone,
}

impl ConnectionError {
    /// Get a static error code string for log labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::Protocol(_) => "protocol",
            Self::Closed => "closed",
            Self::RouterGone => "router_gone",
        }
    }
}

// ============================================================================
// Registry Errors (routing a send to a network)
// ============================================================================

/// Errors from [`Registry`](crate::network::Registry) operations.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("not connected to network {0:?}")]
    UnknownNetwork(String),

    #[error("send to {network} failed: {source}")]
    Connection {
        network: String,
        #[source]
        source: ConnectionError,
    },
}

impl RegistryError {
    /// Get a static error code string for log labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownNetwork(_) => "unknown_network",
            Self::Connection { source, .. } => source.error_code(),
        }
    }
}

// ============================================================================
// Target Errors (`/connect` arguments)
// ============================================================================

/// Malformed `/connect` arguments or network blocks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TargetError {
    #[error("usage: /connect <host:port> [nick] [password]")]
    MissingAddress,

    #[error("address must be host:port, got {0:?}")]
    InvalidAddress(String),

    #[error("invalid nick: {0:?}")]
    InvalidNick(String),
}

impl TargetError {
    /// Get a static error code string for log labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingAddress => "missing_address",
            Self::InvalidAddress(_) => "invalid_address",
            Self::InvalidNick(_) => "invalid_nick",
        }
    }
}
