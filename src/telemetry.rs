//! Logging setup and span constructors.

use tracing_subscriber::EnvFilter;

use crate::config::LogFormat;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` overrides the default `info` filter.
pub fn init(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

/// Standardized span constructors for bouncer observability.
pub mod spans {
    use std::net::SocketAddr;

    use tracing::{Span, info_span};

    /// Create a span for a dial attempt.
    pub fn dial(network: &str, address: &str) -> Span {
        info_span!("dial", network = %network, address = %address)
    }

    /// Create a span for a local gateway session.
    pub fn session(id: u64, peer: SocketAddr) -> Span {
        info_span!("session", id = id, peer = %peer)
    }
}
