//! hatcogd - IRC bouncer daemon.
//!
//! Usage: `hatcogd [config.toml]` (default `hatcogd.toml`).

use std::sync::Arc;

use hatcogd::config::Config;
use hatcogd::gateway::Gateway;
use hatcogd::network::{ConnectionSettings, NetworkTarget, Registry};
use hatcogd::rawlog::RawLog;
use hatcogd::router::{CommandOpener, Router};
use hatcogd::telemetry;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "hatcogd.toml".to_string());

    // Logging is not up yet, so a bad config goes to stderr
    let config = Config::load(&config_path).map_err(|e| {
        eprintln!("hatcogd: failed to load {}: {}", config_path, e);
        e
    })?;

    telemetry::init(config.log.format);
    info!(
        nick = %config.identity.nick,
        networks = config.networks.len(),
        "Starting hatcogd"
    );

    let raw_log = match &config.log.raw {
        Some(path) => {
            let log = RawLog::open(path).map_err(|e| {
                error!(path = %path.display(), error = %e, "Failed to open raw log");
                e
            })?;
            info!(path = %path.display(), "Logging raw IRC traffic");
            log
        }
        None => RawLog::disabled(),
    };

    let capacity = config.connection.channel_capacity.max(1);
    let (server_tx, server_rx) = mpsc::channel(capacity);
    let (user_tx, user_rx) = mpsc::channel(capacity);

    let registry = Registry::new(
        server_tx,
        Arc::new(raw_log),
        ConnectionSettings::from(&config.connection),
    );
    let gateway = Gateway::bind(&config.gateway, &config.identity.nick, user_tx).await?;
    let opener = CommandOpener::new(&config.private);
    if config.private.command.trim().is_empty() {
        warn!("private.command is not set, private panes will not open");
    }

    let router = Router::new(
        &config.identity,
        registry,
        gateway,
        opener,
        server_rx,
        user_rx,
    );

    for block in config.autoconnect() {
        router.connect(NetworkTarget::from_block(block, &config.identity));
    }

    router
        .run(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!(error = %e, "Failed to listen for Ctrl-C");
                std::future::pending::<()>().await;
            }
        })
        .await;

    info!("hatcogd stopped");
    Ok(())
}
