//! Integration test common infrastructure.
//!
//! Runs the bouncer in-process against a scripted fake IRC server, with
//! test clients attached through the real gateway.

pub mod client;
pub mod irc;

#[allow(unused_imports)]
pub use client::TestClient;
#[allow(unused_imports)]
pub use irc::{FakeIrcServer, ServerConn};

use std::path::Path;
use std::sync::Arc;

use hatcogd::config::{GatewayConfig, IdentityConfig};
use hatcogd::gateway::Gateway;
use hatcogd::network::{ConnectionSettings, NetworkTarget, Registry};
use hatcogd::rawlog::RawLog;
use hatcogd::router::{PaneOpener, Router};
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

/// Network name the harness registers the fake server under.
pub const NETWORK: &str = "test";

/// Version text the bouncer answers VERSION queries with.
pub const VERSION: &str = "hatcogd-test";

/// Records pane requests instead of running a process.
pub struct RecordingOpener(mpsc::UnboundedSender<(String, String)>);

impl PaneOpener for RecordingOpener {
    fn open(&self, network: &str, nick: &str) {
        let _ = self.0.send((network.to_string(), nick.to_string()));
    }
}

/// A running bouncer wired to one fake network.
pub struct Harness {
    pub irc: FakeIrcServer,
    pub gateway: Gateway,
    pub panes: mpsc::UnboundedReceiver<(String, String)>,
    shutdown: Option<oneshot::Sender<()>>,
    router: Option<JoinHandle<()>>,
}

impl Harness {
    /// Start the bouncer and dial the fake server without a password.
    pub async fn start() -> anyhow::Result<Self> {
        Self::start_with(None, None).await
    }

    /// Start the bouncer, dialing with `password` and logging raw traffic
    /// to `raw_log` if given.
    pub async fn start_with(password: Option<&str>, raw_log: Option<&Path>) -> anyhow::Result<Self> {
        let irc = FakeIrcServer::bind().await?;

        let raw_log = match raw_log {
            Some(path) => RawLog::open(path)?,
            None => RawLog::disabled(),
        };
        let settings = ConnectionSettings {
            read_timeout: Duration::from_millis(100),
            version: VERSION.to_string(),
        };

        let (server_tx, server_rx) = mpsc::channel(64);
        let (user_tx, user_rx) = mpsc::channel(64);
        let (pane_tx, panes) = mpsc::unbounded_channel();

        let identity = IdentityConfig {
            nick: "me".to_string(),
            display_name: Some("Test User".to_string()),
        };
        let gateway_config = GatewayConfig {
            listen: "127.0.0.1:0".parse()?,
            session_queue: 64,
        };

        let registry = Registry::new(server_tx, Arc::new(raw_log), settings);
        let gateway = Gateway::bind(&gateway_config, &identity.nick, user_tx).await?;
        let router = Router::new(
            &identity,
            registry,
            gateway.clone(),
            RecordingOpener(pane_tx),
            server_rx,
            user_rx,
        );

        router.connect(NetworkTarget {
            network: NETWORK.to_string(),
            address: irc.address(),
            nick: identity.nick.clone(),
            display_name: "Test User".to_string(),
            password: password.map(str::to_string),
            tls: false,
            fingerprint: None,
        });

        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let router = tokio::spawn(router.run(async {
            let _ = shutdown_rx.await;
        }));

        Ok(Self {
            irc,
            gateway,
            panes,
            shutdown: Some(shutdown_tx),
            router: Some(router),
        })
    }

    /// Attach a session for `channel` on the test network and consume its
    /// welcome.
    pub async fn session(&self, channel: &str) -> anyhow::Result<TestClient> {
        self.session_on(NETWORK, channel).await
    }

    /// Attach a session for `channel` on `network` and consume its welcome.
    pub async fn session_on(&self, network: &str, channel: &str) -> anyhow::Result<TestClient> {
        let mut client = TestClient::connect(self.gateway.local_addr(), network, channel).await?;
        let welcome = client.recv().await?;
        anyhow::ensure!(welcome["type"] == "welcome", "expected welcome, got {welcome}");
        Ok(client)
    }

    /// Stop the router and wait for it to close everything.
    pub async fn stop(mut self) -> anyhow::Result<()> {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(router) = self.router.take() {
            tokio::time::timeout(Duration::from_secs(5), router).await??;
        }
        Ok(())
    }
}

/// Accept the bouncer's connection, check its registration, then send the
/// welcome numeric and wait until `session` sees it. After this the router
/// has the connection registered.
pub async fn register(harness: &Harness, session: &mut TestClient) -> anyhow::Result<ServerConn> {
    let mut conn = harness.irc.accept().await?;
    conn.expect("USER me localhost localhost :Test User").await?;
    conn.expect("NICK me").await?;

    conn.send(":irc.test 001 me :Welcome to the test network").await?;
    session
        .recv_until(|event| event["type"] == "line" && event["command"] == "001")
        .await?;
    Ok(conn)
}
