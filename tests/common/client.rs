//! Test session client.
//!
//! Speaks the gateway's local protocol: a JSON hello, then plain text in and
//! JSON events out.

use std::net::SocketAddr;
use std::time::Duration;

use serde_json::{Value, json};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::time::timeout;

/// A test session attached to the gateway.
pub struct TestClient {
    reader: BufReader<OwnedReadHalf>,
    writer: OwnedWriteHalf,
}

impl TestClient {
    /// Connect and send the hello for `network`/`channel`.
    pub async fn connect(address: SocketAddr, network: &str, channel: &str) -> anyhow::Result<Self> {
        let stream = TcpStream::connect(address).await?;
        let (read, writer) = stream.into_split();
        let mut client = Self {
            reader: BufReader::new(read),
            writer,
        };

        let hello = json!({ "network": network, "channel": channel });
        client.send(&hello.to_string()).await?;
        Ok(client)
    }

    /// Send one line of user input.
    pub async fn send(&mut self, line: &str) -> anyhow::Result<()> {
        self.writer.write_all(format!("{}\n", line).as_bytes()).await?;
        Ok(())
    }

    /// Receive one event.
    pub async fn recv(&mut self) -> anyhow::Result<Value> {
        self.recv_timeout(Duration::from_secs(5)).await
    }

    /// Receive one event, or an error after `dur`.
    pub async fn recv_timeout(&mut self, dur: Duration) -> anyhow::Result<Value> {
        let mut line = String::new();
        let n = timeout(dur, self.reader.read_line(&mut line)).await??;
        anyhow::ensure!(n > 0, "gateway closed the session");
        Ok(serde_json::from_str(&line)?)
    }

    /// Receive events until one matches, returning it.
    pub async fn recv_until<F>(&mut self, mut predicate: F) -> anyhow::Result<Value>
    where
        F: FnMut(&Value) -> bool,
    {
        loop {
            let event = self.recv().await?;
            if predicate(&event) {
                return Ok(event);
            }
        }
    }
}
