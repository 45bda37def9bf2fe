//! Scripted fake IRC server.
//!
//! Accepts the bouncer's outbound connection and lets a test read what the
//! bouncer sends and write what a real server would.

use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpListener;
use tokio::time::timeout;

/// A listening fake IRC server.
pub struct FakeIrcServer {
    listener: TcpListener,
}

impl FakeIrcServer {
    /// Bind on a random local port.
    pub async fn bind() -> anyhow::Result<Self> {
        Ok(Self {
            listener: TcpListener::bind("127.0.0.1:0").await?,
        })
    }

    /// `host:port` to dial.
    pub fn address(&self) -> String {
        self.listener
            .local_addr()
            .map(|a| a.to_string())
            .unwrap_or_default()
    }

    /// Wait for the bouncer to connect.
    pub async fn accept(&self) -> anyhow::Result<ServerConn> {
        let (stream, _) = timeout(Duration::from_secs(5), self.listener.accept()).await??;
        let (read, writer) = stream.into_split();
        Ok(ServerConn {
            reader: BufReader::new(read),
            writer,
        })
    }
}

/// The server side of one bouncer connection.
pub struct ServerConn {
    reader: BufReader<OwnedReadHalf>,
    writer: OwnedWriteHalf,
}

impl ServerConn {
    /// Send one line, adding CRLF.
    pub async fn send(&mut self, line: &str) -> anyhow::Result<()> {
        self.writer.write_all(format!("{}\r\n", line).as_bytes()).await?;
        Ok(())
    }

    /// Next line from the bouncer, without its terminator.
    pub async fn recv(&mut self) -> anyhow::Result<String> {
        self.recv_timeout(Duration::from_secs(5)).await
    }

    /// Next line from the bouncer, or an error after `dur`.
    pub async fn recv_timeout(&mut self, dur: Duration) -> anyhow::Result<String> {
        let mut line = String::new();
        let n = timeout(dur, self.reader.read_line(&mut line)).await??;
        anyhow::ensure!(n > 0, "bouncer closed the connection");
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Receive the next line and check it.
    pub async fn expect(&mut self, expected: &str) -> anyhow::Result<()> {
        let line = self.recv().await?;
        anyhow::ensure!(line == expected, "expected {expected:?}, got {line:?}");
        Ok(())
    }

    /// Assert nothing arrives within `dur`.
    pub async fn expect_silence(&mut self, dur: Duration) -> anyhow::Result<()> {
        match self.recv_timeout(dur).await {
            Ok(line) => anyhow::bail!("expected silence, got {line:?}"),
            Err(_) => Ok(()),
        }
    }

    /// Drop the connection from the server side.
    pub async fn hang_up(mut self) -> anyhow::Result<()> {
        self.writer.shutdown().await?;
        Ok(())
    }
}
