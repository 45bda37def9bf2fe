//! One local session.

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tokio_util::codec::{FramedRead, FramedWrite, LinesCodec};
use tracing::{debug, warn};

use super::{Gateway, Hello, SessionEvent};
use crate::router::Message;

/// How long a new session has to send its hello.
const HELLO_TIMEOUT: Duration = Duration::from_secs(10);

/// Longest line a session may send.
const MAX_INPUT_LEN: usize = 4096;

/// Serve one session until it disconnects or the gateway closes.
pub(super) async fn run(gateway: Gateway, id: u64, stream: TcpStream) {
    let (read, write) = stream.into_split();
    let mut lines = FramedRead::new(read, LinesCodec::new_with_max_length(MAX_INPUT_LEN));
    let mut writer = FramedWrite::new(write, LinesCodec::new());

    let hello = match read_hello(&mut lines).await {
        Ok(hello) => hello,
        Err(message) => {
            warn!(error = %message, "Bad session hello");
            let _ = writer
                .send(SessionEvent::Error { message: &message }.to_json())
                .await;
            return;
        }
    };

    let mut events = gateway.attach(id, &hello);
    let shutdown = gateway.inner.shutdown.clone();
    let from_user = gateway.inner.from_user.clone();

    loop {
        tokio::select! {
            _ = shutdown.cancelled() => break,
            Some(event) = events.recv() => {
                if let Err(e) = writer.send(event).await {
                    debug!(error = %e, "Session write failed");
                    break;
                }
            }
            input = lines.next() => match input {
                Some(Ok(content)) => {
                    if content.trim().is_empty() {
                        continue;
                    }
                    let message = Message {
                        network: hello.network.clone(),
                        channel: hello.channel.clone(),
                        content,
                    };
                    if from_user.send(message).await.is_err() {
                        break;
                    }
                }
                Some(Err(e)) => {
                    warn!(error = %e, "Session read failed");
                    break;
                }
                None => break,
            },
        }
    }

    gateway.detach(id);
}

async fn read_hello(
    lines: &mut FramedRead<tokio::net::tcp::OwnedReadHalf, LinesCodec>,
) -> Result<Hello, String> {
    let line = match timeout(HELLO_TIMEOUT, lines.next()).await {
        Ok(Some(Ok(line))) => line,
        Ok(Some(Err(e))) => return Err(e.to_string()),
        Ok(None) => return Err("closed before hello".to_string()),
        Err(_) => return Err("timed out waiting for hello".to_string()),
    };

    let hello: Hello = serde_json::from_str(&line).map_err(|e| format!("invalid hello: {}", e))?;
    if hello.network.is_empty() {
        return Err("hello needs a network".to_string());
    }
    Ok(hello)
}
