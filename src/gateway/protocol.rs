//! Local session wire protocol.
//!
//! Newline-delimited over TCP. The client opens with one JSON [`Hello`]
//! naming the conversation it shows; every later line is text typed by the
//! user. The gateway answers with JSON [`SessionEvent`]s tagged by `type`.

use hatcog_proto::Line;
use serde::{Deserialize, Serialize};
use tracing::error;

/// First line sent by a session.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Hello {
    pub network: String,
    /// Channel, or the correspondent's nick for a private conversation.
    pub channel: String,
}

/// Events written to sessions.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent<'a> {
    /// Sent once after a valid hello.
    Welcome { nick: &'a str },
    /// Our nick changed.
    Nick { nick: &'a str },
    /// A line from the network.
    Line(&'a Line),
    /// A rejected hello, or a failure acting on the session's input.
    Error { message: &'a str },
}

impl SessionEvent<'_> {
    /// Serialize to one JSON line (without the newline).
    pub fn to_json(&self) -> String {
        match serde_json::to_string(self) {
            Ok(json) => json,
            Err(e) => {
                error!(error = %e, "Failed to serialize session event");
                String::from(r#"{"type":"error","message":"serialization failed"}"#)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    #[test]
    fn test_hello() {
        let hello: Hello = serde_json::from_str(r##"{"network":"libera","channel":"#rust"}"##).unwrap();
        assert_eq!(hello.network, "libera");
        assert_eq!(hello.channel, "#rust");

        assert!(serde_json::from_str::<Hello>(r#"{"network":"libera"}"#).is_err());
    }

    #[test]
    fn test_welcome_and_nick() {
        let welcome: Value = serde_json::from_str(&SessionEvent::Welcome { nick: "me" }.to_json()).unwrap();
        assert_eq!(welcome, json!({"type": "welcome", "nick": "me"}));

        let nick: Value = serde_json::from_str(&SessionEvent::Nick { nick: "new" }.to_json()).unwrap();
        assert_eq!(nick, json!({"type": "nick", "nick": "new"}));
    }

    #[test]
    fn test_line_event() {
        let line = Line::parse(":bob!b@h PRIVMSG #rust :hi")
            .unwrap()
            .routed("libera", "#rust");
        let event: Value = serde_json::from_str(&SessionEvent::Line(&line).to_json()).unwrap();

        assert_eq!(
            event,
            json!({
                "type": "line",
                "user": "bob",
                "host": "b@h",
                "command": "PRIVMSG",
                "args": ["#rust"],
                "content": "hi",
                "is_action": false,
                "network": "libera",
                "channel": "#rust",
            })
        );
    }
}
