//! Parsed IRC lines.
//!
//! A [`Line`] is the bouncer's view of one wire message: who sent it, the
//! verb, its middle parameters and the trailing text, plus the routing tags
//! (`network`, `channel`) the connection layer attaches afterwards.

mod parse;

use std::fmt;

use crate::ctcp::CtcpKind;

/// A parsed IRC protocol line.
///
/// # Example
///
/// ```
/// use hatcog_proto::Line;
///
/// let line = Line::parse(":bob!bob@example.org PRIVMSG #rust :hi there").unwrap();
/// assert_eq!(line.user, "bob");
/// assert_eq!(line.host, "bob@example.org");
/// assert_eq!(line.command, "PRIVMSG");
/// assert_eq!(line.args, vec!["#rust"]);
/// assert_eq!(line.content, "hi there");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Line {
    /// The normalized wire text this line was parsed from.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub raw: String,
    /// Sender nick, empty unless the prefix had the `nick!host` form.
    pub user: String,
    /// Sender host, or the server name for server-originated lines.
    pub host: String,
    /// The verb or three digit numeric.
    pub command: String,
    /// Middle parameters, excluding the trailing one.
    pub args: Vec<String>,
    /// Trailing parameter with any CTCP framing removed.
    pub content: String,
    /// Whether `content` is the text of a CTCP ACTION (`/me`).
    pub is_action: bool,
    /// CTCP verb when the trailing parameter was CTCP framed.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub ctcp: Option<CtcpKind>,
    /// Network the line arrived on. Set by the connection, never the parser.
    pub network: String,
    /// Channel or correspondent the line belongs to. Set by the connection.
    pub channel: String,
}

impl Line {
    /// Tag this line with the network it arrived on and its channel.
    #[must_use]
    pub fn routed(mut self, network: impl Into<String>, channel: impl Into<String>) -> Self {
        self.network = network.into();
        self.channel = channel.into();
        self
    }

    /// Whether the trailing parameter was CTCP framed with the given kind.
    pub fn is_ctcp(&self, kind: &CtcpKind) -> bool {
        self.ctcp.as_ref() == Some(kind)
    }

    /// Middle parameter at `index`, or `""` when absent.
    pub fn arg(&self, index: usize) -> &str {
        self.args.get(index).map(String::as_str).unwrap_or("")
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
