//! # hatcog-proto
//!
//! IRC protocol pieces for the hatcog bouncer: a forgiving line parser,
//! CTCP framing, RFC 1459 case mapping, nick and channel name checks,
//! outbound line constructors and a tokio line codec.
//!
//! ## Parsing a line
//!
//! ```rust
//! use hatcog_proto::Line;
//!
//! let line: Line = ":alice!a@example.org PRIVMSG #rust :\x01ACTION waves\x01"
//!     .parse()
//!     .expect("valid line");
//!
//! assert_eq!(line.user, "alice");
//! assert!(line.is_action);
//! assert_eq!(line.content, "waves");
//! ```
//!
//! ## Building outbound lines
//!
//! ```rust
//! use hatcog_proto::outbound;
//!
//! assert_eq!(outbound::action("#rust", "waves"), "PRIVMSG #rust :\x01ACTION waves\x01");
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod casemap;
pub mod chan;
pub mod ctcp;
pub mod error;
pub mod format;
#[cfg(feature = "tokio")]
pub mod line;
pub mod message;
pub mod nick;
pub mod outbound;
pub mod response;

pub use self::casemap::{irc_eq, irc_lower_char, irc_to_lower};
pub use self::chan::ChannelExt;
pub use self::ctcp::{Ctcp, CtcpKind};
pub use self::error::{ParseError, ProtocolError};
#[cfg(feature = "tokio")]
pub use self::line::{LineCodec, MAX_LINE_LEN};
pub use self::message::Line;
pub use self::nick::{NickExt, DEFAULT_NICK_MAX_LEN};
