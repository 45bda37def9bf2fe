//! Line parsing.
//!
//! One fallible operation, [`Line::parse`], with [`FromStr`] and
//! [`Line::from_bytes`] as thin wrappers over it.

use std::str::FromStr;

use crate::ctcp::{Ctcp, CtcpKind};
use crate::error::ParseError;
use crate::format::trim_control_end;

use super::Line;

impl Line {
    /// Parse one wire line.
    ///
    /// Trailing control characters are trimmed first (CR, LF, a closing
    /// CTCP delimiter), and consecutive spaces between middle parameters
    /// are collapsed.
    ///
    /// # Errors
    ///
    /// - [`ParseError::EmptyLine`] if nothing is left after trimming
    /// - [`ParseError::MalformedPrefix`] if a `:` prefix is empty or is not
    ///   followed by a space
    /// - [`ParseError::MissingCommand`] if there is no command token
    pub fn parse(raw: &str) -> Result<Line, ParseError> {
        let raw = trim_control_end(raw);
        if raw.is_empty() {
            return Err(ParseError::EmptyLine);
        }

        let mut line = Line {
            raw: raw.to_owned(),
            ..Line::default()
        };

        let mut rest = raw;
        if let Some(source) = raw.strip_prefix(':') {
            let (prefix, after) = source
                .split_once(' ')
                .filter(|(prefix, _)| !prefix.is_empty())
                .ok_or_else(|| ParseError::MalformedPrefix(raw.to_owned()))?;

            match prefix.split_once('!') {
                Some((user, host)) => {
                    line.user = user.to_owned();
                    line.host = host.to_owned();
                }
                None => line.host = prefix.to_owned(),
            }
            rest = after;
        }

        let (head, trailing) = match rest.strip_prefix(':') {
            Some(trailing) => ("", Some(trailing)),
            None => match rest.split_once(" :") {
                Some((head, trailing)) => (head, Some(trailing)),
                None => (rest, None),
            },
        };

        let mut tokens = head.split(' ').filter(|t| !t.is_empty());
        line.command = tokens.next().ok_or(ParseError::MissingCommand)?.to_owned();
        line.args = tokens.map(str::to_owned).collect();

        if let Some(trailing) = trailing {
            set_content(&mut line, trim_control_end(trailing));
        }

        Ok(line)
    }

    /// Parse a line from raw socket bytes, replacing invalid UTF-8.
    pub fn from_bytes(bytes: &[u8]) -> Result<Line, ParseError> {
        Line::parse(&String::from_utf8_lossy(bytes))
    }
}

impl FromStr for Line {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Line, Self::Err> {
        Line::parse(s)
    }
}

/// Fill `content`, detecting CTCP framing and `/me` actions.
///
/// Some clients send ACTION without the `\x01` framing, so a bare leading
/// `ACTION ` counts as well.
fn set_content(line: &mut Line, text: &str) {
    if let Some(ctcp) = Ctcp::parse(text) {
        line.is_action = ctcp.kind == CtcpKind::Action;
        line.content = ctcp.params.unwrap_or_default().to_owned();
        line.ctcp = Some(ctcp.kind);
        return;
    }

    if let Some(action) = text.strip_prefix("ACTION ") {
        line.is_action = true;
        line.content = action.to_owned();
    } else if text == "ACTION" {
        line.is_action = true;
    } else {
        line.content = text.to_owned();
    }
}
