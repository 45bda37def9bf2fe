//! Control character utilities.
//!
//! IRC content may carry formatting codes (bold, colour, the CTCP delimiter
//! and friends), see <https://modern.ircdocs.horse/formatting>. Inbound lines
//! are normalized by trimming trailing control characters; outbound lines are
//! cut at the first line ending so one send can never smuggle a second
//! command onto the wire.

/// Trim trailing control characters (CR, LF, CTCP delimiters, formatting).
///
/// This is the normalization applied to a whole wire line and again to its
/// trailing parameter.
///
/// ```
/// use hatcog_proto::format::trim_control_end;
///
/// assert_eq!(trim_control_end("PING :x\r\n"), "PING :x");
/// assert_eq!(trim_control_end("\x01VERSION\x01"), "\x01VERSION");
/// ```
#[inline]
pub fn trim_control_end(s: &str) -> &str {
    s.trim_end_matches(|c: char| c.is_control())
}

/// Cut an outbound line at its first line ending, dropping the terminator.
///
/// ```
/// use hatcog_proto::format::first_line;
///
/// assert_eq!(first_line("PRIVMSG #a :hi\r\nQUIT"), "PRIVMSG #a :hi");
/// assert_eq!(first_line("NICK me"), "NICK me");
/// ```
pub fn first_line(s: &str) -> &str {
    match s.find(['\r', '\n']) {
        Some(pos) => &s[..pos],
        None => s,
    }
}
