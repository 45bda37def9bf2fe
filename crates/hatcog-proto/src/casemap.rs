//! RFC 1459 case mapping.
//!
//! Nicks and channel names compare case-insensitively on IRC, and under the
//! `rfc1459` mapping `[]\~` are the uppercase forms of `{}|^`. The router
//! uses this to decide whether a private message's sender and target are
//! the same correspondent, and the gateway uses it to match sessions.

/// Lowercase a single character under RFC 1459 rules.
#[inline]
pub const fn irc_lower_char(c: char) -> char {
    match c {
        '[' => '{',
        ']' => '}',
        '\\' => '|',
        '~' => '^',
        'A'..='Z' => (c as u8 + 32) as char,
        _ => c,
    }
}

/// Lowercase a string under RFC 1459 rules.
///
/// ```
/// use hatcog_proto::irc_to_lower;
///
/// assert_eq!(irc_to_lower("#Rust[Dev]"), "#rust{dev}");
/// ```
pub fn irc_to_lower(s: &str) -> String {
    s.chars().map(irc_lower_char).collect()
}

/// Compare two names case-insensitively under RFC 1459 rules.
pub fn irc_eq(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    a.chars()
        .zip(b.chars())
        .all(|(ca, cb)| irc_lower_char(ca) == irc_lower_char(cb))
}
