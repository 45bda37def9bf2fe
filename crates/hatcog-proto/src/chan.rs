//! Channel name detection.
//!
//! Used when tagging inbound lines: a PRIVMSG target that is a channel name
//! scopes the line to that channel, anything else is a direct message.
//!
//! # Reference
//! - RFC 2812 Section 1.3: Channel names

/// Extension trait for checking if a string is an IRC channel name.
pub trait ChannelExt {
    /// Check if this string is a channel name.
    ///
    /// Channel names start with `#`, `&`, `+` or `!`, are at most 50
    /// characters, and carry no spaces, commas or control characters.
    fn is_channel_name(&self) -> bool;
}

impl ChannelExt for str {
    fn is_channel_name(&self) -> bool {
        let mut chars = self.chars();
        if !matches!(chars.next(), Some('#' | '&' | '+' | '!')) {
            return false;
        }

        if self.chars().count() > 50 {
            return false;
        }

        chars.all(|c| c != ' ' && c != ',' && !c.is_control())
    }
}
