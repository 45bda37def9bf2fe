//! IRC numerics the bouncer reacts to.
//!
//! # Reference
//! - RFC 2812 Section 5: Replies
//! - Modern IRC documentation: <https://modern.ircdocs.horse/#numerics>

/// 001 - Welcome to the IRC network. Registration is complete.
pub const RPL_WELCOME: &str = "001";
/// 002 - Your host is running version.
pub const RPL_YOURHOST: &str = "002";
/// 003 - Server creation date.
pub const RPL_CREATED: &str = "003";
/// 004 - Server name, version and supported modes.
pub const RPL_MYINFO: &str = "004";
/// 332 - Channel topic.
pub const RPL_TOPIC: &str = "332";
/// 333 - Who set the topic and when.
pub const RPL_TOPICWHOTIME: &str = "333";
/// 353 - Names list for a channel.
pub const RPL_NAMREPLY: &str = "353";
/// 366 - End of names list.
pub const RPL_ENDOFNAMES: &str = "366";
/// 372 - Message of the day line.
pub const RPL_MOTD: &str = "372";

/// Commands that are only informational and get logged as they pass.
pub const INFO_COMMANDS: [&str; 6] = [
    RPL_WELCOME,
    RPL_YOURHOST,
    RPL_CREATED,
    RPL_MYINFO,
    RPL_MOTD,
    "NOTICE",
];

/// Whether `command` is one of [`INFO_COMMANDS`].
pub fn is_info(command: &str) -> bool {
    INFO_COMMANDS.contains(&command)
}

/// Whether lines with this command only make sense inside a channel, so
/// they are never broadcast to every session of a network.
pub fn requires_channel(command: &str) -> bool {
    command == RPL_NAMREPLY
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_info() {
        assert!(is_info("001"));
        assert!(is_info("NOTICE"));
        assert!(!is_info("PRIVMSG"));
        assert!(!is_info("353"));
    }

    #[test]
    fn test_requires_channel() {
        assert!(requires_channel(RPL_NAMREPLY));
        assert!(!requires_channel(RPL_TOPIC));
    }
}
