//! Channel tagging for inbound lines.

use hatcog_proto::response::{RPL_ENDOFNAMES, RPL_NAMREPLY, RPL_TOPIC, RPL_TOPICWHOTIME};
use hatcog_proto::{ChannelExt, Line};

/// The channel (or private correspondent) a line belongs to, or `""` for
/// network-wide lines.
///
/// Direct messages are keyed by the sender, so a PRIVMSG from bob to us
/// lands in bob's conversation.
pub fn channel_for(line: &Line) -> String {
    let channel = match line.command.as_str() {
        "PRIVMSG" | "NOTICE" => {
            let target = line.arg(0);
            if target.is_channel_name() {
                target
            } else {
                line.user.as_str()
            }
        }
        "JOIN" => {
            let target = line.arg(0);
            if target.is_channel_name() {
                target
            } else if line.content.is_channel_name() {
                line.content.as_str()
            } else {
                ""
            }
        }
        "PART" | "KICK" | "TOPIC" | "MODE" => {
            let target = line.arg(0);
            if target.is_channel_name() { target } else { "" }
        }
        RPL_NAMREPLY => line.arg(2),
        RPL_TOPIC | RPL_TOPICWHOTIME | RPL_ENDOFNAMES => line.arg(1),
        _ => "",
    };
    channel.to_string()
}
