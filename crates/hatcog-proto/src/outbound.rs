//! Outbound line constructors.
//!
//! Each function returns the wire text of one command without a line
//! terminator; the connection adds it when sending.

use std::fmt::Display;

use crate::ctcp::Ctcp;

/// `USER <nick> localhost localhost :<display name>`
pub fn user(nick: &str, display_name: &str) -> String {
    format!("USER {} localhost localhost :{}", nick, display_name)
}

/// `NICK <nick>`
pub fn nick(nick: &str) -> String {
    format!("NICK {}", nick)
}

/// `PRIVMSG <target> :<text>`
pub fn privmsg(target: &str, text: impl Display) -> String {
    format!("PRIVMSG {} :{}", target, text)
}

/// `NOTICE <target> :<text>`
pub fn notice(target: &str, text: impl Display) -> String {
    format!("NOTICE {} :{}", target, text)
}

/// `PRIVMSG <target> :\x01ACTION <text>\x01`
pub fn action(target: &str, text: &str) -> String {
    privmsg(target, Ctcp::action(text))
}

/// `NOTICE <target> :\x01VERSION <version>\x01`
pub fn version_reply(target: &str, version: &str) -> String {
    notice(target, Ctcp::version_reply(version))
}

/// `PRIVMSG NickServ :identify <password>`
pub fn identify(password: &str) -> String {
    privmsg("NickServ", format_args!("identify {}", password))
}

/// `PONG :<token>`
pub fn pong(token: &str) -> String {
    format!("PONG :{}", token)
}
