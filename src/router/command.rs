//! Slash commands typed into a session.

/// A parsed slash command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserCommand<'a> {
    /// `/pw <password>`: identify with NickServ.
    Identify(&'a str),
    /// `/me <text>`
    Action(&'a str),
    /// `/nick <nick>`
    Nick(&'a str),
    /// `/connect <host:port> [nick] [password]`
    Connect(&'a str),
    /// Anything else, passed to the server verbatim (with the `/`).
    Raw(&'a str),
}

impl<'a> UserCommand<'a> {
    /// Parse session input. Returns `None` for plain text, which includes
    /// a lone `/`.
    ///
    /// ```
    /// use hatcogd::router::UserCommand;
    ///
    /// assert_eq!(UserCommand::parse("/me waves"), Some(UserCommand::Action("waves")));
    /// assert_eq!(UserCommand::parse("/whois bob"), Some(UserCommand::Raw("/whois bob")));
    /// assert_eq!(UserCommand::parse("hello"), None);
    /// ```
    pub fn parse(content: &'a str) -> Option<Self> {
        let body = content.strip_prefix('/').filter(|b| !b.is_empty())?;
        let (cmd, rest) = body.split_once(' ').unwrap_or((body, ""));

        let command = if cmd.eq_ignore_ascii_case("pw") {
            Self::Identify(rest)
        } else if cmd.eq_ignore_ascii_case("me") {
            Self::Action(rest)
        } else if cmd.eq_ignore_ascii_case("nick") {
            Self::Nick(rest.trim())
        } else if cmd.eq_ignore_ascii_case("connect") {
            Self::Connect(rest)
        } else {
            Self::Raw(content)
        };
        Some(command)
    }
}
