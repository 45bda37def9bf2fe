//! Property-based tests for line parsing.
//!
//! Uses proptest to generate IRC line components and verify that:
//! 1. Parsing never panics, whatever the input
//! 2. Lines built from known components parse back into those components
//! 3. Re-parsing the normalized `raw` text gives the same line

use hatcog_proto::{outbound, Line, ParseError};
use proptest::prelude::*;

fn nickname_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z\\[\\]\\\\^_`{|}][a-zA-Z0-9\\-\\[\\]\\\\^_`{|}]{0,8}")
        .expect("valid regex")
}

fn username_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z][a-zA-Z0-9]{0,9}").expect("valid regex")
}

fn hostname_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z0-9]+(\\.[a-z0-9]+)*").expect("valid regex")
}

fn channel_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[#&][a-zA-Z0-9_\\-]{1,49}").expect("valid regex")
}

/// Message text with no control characters and no `ACTION` marker.
fn text_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z0-9 .,:!?']{0,300}")
        .expect("valid regex")
        .prop_filter("no action marker", |s| !s.starts_with("ACTION"))
}

fn middle_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z0-9#*=@]{1,12}").expect("valid regex")
}

proptest! {
    #[test]
    fn parse_never_panics(input in "\\PC*") {
        let _ = Line::parse(&input);
    }

    #[test]
    fn parse_never_panics_on_bytes(input in prop::collection::vec(any::<u8>(), 0..600)) {
        let _ = Line::from_bytes(&input);
    }

    #[test]
    fn privmsg_components_survive(
        nick in nickname_strategy(),
        user in username_strategy(),
        host in hostname_strategy(),
        channel in channel_strategy(),
        text in text_strategy(),
    ) {
        let raw = format!(":{}!{}@{} {}\r\n", nick, user, host, outbound::privmsg(&channel, &text));
        let line = Line::parse(&raw).unwrap();

        prop_assert_eq!(&line.user, &nick);
        prop_assert_eq!(line.host, format!("{}@{}", user, host));
        prop_assert_eq!(line.command, "PRIVMSG");
        prop_assert_eq!(line.args, vec![channel]);
        prop_assert_eq!(line.content, text);
        prop_assert!(!line.is_action);
    }

    #[test]
    fn actions_survive(channel in channel_strategy(), text in "[a-z][a-z0-9 ]{0,100}[a-z]") {
        let line = Line::parse(&outbound::action(&channel, &text)).unwrap();
        prop_assert!(line.is_action);
        prop_assert_eq!(line.content, text);
    }

    #[test]
    fn spaces_between_params_collapse(
        params in prop::collection::vec(middle_strategy(), 0..6),
        gap in 1usize..4,
    ) {
        let sep = " ".repeat(gap);
        let raw = format!("CMD{}{}", sep, params.join(&sep));
        let line = Line::parse(&raw).unwrap();

        prop_assert_eq!(line.command, "CMD");
        prop_assert_eq!(line.args, params);
    }

    #[test]
    fn reparse_of_raw_is_stable(input in "[ -~]{0,200}") {
        if let Ok(line) = Line::parse(&input) {
            let again = Line::parse(&line.raw).unwrap();
            prop_assert_eq!(again, line);
        }
    }

    #[test]
    fn only_line_endings_is_empty(endings in "[\r\n]{0,8}") {
        prop_assert_eq!(Line::parse(&endings), Err(ParseError::EmptyLine));
    }
}
