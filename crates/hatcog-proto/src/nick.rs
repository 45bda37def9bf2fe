//! Nickname validation.
//!
//! Nicks arriving from a network end up as arguments to the external pane
//! launcher, so anything that is not a plain RFC 2812 nickname is refused
//! before it gets near a process.
//!
//! # Reference
//! - RFC 2812 Section 2.3.1: Message format (nickname definition)

/// Default maximum nickname length accepted.
pub const DEFAULT_NICK_MAX_LEN: usize = 30;

/// Extension trait for checking if a string is a valid IRC nickname.
pub trait NickExt {
    /// Check if this string is a valid IRC nickname per RFC 2812.
    ///
    /// ```
    /// use hatcog_proto::NickExt;
    ///
    /// assert!("bob".is_valid_nick());
    /// assert!("[away]".is_valid_nick());
    /// assert!(!"123nick".is_valid_nick());
    /// assert!(!"bob; rm -rf ~".is_valid_nick());
    /// ```
    fn is_valid_nick(&self) -> bool;

    /// Same as [`NickExt::is_valid_nick`] with a custom max length.
    fn is_valid_nick_len(&self, max_len: usize) -> bool;
}

#[inline]
fn is_special(c: char) -> bool {
    matches!(c, '[' | ']' | '\\' | '`' | '_' | '^' | '{' | '|' | '}')
}

impl NickExt for str {
    fn is_valid_nick(&self) -> bool {
        self.is_valid_nick_len(DEFAULT_NICK_MAX_LEN)
    }

    fn is_valid_nick_len(&self, max_len: usize) -> bool {
        if self.len() > max_len {
            return false;
        }

        let mut chars = self.chars();
        match chars.next() {
            Some(first) if first.is_ascii_alphabetic() || is_special(first) => {}
            _ => return false,
        }

        chars.all(|c| c.is_ascii_alphanumeric() || is_special(c) || c == '-')
    }
}
