//! Line-based codec for tokio.
//!
//! Reads and writes newline-terminated lines. Problems that only affect one
//! line (too long, not UTF-8) are yielded as `Err` items instead of codec
//! errors, so a framed reader stays alive and simply moves on to the next
//! line. Only I/O failures end the stream.

use bytes::{Buf, BytesMut};
use tokio_util::codec::{Decoder, Encoder};

use crate::error::{self, ProtocolError};

/// Maximum IRC line length accepted from a server (modern IRC conventions).
pub const MAX_LINE_LEN: usize = 8191;

/// Line-based codec that handles newline-terminated lines.
pub struct LineCodec {
    /// Index of next byte to check for newline
    next_index: usize,
    /// Maximum line length
    max_len: usize,
    /// Dropping the remainder of an over-long line
    discarding: bool,
}

impl Default for LineCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl LineCodec {
    /// Create a new codec accepting lines up to [`MAX_LINE_LEN`] bytes.
    pub fn new() -> Self {
        Self::with_max_len(MAX_LINE_LEN)
    }

    /// Create a new codec with custom max line length.
    pub fn with_max_len(max_len: usize) -> Self {
        Self {
            next_index: 0,
            max_len,
            discarding: false,
        }
    }
}

impl Decoder for LineCodec {
    type Item = error::Result<String>;
    type Error = ProtocolError;

    fn decode(&mut self, src: &mut BytesMut) -> error::Result<Option<Self::Item>> {
        loop {
            let Some(offset) = src[self.next_index..].iter().position(|b| *b == b'\n') else {
                // No complete line yet
                if self.discarding {
                    src.clear();
                    self.next_index = 0;
                    return Ok(None);
                }
                if src.len() > self.max_len {
                    let actual = src.len();
                    src.clear();
                    self.next_index = 0;
                    self.discarding = true;
                    return Ok(Some(Err(ProtocolError::MessageTooLong {
                        actual,
                        limit: self.max_len,
                    })));
                }
                self.next_index = src.len();
                return Ok(None);
            };

            let end = self.next_index + offset + 1;
            self.next_index = 0;

            if self.discarding {
                src.advance(end);
                self.discarding = false;
                continue;
            }

            let line = src.split_to(end);
            if line.len() > self.max_len {
                return Ok(Some(Err(ProtocolError::MessageTooLong {
                    actual: line.len(),
                    limit: self.max_len,
                })));
            }

            let decoded = String::from_utf8(line.to_vec()).map_err(|e| {
                let byte_pos = e.utf8_error().valid_up_to();
                let details = e.utf8_error().to_string();
                ProtocolError::InvalidUtf8 {
                    raw_line: e.into_bytes(),
                    byte_pos,
                    details,
                }
            });
            return Ok(Some(decoded));
        }
    }
}

impl Encoder<String> for LineCodec {
    type Error = ProtocolError;

    fn encode(&mut self, msg: String, dst: &mut BytesMut) -> error::Result<()> {
        dst.extend_from_slice(msg.as_bytes());
        Ok(())
    }
}
