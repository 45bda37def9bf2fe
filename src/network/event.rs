//! Events flowing from connections (and dial tasks) to the router.

use hatcog_proto::Line;

use super::Connection;
use crate::error::{ConnectionError, DialError};

/// Everything the router receives on its `from_server` channel.
#[derive(Debug)]
pub enum ServerEvent {
    /// A parsed line, tagged with network and channel.
    Line(Line),
    /// A dial finished and registration was sent.
    Connected(Connection),
    /// A dial attempt failed. Nothing was registered.
    DialFailed { network: String, error: DialError },
    /// A read loop ended on its own (EOF or I/O error).
    Disconnected {
        network: String,
        /// Connection id, so a stale disconnect never removes a newer
        /// connection to the same network.
        id: u64,
        reason: ConnectionError,
    },
}
