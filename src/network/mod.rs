//! Network module.
//!
//! Contains the outbound IRC connections: dialing (plain or TLS), the
//! per-connection read loop, and the registry that owns every live
//! connection on behalf of the router.

mod connection;
mod event;
mod registry;
mod stream;
mod target;
pub mod tls;

pub use connection::{Connection, ConnectionSettings, ReadLoop, channel_for};
pub use event::ServerEvent;
pub use registry::Registry;
pub use stream::IrcStream;
pub use target::{NetworkTarget, TLS_PORT, split_address};
