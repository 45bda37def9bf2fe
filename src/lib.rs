//! hatcogd - an IRC bouncer.
//!
//! Holds connections to any number of IRC networks and relays them to
//! local sessions, one per channel or private conversation:
//!
//! - [`network`]: dialing, the per-connection read loop and the registry
//! - [`router`]: the single task routing between networks and sessions
//! - [`gateway`]: the local session listener
//! - [`config`], [`rawlog`], [`telemetry`]: the ambient pieces wired up in
//!   `main`

pub mod config;
pub mod error;
pub mod gateway;
pub mod network;
pub mod rawlog;
pub mod router;
pub mod telemetry;
