//! Configuration loading and management.
//!
//! This module is split into logical submodules:
//! - [`types`]: Config struct definitions and loading
//! - [`validation`]: Startup checks run by [`Config::load`]
//! - `defaults`: serde default value functions

mod defaults;
mod types;
mod validation;

pub use types::{
    Config, ConfigError, ConnectionConfig, GatewayConfig, IdentityConfig, LogConfig, LogFormat,
    NetworkBlock, PrivateConfig,
};
pub use validation::ValidationError;
