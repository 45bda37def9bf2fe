//! Configuration validation.
//!
//! Validates configuration at startup to catch common errors early.

use std::collections::HashSet;

use hatcog_proto::NickExt;
use thiserror::Error;

use super::Config;
use crate::network::{split_address, tls};

/// Validation errors for configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("invalid nick {0:?}")]
    InvalidNick(String),
    #[error("network.name is required")]
    MissingNetworkName,
    #[error("network {0:?} is defined twice")]
    DuplicateNetwork(String),
    #[error("network {network:?}: address must be host:port, got {address:?}")]
    InvalidAddress { network: String, address: String },
    #[error("network {network:?}: fingerprint must be 32 hex bytes, got {fingerprint:?}")]
    InvalidFingerprint { network: String, fingerprint: String },
    #[error("network {0:?}: fingerprint set but tls is disabled")]
    FingerprintWithoutTls(String),
    #[error("connection.read_timeout_ms must be greater than zero")]
    ZeroReadTimeout,
    #[error("private.client is required when private.command is set")]
    MissingPrivateClient,
}

/// Validate a configuration, returning all errors found.
pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if !config.identity.nick.is_valid_nick() {
        errors.push(ValidationError::InvalidNick(config.identity.nick.clone()));
    }

    if config.connection.read_timeout_ms == 0 {
        errors.push(ValidationError::ZeroReadTimeout);
    }

    if !config.private.command.trim().is_empty() && config.private.client.trim().is_empty() {
        errors.push(ValidationError::MissingPrivateClient);
    }

    let mut seen = HashSet::new();
    for network in &config.networks {
        if network.name.is_empty() {
            errors.push(ValidationError::MissingNetworkName);
        } else if !seen.insert(network.name.as_str()) {
            errors.push(ValidationError::DuplicateNetwork(network.name.clone()));
        }

        if split_address(&network.address).is_none() {
            errors.push(ValidationError::InvalidAddress {
                network: network.name.clone(),
                address: network.address.clone(),
            });
        }

        if let Some(nick) = &network.nick
            && !nick.is_valid_nick()
        {
            errors.push(ValidationError::InvalidNick(nick.clone()));
        }

        if let Some(fingerprint) = &network.fingerprint {
            if tls::normalize_fingerprint(fingerprint).is_none() {
                errors.push(ValidationError::InvalidFingerprint {
                    network: network.name.clone(),
                    fingerprint: fingerprint.clone(),
                });
            }
            if network.tls == Some(false) {
                errors.push(ValidationError::FingerprintWithoutTls(network.name.clone()));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
