//! TLS for outbound network connections.
//!
//! Servers are verified against the platform's native root store. A network
//! may additionally pin the SHA-256 fingerprint of its leaf certificate.

use std::sync::Arc;

use sha2::{Digest, Sha256};
use tokio::net::TcpStream;
use tokio_rustls::TlsConnector;
use tokio_rustls::client::TlsStream;
use tokio_rustls::rustls::pki_types::ServerName;
use tokio_rustls::rustls::{ClientConfig, RootCertStore};
use tracing::{info, warn};

use crate::error::DialError;

/// Build a connector trusting the native root certificates.
pub fn connector() -> TlsConnector {
    let mut roots = RootCertStore::empty();
    let certs = rustls_native_certs::load_native_certs();
    for cert in certs.certs {
        if let Err(e) = roots.add(cert) {
            warn!(error = %e, "Failed to add root cert");
        }
    }
    for e in &certs.errors {
        warn!(error = %e, "Error loading native certs");
    }

    let config = ClientConfig::builder()
        .with_root_certificates(roots)
        .with_no_client_auth();
    TlsConnector::from(Arc::new(config))
}

/// Run the TLS handshake over `tcp`, then check the pinned fingerprint.
pub async fn upgrade(
    tcp: TcpStream,
    host: &str,
    fingerprint: Option<&str>,
) -> Result<TlsStream<TcpStream>, DialError> {
    let server_name = ServerName::try_from(host.to_string())
        .map_err(|_| DialError::InvalidServerName(host.to_string()))?;

    let stream = connector()
        .connect(server_name, tcp)
        .await
        .map_err(|source| DialError::Tls {
            host: host.to_string(),
            source,
        })?;

    if let Some(expected) = fingerprint {
        let (_, conn) = stream.get_ref();
        let actual = conn
            .peer_certificates()
            .and_then(|certs| certs.first())
            .map(|cert| fingerprint_of(cert.as_ref()))
            .unwrap_or_default();
        verify_fingerprint(host, expected, &actual)?;
        info!(host = %host, fingerprint = %actual, "Certificate fingerprint verified");
    }

    Ok(stream)
}

/// SHA-256 of a DER certificate as colon separated uppercase hex.
pub fn fingerprint_of(der: &[u8]) -> String {
    let digest = Sha256::digest(der);
    digest
        .iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(":")
}

/// Normalize a configured fingerprint to the [`fingerprint_of`] form.
///
/// Accepts any case and `:`, `-` or space separators, or none at all.
/// Returns `None` unless the result is exactly 32 hex bytes.
pub fn normalize_fingerprint(fingerprint: &str) -> Option<String> {
    let hex: String = fingerprint
        .chars()
        .filter(|c| !matches!(c, ':' | '-' | ' '))
        .map(|c| c.to_ascii_uppercase())
        .collect();

    if hex.len() != 64 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let pairs: Vec<&str> = (0..hex.len())
        .step_by(2)
        .map(|i| &hex[i..i + 2])
        .collect();
    Some(pairs.join(":"))
}

fn verify_fingerprint(host: &str, expected: &str, actual: &str) -> Result<(), DialError> {
    let expected = normalize_fingerprint(expected).unwrap_or_else(|| expected.to_string());
    if expected == actual {
        return Ok(());
    }

    Err(DialError::FingerprintMismatch {
        host: host.to_string(),
        expected,
        actual: actual.to_string(),
    })
}
