//! Error categorization.
//!
//! Maps raw I/O failures from the connect and handshake phases onto the
//! `InspectError` taxonomy.

use std::io;

use super::types::InspectError;

/// Categorizes a transport failure outside the handshake.
///
/// Resolution, refusal, unreachable host, connect timeout and failed writes
/// on an established session are all network errors.
pub fn categorize_transport_error(endpoint: &str, error: io::Error) -> InspectError {
    InspectError::Network {
        endpoint: endpoint.to_string(),
        source: error,
    }
}

/// Categorizes a failure returned while driving the TLS handshake.
///
/// Timeouts are reported as network errors; anything else (rustls alerts,
/// certificate rejection, unexpected EOF, reset by peer) is a handshake error.
pub fn categorize_handshake_error(endpoint: &str, error: io::Error) -> InspectError {
    match error.kind() {
        io::ErrorKind::TimedOut => InspectError::Network {
            endpoint: endpoint.to_string(),
            source: error,
        },
        _ => InspectError::Handshake {
            endpoint: endpoint.to_string(),
            source: error,
        },
    }
}

/// Extracts the rustls error wrapped inside a handshake failure, if any.
pub fn tls_error(error: &InspectError) -> Option<&rustls::Error> {
    match error {
        InspectError::Handshake { source, .. } => source
            .get_ref()
            .and_then(|inner| inner.downcast_ref::<rustls::Error>()),
        _ => None,
    }
}

/// Returns true if the handshake failed because the peer's certificate was
/// rejected (unknown issuer, expired, name mismatch, ...).
pub fn is_certificate_rejection(error: &InspectError) -> bool {
    matches!(tls_error(error), Some(rustls::Error::InvalidCertificate(_)))
}
