//! Error type definitions.
//!
//! This module defines the errors surfaced by certificate inspection and by
//! application initialization.

use std::fmt;

use log::SetLoggerError;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),
}

/// Why a target specification was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetRejection {
    /// The string could not be parsed as a URL.
    MalformedUrl,
    /// The URL scheme is not `https`.
    InsecureScheme,
    /// The URL has no host component.
    MissingHost,
    /// A hostname was required but an IP literal was given.
    IpLiteralHost,
    /// The override address is not a dotted-quad IPv4 address.
    InvalidIpv4,
    /// The SNI domain is not a valid DNS name.
    InvalidServerName,
}

impl fmt::Display for TargetRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            TargetRejection::MalformedUrl => "not a valid URL",
            TargetRejection::InsecureScheme => "URL must use the https scheme",
            TargetRejection::MissingHost => "URL has no host",
            TargetRejection::IpLiteralHost => {
                "only hostname based targets are supported here, this looks like an IP address"
            }
            TargetRejection::InvalidIpv4 => "not a valid IPv4 address",
            TargetRejection::InvalidServerName => "not a valid DNS name for SNI",
        };
        f.write_str(reason)
    }
}

/// Errors returned by certificate chain retrieval.
///
/// Every variant is the result of a single attempt; nothing is retried.
#[derive(Error, Debug)]
pub enum InspectError {
    /// The target was malformed or disallowed. Raised before any network I/O.
    #[error("Invalid target '{value}': {reason}")]
    InvalidTarget {
        /// The offending value, as supplied by the caller
        value: String,
        /// What was wrong with it
        reason: TargetRejection,
    },

    /// TLS negotiation failed (untrusted chain, protocol failure, peer reset).
    #[error("TLS handshake with {endpoint} failed: {source}")]
    Handshake {
        /// `address:port` that was being negotiated with
        endpoint: String,
        /// Underlying failure reported by the TLS stack
        #[source]
        source: std::io::Error,
    },

    /// Transport-level failure (DNS resolution, refused connection, timeout).
    #[error("Network error talking to {endpoint}: {source}")]
    Network {
        /// `address:port` that was being contacted
        endpoint: String,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },
}

impl InspectError {
    pub(crate) fn invalid_target(value: impl Into<String>, reason: TargetRejection) -> Self {
        InspectError::InvalidTarget {
            value: value.into(),
            reason,
        }
    }

    /// Returns true when the failure was caused by the caller's input rather
    /// than by the remote endpoint.
    pub fn is_client_error(&self) -> bool {
        matches!(self, InspectError::InvalidTarget { .. })
    }

    /// Returns the rejection reason for `InvalidTarget` errors.
    pub fn rejection(&self) -> Option<TargetRejection> {
        match self {
            InspectError::InvalidTarget { reason, .. } => Some(*reason),
            _ => None,
        }
    }
}
