//! Error handling.
//!
//! This module provides:
//! - The `InspectError` taxonomy (invalid target, handshake, network)
//! - Categorization of raw I/O failures into that taxonomy
//! - Initialization errors for the application layer
//!
//! Nothing here retries: every failure is the result of a single attempt and
//! is handed straight back to the caller.

mod categorization;
mod types;

// Re-export public API
pub use categorization::{
    categorize_handshake_error, categorize_transport_error, is_certificate_rejection, tls_error,
};
pub use types::{InitializationError, InspectError, TargetRejection};
