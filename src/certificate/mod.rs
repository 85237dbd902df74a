//! X.509 certificate handling.
//!
//! This module holds certificates as presented by a TLS peer and answers
//! questions about them:
//! - `CertificateChain` / `Certificate` - owned DER, parsed on demand
//! - `CertificateFacts` - the read-only fields exposed to callers
//! - `match_domain()` / `matches_domain()` - does the certificate authorize a domain
//! - `render_details()` - multi-line diagnostic dump
//!
//! Parsing uses `x509-parser`. Nothing in here performs I/O.

mod chain;
mod extract;
mod facts;
mod matching;
mod render;

pub use chain::{Certificate, CertificateChain, CertificateError, SessionInfo};
pub use extract::{SanEntry, SanKind};
pub use facts::CertificateFacts;
pub use matching::{match_domain, matches_domain, matches_pattern, DomainMatch};
pub use render::render_details;

#[cfg(test)]
pub(crate) mod fixtures;
