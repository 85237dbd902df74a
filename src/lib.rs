//! cert_inspector library: TLS certificate chain retrieval and domain matching
//!
//! This library connects to an HTTPS endpoint, optionally at an explicit IPv4
//! address while presenting a different name via SNI, reads back the
//! certificate chain the server presents and decides whether the leaf
//! certificate authorizes a domain.
//!
//! # Example
//!
//! ```no_run
//! use cert_inspector::{fetch_chain_for_ip, matches_domain};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let chain = fetch_chain_for_ip("142.250.185.46", "www.google.com", 443, true).await?;
//! let leaf = chain.leaf().expect("server sent at least one certificate");
//! println!("{} certificates, leaf matches: {}",
//!          chain.len(), matches_domain(leaf, "www.google.com"));
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! Retrieval functions are async and require a Tokio runtime. Matching and
//! certificate inspection are synchronous and perform no I/O.

#![warn(missing_docs)]

mod app;
pub mod certificate;
pub mod config;
mod error_handling;
pub mod initialization;
pub mod tls;
pub mod validation;

// Re-export public API
pub use app::{
    exit_code, run_inspection, Inspection, InspectionReport, LogObserver, EXIT_INVALID_INPUT,
    EXIT_REMOTE_FAILURE,
};
pub use certificate::{
    match_domain, matches_domain, matches_pattern, render_details, Certificate, CertificateChain,
    CertificateFacts, DomainMatch,
};
pub use config::{Config, LogFormat, LogLevel, OutputFormat};
pub use error_handling::{
    is_certificate_rejection, tls_error, InitializationError, InspectError, TargetRejection,
};
pub use tls::{
    fetch_chain_for_ip, fetch_chain_for_url, ConnectionOptions, Connector, InspectionObserver,
    Target, VerificationPolicy,
};
pub use validation::{is_ip_literal, is_valid_ipv4, looks_like_domain};
