//! TLS certificate chain retrieval.
//!
//! This module connects to HTTPS endpoints and reads back the certificate
//! chain the server presents:
//! - `Target` - hostname endpoint, or IP override with a separate SNI name
//! - `VerificationPolicy` - strict webpki validation or trust-all
//! - `Connector` - one TCP connection, one handshake, one `HEAD` probe per call
//! - `InspectionObserver` - optional progress hooks
//!
//! Uses `tokio-rustls` for async TLS connections and `webpki-roots` for the
//! strict trust anchors.

mod connector;
mod observer;
mod policy;
mod target;

pub use connector::{ConnectionOptions, Connector};
pub use observer::{InspectionObserver, NoopObserver};
pub use policy::VerificationPolicy;
pub use target::Target;

use crate::certificate::CertificateChain;
use crate::error_handling::InspectError;

/// Retrieves the chain served for an `https://` URL.
///
/// The URL's host is used both to connect and as the SNI name. IP literal
/// hosts are refused; use [`fetch_chain_for_ip`] to connect by address.
///
/// # Errors
///
/// See [`Target::from_url`] and [`Connector::fetch_chain`].
pub async fn fetch_chain_for_url(
    url: &str,
    trust_all: bool,
) -> Result<CertificateChain, InspectError> {
    let target = Target::from_url(url)?;
    let options = ConnectionOptions::with_policy(VerificationPolicy::from_trust_all(trust_all));
    Connector::new(options).fetch_chain(&target).await
}

/// Retrieves the chain served at `ipv4:port` when asked for `sni_domain`.
///
/// # Errors
///
/// See [`Target::ip_override`] and [`Connector::fetch_chain`].
pub async fn fetch_chain_for_ip(
    ipv4: &str,
    sni_domain: &str,
    port: u16,
    trust_all: bool,
) -> Result<CertificateChain, InspectError> {
    let target = Target::ip_override(ipv4, sni_domain, port)?;
    let options = ConnectionOptions::with_policy(VerificationPolicy::from_trust_all(trust_all));
    Connector::new(options).fetch_chain(&target).await
}
