//! Certificate verification policies.
//!
//! `Strict` uses webpki chain validation against the Mozilla root set plus
//! standard hostname verification. `TrustAll` swaps in a verifier that accepts
//! any chain for any name; handshake signatures are still checked so the
//! session itself is sound.

use std::sync::Arc;

use rustls::client::danger::{HandshakeSignatureValid, ServerCertVerified, ServerCertVerifier};
use rustls::crypto::{ring, CryptoProvider};
use rustls::pki_types::{CertificateDer, ServerName, UnixTime};
use rustls::{ClientConfig, DigitallySignedStruct, RootCertStore, SignatureScheme};

/// How the peer's certificate chain and identity are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerificationPolicy {
    /// Standard chain validation and hostname verification.
    #[default]
    Strict,
    /// Accept any chain and any presented identity.
    TrustAll,
}

impl VerificationPolicy {
    /// Maps a `trust_all` flag onto a policy.
    pub fn from_trust_all(trust_all: bool) -> Self {
        if trust_all {
            VerificationPolicy::TrustAll
        } else {
            VerificationPolicy::Strict
        }
    }

    /// True for `TrustAll`.
    pub fn trusts_all(self) -> bool {
        self == VerificationPolicy::TrustAll
    }

    /// Builds a fresh client configuration for this policy.
    ///
    /// Uses the `ring` provider explicitly, so no process-wide default
    /// provider needs to be installed.
    pub(crate) fn client_config(self) -> Result<ClientConfig, rustls::Error> {
        let provider = Arc::new(ring::default_provider());
        let builder = ClientConfig::builder_with_provider(Arc::clone(&provider))
            .with_safe_default_protocol_versions()?;

        let config = match self {
            VerificationPolicy::Strict => {
                let mut root_store = RootCertStore::empty();
                root_store.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
                builder
                    .with_root_certificates(root_store)
                    .with_no_client_auth()
            }
            VerificationPolicy::TrustAll => builder
                .dangerous()
                .with_custom_certificate_verifier(Arc::new(AcceptAnyServerCert::new(provider)))
                .with_no_client_auth(),
        };

        Ok(config)
    }
}

/// Verifier that accepts every certificate chain, whatever the server name.
#[derive(Debug)]
struct AcceptAnyServerCert {
    provider: Arc<CryptoProvider>,
}

impl AcceptAnyServerCert {
    fn new(provider: Arc<CryptoProvider>) -> Self {
        Self { provider }
    }
}

impl ServerCertVerifier for AcceptAnyServerCert {
    fn verify_server_cert(
        &self,
        _end_entity: &CertificateDer<'_>,
        _intermediates: &[CertificateDer<'_>],
        _server_name: &ServerName<'_>,
        _ocsp_response: &[u8],
        _now: UnixTime,
    ) -> Result<ServerCertVerified, rustls::Error> {
        // No issuer, expiry or name checks
        Ok(ServerCertVerified::assertion())
    }

    fn verify_tls12_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, rustls::Error> {
        rustls::crypto::verify_tls12_signature(
            message,
            cert,
            dss,
            &self.provider.signature_verification_algorithms,
        )
    }

    fn verify_tls13_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, rustls::Error> {
        rustls::crypto::verify_tls13_signature(
            message,
            cert,
            dss,
            &self.provider.signature_verification_algorithms,
        )
    }

    fn supported_verify_schemes(&self) -> Vec<SignatureScheme> {
        self.provider
            .signature_verification_algorithms
            .supported_schemes()
    }
}
