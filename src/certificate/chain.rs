use rustls::pki_types::CertificateDer;
use serde::Serialize;
use thiserror::Error;
use x509_parser::certificate::X509Certificate;

/// Errors raised while reading a single certificate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CertificateError {
    /// The DER bytes are not a well-formed X.509 certificate.
    #[error("Malformed X.509 certificate: {0}")]
    Malformed(String),

    /// A validity timestamp cannot be represented as a UTC date.
    #[error("Certificate {field} is out of range: {timestamp}")]
    TimestampOutOfRange {
        /// `not_before` or `not_after`
        field: &'static str,
        /// Seconds since the Unix epoch, as encoded
        timestamp: i64,
    },
}

/// A single X.509 certificate, held as owned DER.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Certificate {
    der: CertificateDer<'static>,
}

impl Certificate {
    /// Wraps DER bytes, returning `None` unless they parse as X.509.
    pub fn from_der(der: impl Into<CertificateDer<'static>>) -> Option<Self> {
        let certificate = Self { der: der.into() };
        certificate.parse().ok()?;
        Some(certificate)
    }

    /// Raw DER encoding.
    pub fn der(&self) -> &[u8] {
        self.der.as_ref()
    }

    /// Parses the certificate.
    ///
    /// # Errors
    ///
    /// Returns `CertificateError::Malformed` if the DER cannot be decoded.
    pub fn parse(&self) -> Result<X509Certificate<'_>, CertificateError> {
        x509_parser::parse_x509_certificate(self.der.as_ref())
            .map(|(_, cert)| cert)
            .map_err(|e| CertificateError::Malformed(e.to_string()))
    }
}

/// Negotiated parameters of the session the chain was read from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionInfo {
    /// Protocol version, e.g. `TLSv1_3`
    pub protocol_version: Option<String>,
    /// Negotiated cipher suite, e.g. `TLS13_AES_128_GCM_SHA256`
    pub cipher_suite: Option<String>,
    /// Status code of the `HEAD` probe, when a response was read in time
    pub probe_status: Option<u16>,
}

/// Certificates presented by the peer during the handshake, leaf first.
#[derive(Debug, Clone, Default)]
pub struct CertificateChain {
    certificates: Vec<Certificate>,
    session: SessionInfo,
}

impl CertificateChain {
    /// Builds a chain from DER entries in presentation order.
    ///
    /// Entries that are not well-formed X.509 certificates are dropped.
    pub fn from_der_entries<I, D>(entries: I, session: SessionInfo) -> Self
    where
        I: IntoIterator<Item = D>,
        D: Into<CertificateDer<'static>>,
    {
        let certificates = entries
            .into_iter()
            .filter_map(Certificate::from_der)
            .collect();
        Self {
            certificates,
            session,
        }
    }

    /// The end-entity certificate, if the peer sent any.
    pub fn leaf(&self) -> Option<&Certificate> {
        self.certificates.first()
    }

    /// All certificates, leaf first.
    pub fn certificates(&self) -> &[Certificate] {
        &self.certificates
    }

    /// Iterates the certificates, leaf first.
    pub fn iter(&self) -> std::slice::Iter<'_, Certificate> {
        self.certificates.iter()
    }

    /// Number of certificates retained.
    pub fn len(&self) -> usize {
        self.certificates.len()
    }

    /// True if no well-formed certificate was presented.
    pub fn is_empty(&self) -> bool {
        self.certificates.is_empty()
    }

    /// Session parameters recorded alongside the chain.
    pub fn session(&self) -> &SessionInfo {
        &self.session
    }
}

impl<'a> IntoIterator for &'a CertificateChain {
    type Item = &'a Certificate;
    type IntoIter = std::slice::Iter<'a, Certificate>;

    fn into_iter(self) -> Self::IntoIter {
        self.certificates.iter()
    }
}
