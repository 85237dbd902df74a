use chrono::{DateTime, Utc};
use serde::Serialize;
use x509_parser::certificate::X509Certificate;
use x509_parser::time::ASN1Time;

use super::chain::{Certificate, CertificateError};
use super::extract::{extract_san_entries, SanEntry};

/// Read-only facts derived from a parsed certificate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CertificateFacts {
    /// Subject distinguished name
    pub subject: String,
    /// Issuer distinguished name
    pub issuer: String,
    /// Serial number as a decimal string
    pub serial_number: String,
    /// Start of the validity period
    pub valid_from: DateTime<Utc>,
    /// End of the validity period
    pub valid_until: DateTime<Utc>,
    /// Signature algorithm name, or its OID when the algorithm is not recognized
    pub signature_algorithm: String,
    /// X.509 version number (1, 2 or 3)
    pub version: u32,
    /// Subject Alternative Name entries; empty when absent or unreadable
    pub subject_alternative_names: Vec<SanEntry>,
}

impl CertificateFacts {
    /// Derives the facts of a certificate.
    ///
    /// # Errors
    ///
    /// Returns an error if the certificate does not parse or one of its
    /// validity timestamps is outside the range chrono can represent.
    pub fn from_certificate(certificate: &Certificate) -> Result<Self, CertificateError> {
        let cert = certificate.parse()?;
        Self::from_parsed(&cert)
    }

    pub(crate) fn from_parsed(cert: &X509Certificate<'_>) -> Result<Self, CertificateError> {
        let validity = cert.validity();
        Ok(Self {
            subject: cert.subject().to_string(),
            issuer: cert.issuer().to_string(),
            serial_number: cert.tbs_certificate.serial.to_string(),
            valid_from: to_utc("not_before", &validity.not_before)?,
            valid_until: to_utc("not_after", &validity.not_after)?,
            signature_algorithm: signature_algorithm_name(cert),
            version: cert.version().0 + 1,
            subject_alternative_names: extract_san_entries(cert).unwrap_or_default(),
        })
    }
}

fn to_utc(field: &'static str, time: &ASN1Time) -> Result<DateTime<Utc>, CertificateError> {
    let timestamp = time.timestamp();
    DateTime::from_timestamp(timestamp, 0)
        .ok_or(CertificateError::TimestampOutOfRange { field, timestamp })
}

/// Maps the signature algorithm OID to a conventional name.
pub(crate) fn signature_algorithm_name(cert: &X509Certificate<'_>) -> String {
    let oid_str = cert.signature_algorithm.algorithm.to_string();
    let name = match oid_str.as_str() {
        "1.2.840.113549.1.1.4" => "MD5withRSA",
        "1.2.840.113549.1.1.5" => "SHA1withRSA",
        "1.2.840.113549.1.1.10" => "RSASSA-PSS",
        "1.2.840.113549.1.1.11" => "SHA256withRSA",
        "1.2.840.113549.1.1.12" => "SHA384withRSA",
        "1.2.840.113549.1.1.13" => "SHA512withRSA",
        "1.2.840.10045.4.1" => "SHA1withECDSA",
        "1.2.840.10045.4.3.2" => "SHA256withECDSA",
        "1.2.840.10045.4.3.3" => "SHA384withECDSA",
        "1.2.840.10045.4.3.4" => "SHA512withECDSA",
        "1.3.101.112" => "Ed25519",
        "1.3.101.113" => "Ed448",
        // Unknown algorithms are reported by OID
        _ => return oid_str,
    };
    name.to_string()
}
