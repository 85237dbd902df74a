//! Subject Alternative Name extraction.

use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

use serde::Serialize;
use x509_parser::certificate::X509Certificate;
use x509_parser::error::X509Error;
use x509_parser::extensions::GeneralName;

/// General-name type of a SAN entry.
///
/// The numeric tags follow RFC 5280 (`dNSName` is 2, `iPAddress` is 7, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SanKind {
    /// `otherName` (0)
    OtherName,
    /// `rfc822Name` (1)
    Email,
    /// `dNSName` (2)
    Dns,
    /// `x400Address` (3)
    X400Address,
    /// `directoryName` (4)
    DirectoryName,
    /// `ediPartyName` (5)
    EdiPartyName,
    /// `uniformResourceIdentifier` (6)
    Uri,
    /// `iPAddress` (7)
    IpAddress,
    /// `registeredID` (8)
    RegisteredId,
    /// An entry x509-parser could not decode
    Invalid,
}

impl SanKind {
    /// RFC 5280 context tag of this general-name type.
    pub fn tag(self) -> Option<u8> {
        match self {
            SanKind::OtherName => Some(0),
            SanKind::Email => Some(1),
            SanKind::Dns => Some(2),
            SanKind::X400Address => Some(3),
            SanKind::DirectoryName => Some(4),
            SanKind::EdiPartyName => Some(5),
            SanKind::Uri => Some(6),
            SanKind::IpAddress => Some(7),
            SanKind::RegisteredId => Some(8),
            SanKind::Invalid => None,
        }
    }
}

impl fmt::Display for SanKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SanKind::OtherName => "othername",
            SanKind::Email => "email",
            SanKind::Dns => "DNS",
            SanKind::X400Address => "X400",
            SanKind::DirectoryName => "DirName",
            SanKind::EdiPartyName => "EdiPartyName",
            SanKind::Uri => "URI",
            SanKind::IpAddress => "IP Address",
            SanKind::RegisteredId => "Registered ID",
            SanKind::Invalid => "invalid",
        };
        f.write_str(label)
    }
}

/// One Subject Alternative Name entry, rendered as text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SanEntry {
    /// General-name type
    pub kind: SanKind,
    /// Printable value
    pub value: String,
}

/// Extracts the DNS names from the Subject Alternative Name extension.
///
/// A certificate without the extension yields an empty list.
///
/// # Errors
///
/// Returns the x509-parser error if the extension is duplicated or its
/// contents could not be decoded.
pub(crate) fn extract_dns_names(cert: &X509Certificate<'_>) -> Result<Vec<String>, X509Error> {
    let mut names = Vec::new();
    if let Some(san) = cert.subject_alternative_name()? {
        for general_name in &san.value.general_names {
            if let GeneralName::DNSName(dns_name) = general_name {
                names.push(dns_name.to_string());
            }
        }
    }
    Ok(names)
}

/// Extracts every Subject Alternative Name entry, whatever its type.
///
/// # Errors
///
/// Same conditions as [`extract_dns_names`].
pub(crate) fn extract_san_entries(cert: &X509Certificate<'_>) -> Result<Vec<SanEntry>, X509Error> {
    let Some(san) = cert.subject_alternative_name()? else {
        return Ok(Vec::new());
    };
    Ok(san.value.general_names.iter().map(san_entry).collect())
}

fn san_entry(general_name: &GeneralName<'_>) -> SanEntry {
    let (kind, value) = match general_name {
        GeneralName::DNSName(name) => (SanKind::Dns, name.to_string()),
        GeneralName::RFC822Name(mailbox) => (SanKind::Email, mailbox.to_string()),
        GeneralName::URI(uri) => (SanKind::Uri, uri.to_string()),
        GeneralName::IPAddress(bytes) => (SanKind::IpAddress, format_ip(bytes)),
        GeneralName::DirectoryName(name) => (SanKind::DirectoryName, name.to_string()),
        GeneralName::RegisteredID(oid) => (SanKind::RegisteredId, oid.to_string()),
        GeneralName::OtherName(oid, _) => (SanKind::OtherName, oid.to_string()),
        GeneralName::X400Address(_) => (SanKind::X400Address, "<unsupported>".to_string()),
        GeneralName::EDIPartyName(_) => (SanKind::EdiPartyName, "<unsupported>".to_string()),
        #[allow(unreachable_patterns)]
        other => (SanKind::Invalid, format!("{other:?}")),
    };
    SanEntry { kind, value }
}

fn format_ip(bytes: &[u8]) -> String {
    if let Ok(octets) = <[u8; 4]>::try_from(bytes) {
        Ipv4Addr::from(octets).to_string()
    } else if let Ok(octets) = <[u8; 16]>::try_from(bytes) {
        Ipv6Addr::from(octets).to_string()
    } else {
        bytes
            .iter()
            .map(|b| format!("{b:02x}"))
            .collect::<Vec<_>>()
            .join(":")
    }
}
