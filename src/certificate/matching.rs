//! Certificate-to-domain matching.
//!
//! A certificate authorizes a domain when, in order:
//! 1. one of its SAN `dNSName` entries matches the domain (exactly or as a
//!    `*.` wildcard covering one leftmost label), or
//! 2. its subject DN string contains `CN=<domain>`.
//!
//! The CN fallback is a plain substring test on the rendered subject. It can
//! accept `CN=example.com.evil` for `example.com`; callers rely on that
//! looseness, so it stays.

use serde::Serialize;
use x509_parser::certificate::X509Certificate;

use super::chain::Certificate;
use super::extract::extract_dns_names;

/// Outcome of matching a certificate against a domain, with the evidence used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "matched_by", rename_all = "snake_case")]
pub enum DomainMatch {
    /// A SAN `dNSName` entry matched.
    SubjectAltName {
        /// The SAN entry that matched, as written in the certificate
        pattern: String,
        /// True if the entry was a `*.` wildcard
        wildcard: bool,
    },
    /// No SAN entry matched but the subject contains `CN=<domain>`.
    CommonNameFallback,
    /// Neither route matched, or the SAN extension could not be read.
    NoMatch,
}

impl DomainMatch {
    /// True for either kind of match.
    pub fn is_match(&self) -> bool {
        !matches!(self, DomainMatch::NoMatch)
    }
}

/// Checks whether a certificate name pattern covers the requested domain.
///
/// Exact matches are case-insensitive. A pattern `*.base` matches any domain
/// of at least two labels whose labels after the first equal `base`, so
/// `*.example.com` covers `www.example.com` but not `a.b.example.com` or
/// `example.com`. Trailing dots on `requested` are ignored when counting and
/// joining labels for the wildcard comparison.
pub fn matches_pattern(pattern: &str, requested: &str) -> bool {
    if pattern.eq_ignore_ascii_case(requested) {
        return true;
    }

    if let Some(wildcard_base) = pattern.strip_prefix("*.") {
        let mut labels: Vec<&str> = requested.split('.').collect();
        // Trailing empty labels do not count: `www.example.com.` has three
        while labels.last() == Some(&"") {
            labels.pop();
        }
        if labels.len() >= 2 {
            return wildcard_base.eq_ignore_ascii_case(&labels[1..].join("."));
        }
    }

    false
}

/// Decides whether a certificate authorizes `domain`, reporting the evidence.
///
/// Unparseable certificates and unreadable SAN extensions yield
/// `DomainMatch::NoMatch`; the CN fallback is not consulted in that case.
pub fn match_domain(certificate: &Certificate, domain: &str) -> DomainMatch {
    match certificate.parse() {
        Ok(cert) => match_parsed(&cert, domain),
        Err(_) => DomainMatch::NoMatch,
    }
}

/// Boolean form of [`match_domain`].
pub fn matches_domain(certificate: &Certificate, domain: &str) -> bool {
    match_domain(certificate, domain).is_match()
}

pub(crate) fn match_parsed(cert: &X509Certificate<'_>, domain: &str) -> DomainMatch {
    let dns_names = match extract_dns_names(cert) {
        Ok(names) => names,
        Err(_) => return DomainMatch::NoMatch,
    };

    if let Some(pattern) = dns_names
        .into_iter()
        .find(|pattern| matches_pattern(pattern, domain))
    {
        let wildcard = pattern.starts_with("*.");
        return DomainMatch::SubjectAltName { pattern, wildcard };
    }

    if cert.subject().to_string().contains(&format!("CN={domain}")) {
        return DomainMatch::CommonNameFallback;
    }

    DomainMatch::NoMatch
}
