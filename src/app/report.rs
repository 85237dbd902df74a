//! Inspection results.

use std::fmt::Write as _;

use serde::Serialize;

use crate::certificate::{
    match_domain, render_details, CertificateChain, CertificateFacts, DomainMatch, SessionInfo,
};

/// A retrieved chain together with the domain it was requested for.
#[derive(Debug, Clone)]
pub struct Inspection {
    /// Domain presented as SNI and checked against the leaf
    pub domain: String,
    /// Chain as presented by the peer, leaf first
    pub chain: CertificateChain,
}

/// Serializable summary of an inspection.
#[derive(Debug, Clone, Serialize)]
pub struct InspectionReport {
    /// Domain the chain was checked against
    pub domain: String,
    /// Negotiated session parameters
    pub session: SessionInfo,
    /// Facts for each certificate, leaf first
    pub certificates: Vec<CertificateFacts>,
    /// Whether the leaf certificate authorizes `domain`
    pub leaf_match: DomainMatch,
}

impl Inspection {
    /// Matches the leaf against the domain. An empty chain never matches.
    pub fn leaf_match(&self) -> DomainMatch {
        self.chain
            .leaf()
            .map(|leaf| match_domain(leaf, &self.domain))
            .unwrap_or(DomainMatch::NoMatch)
    }

    /// Builds the serializable report.
    ///
    /// Certificates whose validity timestamps cannot be represented are left
    /// out of `certificates`.
    pub fn report(&self) -> InspectionReport {
        InspectionReport {
            domain: self.domain.clone(),
            session: self.chain.session().clone(),
            certificates: self
                .chain
                .iter()
                .filter_map(|cert| CertificateFacts::from_certificate(cert).ok())
                .collect(),
            leaf_match: self.leaf_match(),
        }
    }

    /// Human-readable dump of every certificate plus the match outcome.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let total = self.chain.len();
        for (index, cert) in self.chain.iter().enumerate() {
            let _ = writeln!(out, "[{}/{}]", index + 1, total);
            out.push_str(&render_details(cert));
            out.push('\n');
        }

        let session = self.chain.session();
        let _ = writeln!(
            out,
            "Session: {} {}",
            session.protocol_version.as_deref().unwrap_or("unknown"),
            session.cipher_suite.as_deref().unwrap_or("unknown")
        );
        if let Some(status) = session.probe_status {
            let _ = writeln!(out, "Probe status: {status}");
        }

        let outcome = match self.leaf_match() {
            DomainMatch::SubjectAltName { pattern, wildcard } => {
                if wildcard {
                    format!("matches (wildcard SAN {pattern})")
                } else {
                    format!("matches (SAN {pattern})")
                }
            }
            DomainMatch::CommonNameFallback => "matches (subject CN)".to_string(),
            DomainMatch::NoMatch => "does not match".to_string(),
        };
        let _ = writeln!(out, "Domain {}: {}", self.domain, outcome);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::certificate::fixtures;

    fn inspection(domain: &str, dns: &[&str]) -> Inspection {
        let cert = fixtures::self_signed(Some("inspector.test"), dns);
        Inspection {
            domain: domain.to_string(),
            chain: CertificateChain::from_der_entries(
                vec![cert.der().to_vec()],
                SessionInfo {
                    protocol_version: Some("TLSv1_3".to_string()),
                    cipher_suite: Some("TLS13_AES_256_GCM_SHA384".to_string()),
                    probe_status: Some(200),
                },
            ),
        }
    }

    #[test]
    fn test_report_for_matching_leaf() {
        let report = inspection("www.inspector.test", &["*.inspector.test"]).report();
        assert_eq!(report.certificates.len(), 1);
        assert_eq!(
            report.leaf_match,
            DomainMatch::SubjectAltName {
                pattern: "*.inspector.test".to_string(),
                wildcard: true,
            }
        );

        let json = serde_json::to_value(&report).expect("report should serialize");
        assert_eq!(json["domain"], "www.inspector.test");
        assert_eq!(json["leaf_match"]["matched_by"], "subject_alt_name");
        assert_eq!(json["session"]["probe_status"], 200);
        assert!(json["certificates"][0]["subject"]
            .as_str()
            .unwrap()
            .contains("CN=inspector.test"));
    }

    #[test]
    fn test_empty_chain_never_matches() {
        let inspection = Inspection {
            domain: "www.inspector.test".to_string(),
            chain: CertificateChain::default(),
        };
        assert_eq!(inspection.leaf_match(), DomainMatch::NoMatch);
        assert!(inspection.report().certificates.is_empty());
    }

    #[test]
    fn test_render_text_lists_certificates_and_outcome() {
        let text = inspection("other.example", &["inspector.test"]).render_text();
        assert!(text.contains("[1/1]"), "text was: {text}");
        assert!(text.contains("Certificate Details:"), "text was: {text}");
        assert!(text.contains("Probe status: 200"), "text was: {text}");
        assert!(
            text.contains("Domain other.example: does not match"),
            "text was: {text}"
        );
    }
}
