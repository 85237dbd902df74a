use std::fmt::Write;

use super::chain::Certificate;
use super::extract::extract_san_entries;
use super::facts::signature_algorithm_name;

/// Renders a certificate as human-readable multi-line text.
///
/// Diagnostic only: the output format is not stable and nothing should parse it.
pub fn render_details(certificate: &Certificate) -> String {
    let cert = match certificate.parse() {
        Ok(cert) => cert,
        Err(e) => return format!("Certificate Details: <{e}>\n"),
    };
    let validity = cert.validity();

    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = writeln!(out, "Certificate Details:");
    let _ = writeln!(out, "  Subject: {}", cert.subject());
    let _ = writeln!(out, "  Issuer: {}", cert.issuer());
    let _ = writeln!(out, "  Serial Number: {}", cert.tbs_certificate.serial);
    let _ = writeln!(out, "  Valid From: {}", validity.not_before);
    let _ = writeln!(out, "  Valid Until: {}", validity.not_after);
    let _ = writeln!(out, "  Signature Algorithm: {}", signature_algorithm_name(&cert));
    let _ = writeln!(out, "  Version: {}", cert.version().0 + 1);

    match extract_san_entries(&cert) {
        Ok(entries) if entries.is_empty() => {}
        Ok(entries) => {
            let _ = writeln!(out, "  Subject Alternative Names:");
            for entry in entries {
                let _ = writeln!(out, "    {}: {}", entry.kind, entry.value);
            }
        }
        Err(_) => {
            let _ = writeln!(out, "  Subject Alternative Names: <could not be read>");
        }
    }

    out
}
