/// Loose "could be a domain" check applied to user input.
///
/// Any non-empty string that contains a dot and no whitespace passes. This is
/// not a DNS syntax validator; the connector rejects names rustls cannot use
/// for SNI.
pub fn looks_like_domain(value: &str) -> bool {
    !value.is_empty() && value.contains('.') && !value.chars().any(char::is_whitespace)
}
