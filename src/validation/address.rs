use std::net::{IpAddr, Ipv4Addr};

/// Parses a dotted-quad IPv4 address.
///
/// Each of the four segments must be a non-empty run of ASCII digits whose
/// integer value is 0-255. Leading zeros are accepted and read as decimal
/// (`"010.0.0.1"` is `10.0.0.1`), unlike `Ipv4Addr::from_str`. Signs,
/// whitespace, empty segments and trailing dots are rejected.
pub fn parse_ipv4(ip: &str) -> Option<Ipv4Addr> {
    let mut octets = [0u8; 4];
    let mut segments = ip.split('.');

    for octet in octets.iter_mut() {
        let segment = segments.next()?;
        if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let digits = segment.trim_start_matches('0');
        if digits.len() > 3 {
            return None;
        }
        let value: u16 = if digits.is_empty() { 0 } else { digits.parse().ok()? };
        if value > 255 {
            return None;
        }
        *octet = value as u8;
    }

    if segments.next().is_some() {
        return None;
    }

    Some(Ipv4Addr::from(octets))
}

/// Validates IPv4 address format.
///
/// See [`parse_ipv4`] for the accepted syntax.
pub fn is_valid_ipv4(ip: &str) -> bool {
    parse_ipv4(ip).is_some()
}

/// Returns true if `value` is an IPv4 or IPv6 literal.
///
/// IPv6 literals may be wrapped in brackets, as they appear in URL hosts.
pub fn is_ip_literal(value: &str) -> bool {
    let unbracketed = value
        .strip_prefix('[')
        .and_then(|v| v.strip_suffix(']'))
        .unwrap_or(value);
    unbracketed.parse::<IpAddr>().is_ok()
}
