//! Configuration constants.
//!
//! Network bounds and protocol defaults used by the connector.

/// TCP connection timeout in seconds
pub const CONNECT_TIMEOUT_SECS: u64 = 5;
/// Handshake and probe read timeout in seconds
pub const READ_TIMEOUT_SECS: u64 = 5;

/// Port used when a URL or CLI invocation does not name one
pub const DEFAULT_HTTPS_PORT: u16 = 443;

/// User-Agent sent with the `HEAD` probe
pub const PROBE_USER_AGENT: &str = concat!("cert_inspector/", env!("CARGO_PKG_VERSION"));

/// Maximum number of response bytes read while looking for the status line
pub const PROBE_READ_LIMIT: usize = 1024;
