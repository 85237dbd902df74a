//! Inspection targets.
//!
//! A target is validated when it is constructed, so a `Target` value can be
//! handed to the connector without further checks and no network activity
//! ever happens for a malformed one.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr};

use rustls::pki_types::ServerName;
use url::{Host, Url};

use crate::config::DEFAULT_HTTPS_PORT;
use crate::error_handling::{InspectError, TargetRejection};
use crate::validation::{is_ip_literal, parse_ipv4};

/// Where to connect and which name to present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// Connect to `host` and present `host` as SNI and `Host`.
    Hostname {
        /// DNS name, used both for resolution and as server identity
        host: String,
        /// TCP port
        port: u16,
    },
    /// Connect to `address` but present `sni_domain` as SNI and `Host`.
    IpOverride {
        /// Physical endpoint
        address: Ipv4Addr,
        /// Identity presented during the handshake
        sni_domain: String,
        /// TCP port
        port: u16,
    },
}

impl Target {
    /// Builds a hostname target from an `https://` URL.
    ///
    /// The port defaults to 443. Paths and queries are ignored.
    ///
    /// # Errors
    ///
    /// `InspectError::InvalidTarget` if the URL does not parse, is not
    /// `https`, has no host, has an IP literal as host, or the host cannot be
    /// used as an SNI name.
    pub fn from_url(url: &str) -> Result<Self, InspectError> {
        let parsed = Url::parse(url)
            .map_err(|_| InspectError::invalid_target(url, TargetRejection::MalformedUrl))?;

        if !parsed.scheme().eq_ignore_ascii_case("https") {
            return Err(InspectError::invalid_target(
                url,
                TargetRejection::InsecureScheme,
            ));
        }

        let host = match parsed.host() {
            Some(Host::Domain(domain)) if !is_ip_literal(domain) => domain.to_string(),
            Some(Host::Domain(_)) | Some(Host::Ipv4(_)) | Some(Host::Ipv6(_)) => {
                return Err(InspectError::invalid_target(
                    url,
                    TargetRejection::IpLiteralHost,
                ));
            }
            None => {
                return Err(InspectError::invalid_target(url, TargetRejection::MissingHost));
            }
        };

        let port = parsed.port_or_known_default().unwrap_or(DEFAULT_HTTPS_PORT);
        Self::hostname(&host, port)
    }

    /// Builds a hostname target from a bare host and port.
    ///
    /// # Errors
    ///
    /// `InspectError::InvalidTarget` if `host` is an IP literal or not a valid
    /// DNS name (this also refuses URL syntax such as `/`, `@` or `:`).
    pub fn hostname(host: &str, port: u16) -> Result<Self, InspectError> {
        if is_ip_literal(host) {
            return Err(InspectError::invalid_target(
                host,
                TargetRejection::IpLiteralHost,
            ));
        }
        dns_server_name(host)?;

        Ok(Target::Hostname {
            host: host.to_string(),
            port,
        })
    }

    /// Builds an IP-override target.
    ///
    /// # Errors
    ///
    /// `InspectError::InvalidTarget` if `ipv4` is not a dotted-quad IPv4
    /// address, or `sni_domain` is an IP literal or not a valid DNS name.
    pub fn ip_override(ipv4: &str, sni_domain: &str, port: u16) -> Result<Self, InspectError> {
        let address = parse_ipv4(ipv4)
            .ok_or_else(|| InspectError::invalid_target(ipv4, TargetRejection::InvalidIpv4))?;

        if is_ip_literal(sni_domain) {
            return Err(InspectError::invalid_target(
                sni_domain,
                TargetRejection::IpLiteralHost,
            ));
        }
        dns_server_name(sni_domain)?;

        Ok(Target::IpOverride {
            address,
            sni_domain: sni_domain.to_string(),
            port,
        })
    }

    /// Name presented as SNI and in the `Host` header.
    pub fn server_name(&self) -> &str {
        match self {
            Target::Hostname { host, .. } => host,
            Target::IpOverride { sni_domain, .. } => sni_domain,
        }
    }

    /// TCP port.
    pub fn port(&self) -> u16 {
        match self {
            Target::Hostname { port, .. } | Target::IpOverride { port, .. } => *port,
        }
    }

    /// The override address, if any.
    pub fn address(&self) -> Option<IpAddr> {
        match self {
            Target::Hostname { .. } => None,
            Target::IpOverride { address, .. } => Some(IpAddr::V4(*address)),
        }
    }

    /// `host:port` or `address:port` of the physical endpoint.
    pub fn endpoint(&self) -> String {
        match self {
            Target::Hostname { host, port } => format!("{host}:{port}"),
            Target::IpOverride { address, port, .. } => format!("{address}:{port}"),
        }
    }

    pub(crate) fn sni(&self) -> Result<ServerName<'static>, InspectError> {
        dns_server_name(self.server_name())
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Hostname { host, port } => write!(f, "https://{host}:{port}"),
            Target::IpOverride {
                address,
                sni_domain,
                port,
            } => write!(f, "https://{address}:{port} (SNI {sni_domain})"),
        }
    }
}

fn dns_server_name(name: &str) -> Result<ServerName<'static>, InspectError> {
    match ServerName::try_from(name.to_string()) {
        Ok(server_name @ ServerName::DnsName(_)) => Ok(server_name),
        _ => Err(InspectError::invalid_target(
            name,
            TargetRejection::InvalidServerName,
        )),
    }
}
