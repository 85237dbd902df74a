//! Certificate chain retrieval.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio_rustls::client::TlsStream;
use tokio_rustls::TlsConnector;

use crate::certificate::{CertificateChain, SessionInfo};
use crate::config::{CONNECT_TIMEOUT_SECS, PROBE_READ_LIMIT, PROBE_USER_AGENT, READ_TIMEOUT_SECS};
use crate::error_handling::{categorize_handshake_error, categorize_transport_error, InspectError};

use super::observer::{InspectionObserver, NoopObserver};
use super::policy::VerificationPolicy;
use super::target::Target;

/// Timeouts and verification policy for one connector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionOptions {
    /// Bound on TCP connection establishment
    pub connect_timeout: Duration,
    /// Bound on the handshake and on each probe read/write
    pub read_timeout: Duration,
    /// Certificate verification policy
    pub policy: VerificationPolicy,
}

impl Default for ConnectionOptions {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(CONNECT_TIMEOUT_SECS),
            read_timeout: Duration::from_secs(READ_TIMEOUT_SECS),
            policy: VerificationPolicy::Strict,
        }
    }
}

impl ConnectionOptions {
    /// Default timeouts with the given policy.
    pub fn with_policy(policy: VerificationPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }
}

/// Opens TLS connections and reads back the peer's certificate chain.
///
/// A connector holds no connection state. Every call to
/// [`fetch_chain`](Connector::fetch_chain) builds its own client configuration
/// and socket, so one connector can serve any number of concurrent calls.
#[derive(Clone)]
pub struct Connector {
    options: ConnectionOptions,
    observer: Arc<dyn InspectionObserver>,
}

impl std::fmt::Debug for Connector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connector")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl Connector {
    /// Creates a connector that reports to no one.
    pub fn new(options: ConnectionOptions) -> Self {
        Self {
            options,
            observer: Arc::new(NoopObserver),
        }
    }

    /// Replaces the observer.
    pub fn with_observer(mut self, observer: Arc<dyn InspectionObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// The options this connector was built with.
    pub fn options(&self) -> &ConnectionOptions {
        &self.options
    }

    /// Connects to `target`, completes a TLS handshake presenting the target's
    /// server name, sends a `HEAD` probe and returns the peer's chain.
    ///
    /// A single attempt is made. The connection is closed before returning,
    /// on every path.
    ///
    /// # Errors
    ///
    /// - `InspectError::Network` if the TCP connection cannot be established
    ///   in time, the handshake times out, or the probe cannot be written
    /// - `InspectError::Handshake` if TLS negotiation fails, including
    ///   certificate rejection under `VerificationPolicy::Strict`
    pub async fn fetch_chain(&self, target: &Target) -> Result<CertificateChain, InspectError> {
        let result = self.fetch_chain_inner(target).await;
        if let Err(ref e) = result {
            self.observer.failed(target, e);
        }
        result
    }

    async fn fetch_chain_inner(&self, target: &Target) -> Result<CertificateChain, InspectError> {
        let endpoint = target.endpoint();
        let server_name = target.sni()?;
        let config = self.options.policy.client_config().map_err(|e| {
            categorize_handshake_error(&endpoint, io::Error::new(io::ErrorKind::InvalidInput, e))
        })?;

        self.observer.connecting(target);
        let sock = match tokio::time::timeout(self.options.connect_timeout, connect_tcp(target)).await
        {
            Ok(Ok(sock)) => sock,
            Ok(Err(e)) => return Err(categorize_transport_error(&endpoint, e)),
            Err(_) => {
                return Err(categorize_transport_error(
                    &endpoint,
                    timed_out("TCP connect", self.options.connect_timeout),
                ));
            }
        };

        let connector = TlsConnector::from(Arc::new(config));
        let mut tls_stream = match tokio::time::timeout(
            self.options.read_timeout,
            connector.connect(server_name, sock),
        )
        .await
        {
            Ok(Ok(stream)) => stream,
            Ok(Err(e)) => return Err(categorize_handshake_error(&endpoint, e)),
            Err(_) => {
                return Err(categorize_handshake_error(
                    &endpoint,
                    timed_out("TLS handshake", self.options.read_timeout),
                ));
            }
        };

        let (_, conn) = tls_stream.get_ref();
        let mut session = SessionInfo {
            protocol_version: conn.protocol_version().map(|v| format!("{v:?}")),
            cipher_suite: conn.negotiated_cipher_suite().map(|cs| format!("{:?}", cs.suite())),
            probe_status: None,
        };
        let peer_certificates = conn.peer_certificates().unwrap_or(&[]).to_vec();
        self.observer.handshake_complete(target, &session);

        match tokio::time::timeout(
            self.options.read_timeout,
            send_probe(&mut tls_stream, target.server_name()),
        )
        .await
        {
            Ok(Ok(())) => {}
            Ok(Err(e)) => return Err(categorize_transport_error(&endpoint, e)),
            Err(_) => {
                return Err(categorize_transport_error(
                    &endpoint,
                    timed_out("probe write", self.options.read_timeout),
                ));
            }
        }

        session.probe_status =
            match tokio::time::timeout(self.options.read_timeout, read_status(&mut tls_stream))
                .await
            {
                Ok(Ok(status)) => status,
                // The chain is already known; an unreadable response is not a failure
                Ok(Err(_)) | Err(_) => None,
            };

        // Best effort close_notify; the socket is dropped right after either way
        let _ = tokio::time::timeout(self.options.read_timeout, tls_stream.shutdown()).await;
        drop(tls_stream);

        let chain = CertificateChain::from_der_entries(peer_certificates, session);
        self.observer.chain_received(target, &chain);
        Ok(chain)
    }
}

async fn connect_tcp(target: &Target) -> io::Result<TcpStream> {
    match target {
        Target::Hostname { host, port } => TcpStream::connect((host.as_str(), *port)).await,
        Target::IpOverride { address, port, .. } => {
            TcpStream::connect(SocketAddr::from((*address, *port))).await
        }
    }
}

fn timed_out(phase: &str, after: Duration) -> io::Error {
    io::Error::new(
        io::ErrorKind::TimedOut,
        format!("{phase} timed out after {}ms", after.as_millis()),
    )
}

/// Builds the `HEAD` request used to probe the server.
pub(crate) fn probe_request(host: &str) -> String {
    format!(
        "HEAD / HTTP/1.1\r\n\
         Host: {host}\r\n\
         User-Agent: {PROBE_USER_AGENT}\r\n\
         Accept: */*\r\n\
         Connection: close\r\n\
         \r\n",
    )
}

async fn send_probe(stream: &mut TlsStream<TcpStream>, host: &str) -> io::Result<()> {
    stream.write_all(probe_request(host).as_bytes()).await?;
    stream.flush().await
}

async fn read_status(stream: &mut TlsStream<TcpStream>) -> io::Result<Option<u16>> {
    let mut buf = vec![0u8; PROBE_READ_LIMIT];
    let mut filled = 0;
    while filled < buf.len() {
        let n = stream.read(&mut buf[filled..]).await?;
        if n == 0 {
            break;
        }
        filled += n;
        if buf[..filled].windows(2).any(|w| w == b"\r\n") {
            break;
        }
    }
    Ok(parse_status_code(&buf[..filled]))
}

/// Extracts the status code from the first line of an HTTP response.
pub(crate) fn parse_status_code(response: &[u8]) -> Option<u16> {
    let text = std::str::from_utf8(response).ok()?;
    let status_line = text.lines().next()?;
    let mut parts = status_line.split_whitespace();
    if !parts.next()?.starts_with("HTTP/") {
        return None;
    }
    let code = parts.next()?;
    if code.len() != 3 {
        return None;
    }
    code.parse().ok()
}
