// Shared test helpers: local TLS and TCP servers.
//
// Every server binds 127.0.0.1 on an ephemeral port and lives until the
// returned handle is dropped.

use std::net::SocketAddr;
use std::sync::Arc;

use rcgen::{CertificateParams, DistinguishedName, DnType, KeyPair};
use rustls::pki_types::{CertificateDer, PrivateKeyDer, PrivatePkcs8KeyDer};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_rustls::TlsAcceptor;

/// Name the test certificate is issued for.
#[allow(dead_code)]
pub const TEST_DOMAIN: &str = "inspector.test";

/// A running test server. Aborted on drop.
pub struct TestServer {
    pub addr: SocketAddr,
    #[allow(dead_code)]
    pub cert_der: CertificateDer<'static>,
    handle: JoinHandle<()>,
}

impl TestServer {
    #[allow(dead_code)]
    pub fn port(&self) -> u16 {
        self.addr.port()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn self_signed(
    common_name: &str,
    dns_names: &[&str],
) -> (CertificateDer<'static>, PrivateKeyDer<'static>) {
    let mut params = CertificateParams::new(
        dns_names.iter().map(|s| s.to_string()).collect::<Vec<_>>(),
    )
    .expect("Failed to build certificate params");
    let mut dn = DistinguishedName::new();
    dn.push(DnType::CommonName, common_name);
    dn.push(DnType::OrganizationName, "Inspector Test");
    params.distinguished_name = dn;

    let key_pair = KeyPair::generate().expect("Failed to generate key pair");
    let cert = params
        .self_signed(&key_pair)
        .expect("Failed to self-sign certificate");
    let key = PrivateKeyDer::Pkcs8(PrivatePkcs8KeyDer::from(key_pair.serialize_der()));
    (cert.der().clone(), key)
}

/// Starts a TLS server presenting a self-signed certificate for
/// `TEST_DOMAIN`, `*.TEST_DOMAIN` and `localhost`.
///
/// Each connection completes the handshake, reads the probe and answers
/// `204 No Content`.
#[allow(dead_code)]
pub async fn spawn_tls_server() -> TestServer {
    let wildcard = format!("*.{TEST_DOMAIN}");
    let (cert_der, key) = self_signed(TEST_DOMAIN, &[TEST_DOMAIN, &wildcard, "localhost"]);

    let config = rustls::ServerConfig::builder_with_provider(Arc::new(
        rustls::crypto::ring::default_provider(),
    ))
    .with_safe_default_protocol_versions()
    .expect("Failed to select protocol versions")
    .with_no_client_auth()
    .with_single_cert(vec![cert_der.clone()], key)
    .expect("Failed to build server config");
    let acceptor = TlsAcceptor::from(Arc::new(config));

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Failed to read local address");

    let handle = tokio::spawn(async move {
        while let Ok((sock, _)) = listener.accept().await {
            let acceptor = acceptor.clone();
            tokio::spawn(async move {
                // Strict clients abort the handshake; that is expected here
                let Ok(mut tls) = acceptor.accept(sock).await else {
                    return;
                };
                let mut buf = [0u8; 1024];
                let _ = tls.read(&mut buf).await;
                let _ = tls
                    .write_all(b"HTTP/1.1 204 No Content\r\nConnection: close\r\n\r\n")
                    .await;
                let _ = tls.shutdown().await;
            });
        }
    });

    TestServer {
        addr,
        cert_der,
        handle,
    }
}

/// Starts a TCP server that accepts connections and never writes a byte.
#[allow(dead_code)]
pub async fn spawn_silent_server() -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Failed to read local address");

    let handle = tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((sock, _)) = listener.accept().await {
            held.push(sock);
        }
    });

    TestServer {
        addr,
        cert_der: CertificateDer::from(Vec::new()),
        handle,
    }
}

/// Returns a loopback port with nothing listening on it.
#[allow(dead_code)]
pub async fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let port = listener
        .local_addr()
        .expect("Failed to read local address")
        .port();
    drop(listener);
    port
}
