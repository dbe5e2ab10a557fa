//! Local HTTPS servers for tests, signed by a throwaway certificate authority.

use rcgen::{BasicConstraints, CertificateParams, DnType, IsCa, KeyPair};
use rustls::pki_types::{CertificateDer, PrivateKeyDer, PrivatePkcs8KeyDer};
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio_rustls::TlsAcceptor;

/// A CA that exists only for one test. Clients trust it only when told to.
pub(crate) struct TestAuthority {
    cert: rcgen::Certificate,
    key: KeyPair,
}

impl TestAuthority {
    pub(crate) fn new() -> Self {
        let key = KeyPair::generate().unwrap();
        let mut params = CertificateParams::new(Vec::<String>::new()).unwrap();
        params.is_ca = IsCa::Ca(BasicConstraints::Unconstrained);
        params
            .distinguished_name
            .push(DnType::CommonName, "tlsup test authority");
        let cert = params.self_signed(&key).unwrap();
        Self { cert, key }
    }

    pub(crate) fn root_certificate(&self) -> reqwest::Certificate {
        reqwest::Certificate::from_der(self.cert.der()).unwrap()
    }

    fn issue_localhost(&self) -> (Vec<CertificateDer<'static>>, PrivateKeyDer<'static>) {
        let key = KeyPair::generate().unwrap();
        let params =
            CertificateParams::new(vec!["localhost".to_string(), "127.0.0.1".to_string()])
                .unwrap();
        let cert = params.signed_by(&key, &self.cert, &self.key).unwrap();
        let key = PrivateKeyDer::Pkcs8(PrivatePkcs8KeyDer::from(key.serialize_der()));
        (vec![cert.der().clone(), self.cert.der().clone()], key)
    }
}

/// Canned answer for one request path. Unknown paths get a 404.
pub(crate) struct Route {
    path: &'static str,
    status: u16,
    location: Option<String>,
}

impl Route {
    pub(crate) fn status(path: &'static str, status: u16) -> Self {
        Self {
            path,
            status,
            location: None,
        }
    }

    pub(crate) fn redirect(path: &'static str, location: impl Into<String>) -> Self {
        Self {
            path,
            status: 301,
            location: Some(location.into()),
        }
    }
}

/// Serve `routes` over HTTPS on 127.0.0.1 with a certificate issued by
/// `authority`. Returns the port.
pub(crate) async fn https_server(authority: &TestAuthority, routes: Vec<Route>) -> u16 {
    let (chain, key) = authority.issue_localhost();
    let provider = Arc::new(rustls::crypto::ring::default_provider());
    let config = rustls::ServerConfig::builder_with_provider(provider)
        .with_safe_default_protocol_versions()
        .unwrap()
        .with_no_client_auth()
        .with_single_cert(chain, key)
        .unwrap();
    let acceptor = TlsAcceptor::from(Arc::new(config));
    let routes = Arc::new(routes);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        while let Ok((socket, _)) = listener.accept().await {
            let acceptor = acceptor.clone();
            let routes = Arc::clone(&routes);
            tokio::spawn(async move {
                // Clients that reject the certificate abort the handshake here.
                let Ok(mut stream) = acceptor.accept(socket).await else {
                    return;
                };
                let Some(path) = read_request_path(&mut stream).await else {
                    return;
                };
                let _ = stream.write_all(respond(&routes, &path).as_bytes()).await;
                let _ = stream.shutdown().await;
            });
        }
    });
    port
}

async fn read_request_path<S: AsyncRead + Unpin>(stream: &mut S) -> Option<String> {
    let mut request = Vec::new();
    let mut buf = [0u8; 1024];
    while !request.windows(4).any(|w| w == b"\r\n\r\n") {
        let n = stream.read(&mut buf).await.ok()?;
        if n == 0 {
            return None;
        }
        request.extend_from_slice(&buf[..n]);
    }
    String::from_utf8_lossy(&request)
        .split_whitespace()
        .nth(1)
        .map(str::to_string)
}

fn respond(routes: &[Route], path: &str) -> String {
    let (status, location) = routes
        .iter()
        .find(|route| route.path == path)
        .map_or((404, None), |route| (route.status, route.location.as_deref()));
    let reason = reqwest::StatusCode::from_u16(status)
        .ok()
        .and_then(|code| code.canonical_reason())
        .unwrap_or("");
    let location = location
        .map(|location| format!("location: {location}\r\n"))
        .unwrap_or_default();

    format!(
        "HTTP/1.1 {status} {reason}\r\n{location}content-length: 0\r\nconnection: close\r\n\r\n"
    )
}
