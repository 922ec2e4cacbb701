//! Retrieves a server's leaf certificate over a TLS handshake.

use std::io;
use std::net::{IpAddr, SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;

use openssl::ssl::{Ssl, SslContext, SslMethod, SslVerifyMode};
use tracing::{debug, warn};

use crate::error::{Stage, TLSFingerprintError};

/// A peer certificate obtained from a completed handshake.
#[derive(Debug, Clone)]
pub struct PeerCertificate {
    /// DER encoding of the leaf certificate
    pub der: Vec<u8>,
    /// Negotiated protocol version, e.g. `TLSv1.3`
    pub protocol: String,
    /// Negotiated cipher suite name
    pub cipher: Option<String>,
}

/// Connects to `host:port`, performs a TLS handshake and returns the server's
/// leaf certificate.
///
/// # Trust policy
///
/// Peer verification is disabled (`SslVerifyMode::NONE`). Any certificate is
/// accepted, including self-signed ones and ones whose name does not match
/// `host`, because the caller wants to *see* the certificate and pin it out
/// of band. Nothing obtained here is trusted.
///
/// `timeout` bounds each connect attempt and every handshake read and write;
/// `None` waits indefinitely. The socket is closed when this function
/// returns, whether or not it succeeded, and no application data is sent.
pub fn fetch_peer_certificate(
    host: &str,
    port: u16,
    timeout: Option<Duration>,
) -> Result<PeerCertificate, TLSFingerprintError> {
    let addresses = resolve(host, port)?;
    let tcp_stream = connect(host, port, &addresses, timeout)?;
    tcp_stream.set_read_timeout(timeout)?;
    tcp_stream.set_write_timeout(timeout)?;

    let context = connector_context()?;
    let mut connector = Ssl::new(&context)?;
    if use_sni(host) {
        connector.set_hostname(host)?;
    }

    let stream = connector.connect(tcp_stream)?;
    let ssl = stream.ssl();
    let protocol = ssl.version_str().to_string();
    let cipher = ssl.current_cipher().map(|c| c.name().to_string());
    debug!(host, port, %protocol, cipher = ?cipher, "TLS handshake completed");

    let certificate = ssl
        .peer_certificate()
        .ok_or(TLSFingerprintError::NoPeerCertificate)?;
    let der = certificate.to_der()?;
    debug!(bytes = der.len(), "peer certificate encoded as DER");

    Ok(PeerCertificate {
        der,
        protocol,
        cipher,
    })
}

fn connector_context() -> Result<SslContext, TLSFingerprintError> {
    let mut context = SslContext::builder(SslMethod::tls())?;
    context.set_verify(SslVerifyMode::NONE);
    Ok(context.build())
}

fn resolve(host: &str, port: u16) -> Result<Vec<SocketAddr>, TLSFingerprintError> {
    let addresses: Vec<SocketAddr> = (host, port)
        .to_socket_addrs()
        .map_err(|source| TLSFingerprintError::DnsResolution {
            hostname: host.to_string(),
            source,
        })?
        .collect();

    if addresses.is_empty() {
        return Err(TLSFingerprintError::DnsResolution {
            hostname: host.to_string(),
            source: io::Error::new(io::ErrorKind::NotFound, "no addresses returned"),
        });
    }
    debug!(host, addresses = ?addresses, "resolved host");
    Ok(addresses)
}

// Tries each address in resolver order; the last error decides the failure.
fn connect(
    host: &str,
    port: u16,
    addresses: &[SocketAddr],
    timeout: Option<Duration>,
) -> Result<TcpStream, TLSFingerprintError> {
    let mut last_error = io::Error::new(io::ErrorKind::NotFound, "no addresses to connect to");

    for address in addresses {
        let attempt = match timeout {
            Some(timeout) => TcpStream::connect_timeout(address, timeout),
            None => TcpStream::connect(address),
        };
        match attempt {
            Ok(stream) => {
                debug!(%address, "connected");
                return Ok(stream);
            }
            Err(err) => {
                warn!(%address, error = %err, "connect attempt failed");
                last_error = err;
            }
        }
    }

    if last_error.kind() == io::ErrorKind::TimedOut {
        return Err(TLSFingerprintError::Timeout {
            stage: Stage::Connect,
        });
    }
    Err(TLSFingerprintError::ConnectionFailed {
        address: format!("{}:{}", host, port),
        source: last_error,
    })
}

/// SNI carries host names only, never address literals.
fn use_sni(host: &str) -> bool {
    let literal = host.trim_start_matches('[').trim_end_matches(']');
    literal.parse::<IpAddr>().is_err()
}
