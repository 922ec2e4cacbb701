//! Local servers used by the integration tests.

#![allow(dead_code)]

use std::io::{Read, Write};
use std::net::{SocketAddr, TcpListener};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use openssl::ssl::{SslAcceptor, SslFiletype, SslMethod};

/// Literal digests of `tests/fixtures/example.test.der`, computed once with an
/// independent tool.
pub const FIXTURE_MD5: &str = "6c28a13176b81419ada406376a2bfe1a";
pub const FIXTURE_SHA1: &str = "80109aaab4d48b4f0ad6e5ca446d3dc679a13a48";
pub const FIXTURE_SHA256: &str =
    "070f32c79327445b62aec83f782500f2e4a572f9891df23c9d7fa85a857aa2a4";

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub fn fixture_der() -> Vec<u8> {
    std::fs::read(fixture_path("example.test.der")).unwrap()
}

/// TLS server presenting the fixture certificate to a single client.
pub fn spawn_tls_server() -> (SocketAddr, thread::JoinHandle<()>) {
    let mut acceptor = SslAcceptor::mozilla_intermediate_v5(SslMethod::tls()).unwrap();
    acceptor
        .set_private_key_file(fixture_path("example.test.key"), SslFiletype::PEM)
        .unwrap();
    acceptor
        .set_certificate_chain_file(fixture_path("example.test.pem"))
        .unwrap();
    acceptor.check_private_key().unwrap();
    let acceptor = acceptor.build();

    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let address = listener.local_addr().unwrap();
    let handle = thread::spawn(move || {
        if let Ok((stream, _)) = listener.accept() {
            // The client hangs up right after the handshake, so errors are expected.
            let _ = acceptor.accept(stream);
        }
    });
    (address, handle)
}

/// Plain TCP server that answers the ClientHello with an SSH banner.
pub fn spawn_plaintext_server() -> (SocketAddr, thread::JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let address = listener.local_addr().unwrap();
    let handle = thread::spawn(move || {
        if let Ok((mut stream, _)) = listener.accept() {
            let mut buf = [0u8; 1024];
            let _ = stream.read(&mut buf);
            let _ = stream.write_all(b"SSH-2.0-OpenSSH_9.6\r\nProtocol mismatch.\r\n");
        }
    });
    (address, handle)
}

/// Server that accepts and then says nothing for `hold`.
pub fn spawn_silent_server(hold: Duration) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let address = listener.local_addr().unwrap();
    thread::spawn(move || {
        if let Ok((stream, _)) = listener.accept() {
            thread::sleep(hold);
            drop(stream);
        }
    });
    address
}

/// A port on 127.0.0.1 with nothing listening.
pub fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}
