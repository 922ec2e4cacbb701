//! Runs the built binary and checks its output streams and exit status.

mod common;

use std::process::{Command, Output};

use common::*;

fn tlsfingerprint(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_tlsfingerprint"))
        .args(args)
        .output()
        .unwrap()
}

#[test]
fn test_prints_host_and_fingerprints() {
    let (address, server) = spawn_tls_server();
    let port = address.port().to_string();

    let output = tlsfingerprint(&["--host", "127.0.0.1", "--port", &port]);
    server.join().unwrap();

    assert!(output.status.success(), "{:?}", output);
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        format!(
            "127.0.0.1\nMD5: {}\nSHA1: {}\nSHA256: {}\n",
            FIXTURE_MD5, FIXTURE_SHA1, FIXTURE_SHA256
        )
    );
}

#[test]
fn test_json_output() {
    let (address, server) = spawn_tls_server();
    let port = address.port().to_string();

    let output = tlsfingerprint(&["--host", "127.0.0.1", "-p", &port, "--output", "json"]);
    server.join().unwrap();

    assert!(output.status.success(), "{:?}", output);
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["host"], "127.0.0.1");
    assert_eq!(value["port"], address.port());
    assert_eq!(value["fingerprints"]["sha256"], FIXTURE_SHA256);
}

#[test]
fn test_missing_host_fails_before_connecting() {
    let port = closed_port().to_string();

    let output = tlsfingerprint(&["--port", &port]);

    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("--host"));
}

#[test]
fn test_empty_host_is_argument_error() {
    let output = tlsfingerprint(&["--host", ""]);

    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid input for 'host'"));
}

#[test]
fn test_closed_port_exits_with_connection_error() {
    let port = closed_port().to_string();

    let output = tlsfingerprint(&["--host", "127.0.0.1", "--port", &port, "--timeout", "5"]);

    assert_eq!(output.status.code(), Some(3));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Error: Connection failed"));
}

#[test]
fn test_plaintext_port_exits_with_handshake_error() {
    let (address, server) = spawn_plaintext_server();
    let port = address.port().to_string();

    let output = tlsfingerprint(&["--host", "127.0.0.1", "--port", &port, "--timeout", "5"]);
    server.join().unwrap();

    assert_eq!(output.status.code(), Some(4));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Error: TLS handshake failed"));
}
