//! Fetches a server's TLS certificate and computes its fingerprints.
//!
//! ```no_run
//! use tlsfingerprint::config::Config;
//!
//! let settings = Config::default()
//!     .merge_with(Config::from_cli_args(Some("broker.example.test".into()), None, None, None))
//!     .validate()?;
//! let report = tlsfingerprint::inspect(&settings)?;
//! println!("{}", report.fingerprints.sha256);
//! # Ok::<(), tlsfingerprint::TLSFingerprintError>(())
//! ```

pub mod config;
pub mod error;
pub mod fetch;
pub mod fingerprint;
pub mod report;

pub use config::{Config, OutputFormat, Settings};
pub use error::{ErrorKind, Stage, TLSFingerprintError};
pub use fetch::{fetch_peer_certificate, PeerCertificate};
pub use fingerprint::{FingerprintSet, HashAlgorithm};
pub use report::Report;

use tracing::info;

/// Fetches the certificate described by `settings` and fingerprints it.
pub fn inspect(settings: &Settings) -> Result<Report, TLSFingerprintError> {
    let certificate = fetch_peer_certificate(&settings.host, settings.port, settings.timeout)?;
    let fingerprints = FingerprintSet::from_der(&certificate.der)?;
    info!(
        host = %settings.host,
        port = settings.port,
        sha256 = %fingerprints.sha256,
        "certificate fingerprinted"
    );

    Ok(Report {
        host: settings.host.clone(),
        port: settings.port,
        protocol: Some(certificate.protocol),
        cipher: certificate.cipher,
        fingerprints,
    })
}
