//! Error types for certificate fetching and fingerprinting.
//!
//! Every failure the tool can hit is a [`TLSFingerprintError`]. Variants are
//! grouped into an [`ErrorKind`] which decides the process exit status.

use std::fmt;
use std::io;

/// Pipeline stage at which a timeout fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// TCP connect
    Connect,
    /// TLS handshake
    Handshake,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Connect => write!(f, "TCP connect"),
            Stage::Handshake => write!(f, "TLS handshake"),
        }
    }
}

/// Coarse classification of a [`TLSFingerprintError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Invalid or missing command-line input
    Argument,
    /// The TCP connection could not be established
    Connection,
    /// The TLS handshake failed or produced no certificate
    Handshake,
    /// Anything else (OpenSSL internals, writing the report)
    Internal,
}

impl ErrorKind {
    /// Process exit status for this kind of failure.
    ///
    /// `2` matches the status clap uses for its own usage errors.
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorKind::Internal => 1,
            ErrorKind::Argument => 2,
            ErrorKind::Connection => 3,
            ErrorKind::Handshake => 4,
        }
    }
}

/// Error type for certificate fetching failures.
#[derive(Debug)]
pub enum TLSFingerprintError {
    /// Invalid input provided to the API
    InvalidInput {
        /// Which field/parameter was invalid
        field: String,
        /// Why it was invalid
        reason: String,
    },

    /// DNS resolution failed for the given hostname
    DnsResolution {
        /// The hostname that failed to resolve
        hostname: String,
        /// The underlying I/O error
        source: io::Error,
    },

    /// TCP connection failed to the target address
    ConnectionFailed {
        /// The address (host:port) that connection failed to
        address: String,
        /// The underlying I/O error
        source: io::Error,
    },

    /// A network operation did not finish within the configured timeout
    Timeout {
        /// Which stage timed out
        stage: Stage,
    },

    /// TLS handshake failed
    HandshakeFailed {
        /// Details about why the handshake failed
        details: String,
    },

    /// The handshake completed but the server presented no certificate
    NoPeerCertificate,

    /// OpenSSL error occurred outside the handshake
    OpenSSLError {
        /// The underlying OpenSSL error
        details: String,
    },

    /// Generic I/O error
    IoError {
        /// The underlying I/O error
        source: io::Error,
    },
}

impl TLSFingerprintError {
    /// Classifies this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput { .. } => ErrorKind::Argument,
            Self::DnsResolution { .. } | Self::ConnectionFailed { .. } => ErrorKind::Connection,
            Self::Timeout {
                stage: Stage::Connect,
            } => ErrorKind::Connection,
            Self::Timeout {
                stage: Stage::Handshake,
            }
            | Self::HandshakeFailed { .. }
            | Self::NoPeerCertificate => ErrorKind::Handshake,
            Self::OpenSSLError { .. } | Self::IoError { .. } => ErrorKind::Internal,
        }
    }

    /// Shortcut for `self.kind().exit_code()`.
    pub fn exit_code(&self) -> i32 {
        self.kind().exit_code()
    }
}

impl fmt::Display for TLSFingerprintError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput { field, reason } => {
                write!(f, "Invalid input for '{}': {}", field, reason)
            }
            Self::DnsResolution { hostname, source } => {
                write!(f, "Failed to resolve hostname: {} ({})", hostname, source)
            }
            Self::ConnectionFailed { address, source } => {
                write!(f, "Connection failed to: {} ({})", address, source)
            }
            Self::Timeout { stage } => {
                write!(f, "Operation timed out: {}", stage)
            }
            Self::HandshakeFailed { details } => {
                write!(f, "TLS handshake failed: {}", details)
            }
            Self::NoPeerCertificate => {
                write!(f, "TLS handshake failed: server presented no certificate")
            }
            Self::OpenSSLError { details } => {
                write!(f, "OpenSSL error: {}", details)
            }
            Self::IoError { source } => {
                write!(f, "I/O error: {}", source)
            }
        }
    }
}

impl std::error::Error for TLSFingerprintError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::DnsResolution { source, .. } => Some(source),
            Self::ConnectionFailed { source, .. } => Some(source),
            Self::IoError { source } => Some(source),
            _ => None,
        }
    }
}

impl From<io::Error> for TLSFingerprintError {
    fn from(e: io::Error) -> Self {
        Self::IoError { source: e }
    }
}

impl From<openssl::error::ErrorStack> for TLSFingerprintError {
    fn from(e: openssl::error::ErrorStack) -> Self {
        Self::OpenSSLError {
            details: e.to_string(),
        }
    }
}

// A blocking socket with a read/write timeout surfaces an expired timeout as
// WANT_READ/WANT_WRITE, which openssl reports as `WouldBlock`.
impl<S> From<openssl::ssl::HandshakeError<S>> for TLSFingerprintError {
    fn from(e: openssl::ssl::HandshakeError<S>) -> Self {
        match e {
            openssl::ssl::HandshakeError::WouldBlock(_) => Self::Timeout {
                stage: Stage::Handshake,
            },
            openssl::ssl::HandshakeError::SetupFailure(stack) => Self::OpenSSLError {
                details: stack.to_string(),
            },
            openssl::ssl::HandshakeError::Failure(mid) => Self::HandshakeFailed {
                details: mid.error().to_string(),
            },
        }
    }
}
