//! Run configuration for tlsfingerprint.
//!
//! Settings are layered: [`Config::default`] supplies the defaults and the
//! command-line layer built by [`Config::from_cli_args`] is merged on top of
//! it. [`Config::validate`] turns the merged layer into [`Settings`].
//!
//! # Configuration Precedence
//!
//! 1. Default values (lowest priority)
//! 2. Command-line arguments (highest priority)

use std::time::Duration;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::TLSFingerprintError;

/// Port used when none is given; the MQTT-over-TLS port.
pub const DEFAULT_PORT: u16 = 8883;

/// Connect and handshake timeout used when none is given.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// How the report is written to standard output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Host line followed by one `ALG: hex` line per digest
    Text,
    /// Pretty-printed JSON document
    Json,
}

/// One configuration layer.
///
/// All fields are optional so layers can be merged; missing values are filled
/// by the layer underneath.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Config {
    /// Host to connect to
    pub host: Option<String>,
    /// TCP port
    pub port: Option<u16>,
    /// Connect/handshake timeout in seconds; 0 waits forever
    pub timeout_secs: Option<u64>,
    /// Output format
    pub output: Option<OutputFormat>,
}

/// Fully resolved, validated settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Host exactly as given by the user
    pub host: String,
    pub port: u16,
    /// `None` means no timeout
    pub timeout: Option<Duration>,
    pub output: OutputFormat,
}

impl Default for Config {
    /// Default layer: port 8883, 30 second timeout, text output, no host.
    fn default() -> Self {
        Config {
            host: None,
            port: Some(DEFAULT_PORT),
            timeout_secs: Some(DEFAULT_TIMEOUT_SECS),
            output: Some(OutputFormat::Text),
        }
    }
}

impl Config {
    /// Merges this configuration with another, prioritizing the other's values.
    ///
    /// For each field, if `other` has a value it overrides this config's
    /// value, otherwise the current value is kept.
    pub fn merge_with(mut self, other: Config) -> Self {
        if other.host.is_some() {
            self.host = other.host;
        }
        if other.port.is_some() {
            self.port = other.port;
        }
        if other.timeout_secs.is_some() {
            self.timeout_secs = other.timeout_secs;
        }
        if other.output.is_some() {
            self.output = other.output;
        }
        self
    }

    /// Creates the command-line layer. Only provided arguments are set.
    pub fn from_cli_args(
        host: Option<String>,
        port: Option<u16>,
        timeout_secs: Option<u64>,
        output: Option<OutputFormat>,
    ) -> Self {
        Config {
            host,
            port,
            timeout_secs,
            output,
        }
    }

    /// Resolves this layer into [`Settings`].
    ///
    /// Fails with [`TLSFingerprintError::InvalidInput`] when the host is
    /// missing or blank, or the port is 0. The host itself is never altered.
    pub fn validate(self) -> Result<Settings, TLSFingerprintError> {
        let host = match self.host {
            Some(host) if !host.trim().is_empty() => host,
            Some(_) => {
                return Err(TLSFingerprintError::InvalidInput {
                    field: "host".to_string(),
                    reason: "cannot be empty".to_string(),
                })
            }
            None => {
                return Err(TLSFingerprintError::InvalidInput {
                    field: "host".to_string(),
                    reason: "is required".to_string(),
                })
            }
        };

        let port = self.port.unwrap_or(DEFAULT_PORT);
        if port == 0 {
            return Err(TLSFingerprintError::InvalidInput {
                field: "port".to_string(),
                reason: "must be between 1 and 65535".to_string(),
            });
        }

        let timeout = match self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS) {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        };

        Ok(Settings {
            host,
            port,
            timeout,
            output: self.output.unwrap_or(OutputFormat::Text),
        })
    }
}
