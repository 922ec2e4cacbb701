//! Rendering of fingerprint reports.

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::config::OutputFormat;
use crate::error::TLSFingerprintError;
use crate::fingerprint::FingerprintSet;

/// Everything printed for one host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// Host exactly as it was given on the command line
    pub host: String,
    pub port: u16,
    pub protocol: Option<String>,
    pub cipher: Option<String>,
    pub fingerprints: FingerprintSet,
}

impl Report {
    /// Plain text form: the host, then one `ALG: hex` line per digest.
    pub fn to_text(&self) -> String {
        let mut out = format!("{}\n", self.host);
        for (algorithm, hex) in self.fingerprints.iter() {
            out.push_str(&format!("{}: {}\n", algorithm, hex));
        }
        out
    }

    pub fn to_json(&self) -> Result<String, TLSFingerprintError> {
        serde_json::to_string_pretty(self).map_err(|e| TLSFingerprintError::IoError {
            source: e.into(),
        })
    }

    /// Writes the whole report in `format` and flushes `writer`.
    pub fn write_to<W: Write>(
        &self,
        writer: &mut W,
        format: OutputFormat,
    ) -> Result<(), TLSFingerprintError> {
        let rendered = match format {
            OutputFormat::Text => self.to_text(),
            OutputFormat::Json => self.to_json()? + "\n",
        };
        writer.write_all(rendered.as_bytes())?;
        writer.flush()?;
        Ok(())
    }
}
