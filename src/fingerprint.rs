//! Certificate fingerprints over DER bytes.
//!
//! MD5 and SHA1 are only shown for comparison against pins recorded by older
//! tooling; SHA256 is the one to pin.

use openssl::hash::{hash, MessageDigest};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, Display, EnumIter};

use crate::error::TLSFingerprintError;

/// Digest algorithms printed by the tool, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumIter)]
pub enum HashAlgorithm {
    #[strum(serialize = "MD5")]
    Md5,
    #[strum(serialize = "SHA1")]
    Sha1,
    #[strum(serialize = "SHA256")]
    Sha256,
}

impl HashAlgorithm {
    fn message_digest(self) -> MessageDigest {
        match self {
            HashAlgorithm::Md5 => MessageDigest::md5(),
            HashAlgorithm::Sha1 => MessageDigest::sha1(),
            HashAlgorithm::Sha256 => MessageDigest::sha256(),
        }
    }

    /// Digest length in bytes.
    pub fn output_len(self) -> usize {
        match self {
            HashAlgorithm::Md5 => 16,
            HashAlgorithm::Sha1 => 20,
            HashAlgorithm::Sha256 => 32,
        }
    }

    /// Length of the rendered lowercase hex digest.
    pub fn hex_len(self) -> usize {
        self.output_len() * 2
    }

    /// Hashes `der` and renders the digest as lowercase hex.
    pub fn digest(self, der: &[u8]) -> Result<String, TLSFingerprintError> {
        let digest = hash(self.message_digest(), der)?;
        Ok(to_hex(&digest))
    }
}

/// Renders bytes as contiguous lowercase hex.
pub fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

/// MD5, SHA1 and SHA256 fingerprints of one certificate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FingerprintSet {
    pub md5: String,
    pub sha1: String,
    pub sha256: String,
}

impl FingerprintSet {
    /// Computes all three digests over the same DER bytes.
    ///
    /// Only an internal OpenSSL failure can make this fail.
    pub fn from_der(der: &[u8]) -> Result<FingerprintSet, TLSFingerprintError> {
        Ok(FingerprintSet {
            md5: HashAlgorithm::Md5.digest(der)?,
            sha1: HashAlgorithm::Sha1.digest(der)?,
            sha256: HashAlgorithm::Sha256.digest(der)?,
        })
    }

    pub fn get(&self, algorithm: HashAlgorithm) -> &str {
        match algorithm {
            HashAlgorithm::Md5 => &self.md5,
            HashAlgorithm::Sha1 => &self.sha1,
            HashAlgorithm::Sha256 => &self.sha256,
        }
    }

    /// Yields `(algorithm, hex)` pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (HashAlgorithm, &str)> + '_ {
        HashAlgorithm::iter().map(move |algorithm| (algorithm, self.get(algorithm)))
    }
}
