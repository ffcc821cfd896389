//! Deterministic document identity.
//!
//! The id of a document is the upper-case hex digest of its output path, so
//! re-indexing the same file overwrites the same document.

use std::fmt;
use std::str::FromStr;

use digest::DynDigest;
use serde::Deserialize;

use crate::errors::UnsupportedDigestError;

/// Digest algorithms available for id generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum DigestAlgorithm {
    Md5,
    Sha1,
    Sha224,
    Sha256,
    Sha384,
    Sha512,
    Sha3_224,
    Sha3_256,
    Sha3_384,
    Sha3_512,
}

impl DigestAlgorithm {
    /// Canonical name of the algorithm.
    pub fn name(&self) -> &'static str {
        match self {
            DigestAlgorithm::Md5 => "MD5",
            DigestAlgorithm::Sha1 => "SHA-1",
            DigestAlgorithm::Sha224 => "SHA-224",
            DigestAlgorithm::Sha256 => "SHA-256",
            DigestAlgorithm::Sha384 => "SHA-384",
            DigestAlgorithm::Sha512 => "SHA-512",
            DigestAlgorithm::Sha3_224 => "SHA3-224",
            DigestAlgorithm::Sha3_256 => "SHA3-256",
            DigestAlgorithm::Sha3_384 => "SHA3-384",
            DigestAlgorithm::Sha3_512 => "SHA3-512",
        }
    }

    fn hasher(&self) -> Box<dyn DynDigest> {
        match self {
            DigestAlgorithm::Md5 => Box::new(md5::Md5::default()),
            DigestAlgorithm::Sha1 => Box::new(sha1::Sha1::default()),
            DigestAlgorithm::Sha224 => Box::new(sha2::Sha224::default()),
            DigestAlgorithm::Sha256 => Box::new(sha2::Sha256::default()),
            DigestAlgorithm::Sha384 => Box::new(sha2::Sha384::default()),
            DigestAlgorithm::Sha512 => Box::new(sha2::Sha512::default()),
            DigestAlgorithm::Sha3_224 => Box::new(sha3::Sha3_224::default()),
            DigestAlgorithm::Sha3_256 => Box::new(sha3::Sha3_256::default()),
            DigestAlgorithm::Sha3_384 => Box::new(sha3::Sha3_384::default()),
            DigestAlgorithm::Sha3_512 => Box::new(sha3::Sha3_512::default()),
        }
    }

    /// Digest `input` and return it as upper-case hex.
    pub fn hex_digest(&self, input: &[u8]) -> String {
        let mut hasher = self.hasher();
        hasher.update(input);
        hex::encode_upper(hasher.finalize())
    }

    /// Derive the id of a document from its output path.
    pub fn generate_id(&self, output_path: &str) -> String {
        self.hex_digest(output_path.as_bytes())
    }
}

impl FromStr for DigestAlgorithm {
    type Err = UnsupportedDigestError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let well_formed =
            !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-');
        if !well_formed {
            return Err(UnsupportedDigestError::new(name));
        }

        match name.to_ascii_uppercase().as_str() {
            "MD5" => Ok(DigestAlgorithm::Md5),
            "SHA" | "SHA1" | "SHA-1" => Ok(DigestAlgorithm::Sha1),
            "SHA224" | "SHA-224" => Ok(DigestAlgorithm::Sha224),
            "SHA256" | "SHA-256" => Ok(DigestAlgorithm::Sha256),
            "SHA384" | "SHA-384" => Ok(DigestAlgorithm::Sha384),
            "SHA512" | "SHA-512" => Ok(DigestAlgorithm::Sha512),
            "SHA3-224" => Ok(DigestAlgorithm::Sha3_224),
            "SHA3-256" => Ok(DigestAlgorithm::Sha3_256),
            "SHA3-384" => Ok(DigestAlgorithm::Sha3_384),
            "SHA3-512" => Ok(DigestAlgorithm::Sha3_512),
            _ => Err(UnsupportedDigestError::new(name)),
        }
    }
}

impl TryFrom<String> for DigestAlgorithm {
    type Error = UnsupportedDigestError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        name.parse()
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Derive an id from `output_path` using the algorithm named `algorithm`.
pub fn generate_id(algorithm: &str, output_path: &str) -> Result<String, UnsupportedDigestError> {
    Ok(algorithm.parse::<DigestAlgorithm>()?.generate_id(output_path))
}
