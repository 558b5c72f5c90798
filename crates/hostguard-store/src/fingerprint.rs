//! # Host Key Fingerprints
//!
//! A fingerprint is a digest of a public key's wire encoding (RFC 4253 §6.6).
//! SSH transports report up to three kinds, mirroring the history of OpenSSH:
//!
//! | Kind | Digest | Text form | Notes |
//! |------|--------|-----------|-------|
//! | `Sha256` | 256-bit | `SHA256:<base64, no padding>` | OpenSSH default since 6.8 |
//! | `Sha1` | 160-bit | `SHA1:<base64, no padding>` | legacy |
//! | `Md5` | 128-bit | `MD5:aa:bb:...` | legacy, pre-6.8 default |
//!
//! Kinds are listed strongest first. [`HashKind::ALL`] preserves that order.
//!
//! ## References
//!
//! - RFC 4716 §4 - MD5 public key fingerprint format
//! - `ssh-keygen(1)` - `-E fingerprint_hash`

use crate::error::FingerprintError;
use base64::engine::general_purpose::STANDARD_NO_PAD;
use base64::Engine as _;
use md5::Md5;
use serde::{Deserialize, Serialize};
use sha1::Sha1;
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

/// Hash algorithm used to fingerprint a host key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashKind {
    /// SHA-256, 32-byte digest.
    Sha256,
    /// SHA-1, 20-byte digest.
    Sha1,
    /// MD5, 16-byte digest.
    Md5,
}

impl HashKind {
    /// All kinds, strongest first.
    pub const ALL: [HashKind; 3] = [HashKind::Sha256, HashKind::Sha1, HashKind::Md5];

    /// Digest length in bytes.
    pub fn digest_len(self) -> usize {
        match self {
            Self::Sha256 => 32,
            Self::Sha1 => 20,
            Self::Md5 => 16,
        }
    }

    /// Digest size in bits.
    pub fn bits(self) -> usize {
        self.digest_len() * 8
    }

    /// The prefix used in the text form.
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Sha256 => "SHA256",
            Self::Sha1 => "SHA1",
            Self::Md5 => "MD5",
        }
    }
}

impl fmt::Display for HashKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

impl FromStr for HashKind {
    type Err = FingerprintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "SHA256" => Ok(Self::Sha256),
            "SHA1" => Ok(Self::Sha1),
            "MD5" => Ok(Self::Md5),
            _ => Err(FingerprintError::UnknownAlgorithm(s.to_string())),
        }
    }
}

/// A host key digest tagged with the hash that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fingerprint {
    /// SHA-256 digest.
    Sha256([u8; 32]),
    /// SHA-1 digest.
    Sha1([u8; 20]),
    /// MD5 digest.
    Md5([u8; 16]),
}

impl Fingerprint {
    /// Computes the fingerprint of a wire-encoded public key.
    pub fn compute(kind: HashKind, key_blob: &[u8]) -> Self {
        match kind {
            HashKind::Sha256 => Self::Sha256(digest::<Sha256, 32>(key_blob)),
            HashKind::Sha1 => Self::Sha1(digest::<Sha1, 20>(key_blob)),
            HashKind::Md5 => Self::Md5(digest::<Md5, 16>(key_blob)),
        }
    }

    /// Wraps raw digest bytes, checking the length against `kind`.
    pub fn from_bytes(kind: HashKind, bytes: &[u8]) -> Result<Self, FingerprintError> {
        let invalid = || FingerprintError::InvalidLength {
            kind,
            expected: kind.digest_len(),
            actual: bytes.len(),
        };
        Ok(match kind {
            HashKind::Sha256 => Self::Sha256(bytes.try_into().map_err(|_| invalid())?),
            HashKind::Sha1 => Self::Sha1(bytes.try_into().map_err(|_| invalid())?),
            HashKind::Md5 => Self::Md5(bytes.try_into().map_err(|_| invalid())?),
        })
    }

    /// The hash kind of this fingerprint.
    pub fn kind(&self) -> HashKind {
        match self {
            Self::Sha256(_) => HashKind::Sha256,
            Self::Sha1(_) => HashKind::Sha1,
            Self::Md5(_) => HashKind::Md5,
        }
    }

    /// Raw digest bytes.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Sha256(d) => d,
            Self::Sha1(d) => d,
            Self::Md5(d) => d,
        }
    }
}

fn digest<D: Digest, const N: usize>(data: &[u8]) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(&D::digest(data));
    out
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.kind())?;
        match self {
            Self::Md5(d) => {
                for (i, byte) in d.iter().enumerate() {
                    if i > 0 {
                        f.write_str(":")?;
                    }
                    write!(f, "{:02x}", byte)?;
                }
                Ok(())
            }
            _ => f.write_str(&STANDARD_NO_PAD.encode(self.as_bytes())),
        }
    }
}

impl FromStr for Fingerprint {
    type Err = FingerprintError;

    /// Parses `SHA256:...`, `SHA1:...` or `MD5:aa:bb:...`.
    ///
    /// Base64 digests are accepted with or without trailing padding.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (prefix, body) = s
            .trim()
            .split_once(':')
            .ok_or(FingerprintError::MissingPrefix)?;
        let kind: HashKind = prefix.parse()?;

        let bytes = match kind {
            HashKind::Md5 => body
                .split(':')
                .map(|pair| {
                    if pair.len() == 2 {
                        u8::from_str_radix(pair, 16).ok()
                    } else {
                        None
                    }
                })
                .collect::<Option<Vec<u8>>>(),
            HashKind::Sha256 | HashKind::Sha1 => {
                STANDARD_NO_PAD.decode(body.trim_end_matches('=')).ok()
            }
        }
        .ok_or(FingerprintError::InvalidEncoding { kind })?;

        Self::from_bytes(kind, &bytes)
    }
}
