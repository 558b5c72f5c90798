//! # Core Data Models for the Known Hosts Store
//!
//! A [`TrustStore`] is the parsed form of one known_hosts blob: an ordered list
//! of [`TrustEntry`] values, each binding a set of [`HostPattern`]s to one
//! [`TrustedKey`].
//!
//! ## Threat Model
//!
//! - **Type Confusion**: `Fingerprint` carries its hash kind, so a SHA-1 digest can
//!   never be compared against a SHA-256 digest by accident.
//! - **Silent Drops**: entries are only constructed by the parser from fully valid
//!   lines; there is no "partially trusted" entry.
//! - **Shared Mutation**: the store has no mutating API after construction and is
//!   `Send + Sync`, so it can be shared across concurrent handshakes via `Arc`.
//!
//! ## References
//!
//! - `sshd(8)` - SSH_KNOWN_HOSTS FILE FORMAT
//! - RFC 4253 §6.6 - Public key algorithms and wire encoding

use crate::error::Result;
use crate::fingerprint::{Fingerprint, HashKind};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use ssh_key::{Algorithm, PublicKey};
use std::fmt;

/// Optional marker in front of a known_hosts line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    /// `@cert-authority`: the key is a CA for host certificates.
    CertAuthority,
    /// `@revoked`: the key must never be accepted.
    Revoked,
}

impl Marker {
    /// The marker as written in a known_hosts file.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CertAuthority => "@cert-authority",
            Self::Revoked => "@revoked",
        }
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One host pattern from the comma-separated host field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostPattern {
    /// A hostname, address or `[host]:port`, possibly containing `*` / `?` wildcards.
    Name(String),

    /// `!pattern`: a match vetoes the whole entry.
    Negated(String),

    /// `|1|salt|hash`: HMAC-SHA1 of the host name keyed with `salt`.
    Hashed {
        /// HMAC key.
        salt: Vec<u8>,
        /// Expected HMAC output.
        hash: Vec<u8>,
    },
}

impl HostPattern {
    /// Reads one plain (non-hashed) pattern.
    pub fn parse(pattern: &str) -> Self {
        match pattern.strip_prefix('!') {
            Some(negated) => Self::Negated(negated.to_string()),
            None => Self::Name(pattern.to_string()),
        }
    }
}

impl fmt::Display for HostPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => f.write_str(name),
            Self::Negated(name) => write!(f, "!{}", name),
            Self::Hashed { salt, hash } => {
                write!(f, "|1|{}|{}", STANDARD.encode(salt), STANDARD.encode(hash))
            }
        }
    }
}

/// Trusted key material: the wire-encoded key blob plus its key-type tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrustedKey {
    public_key: PublicKey,
    algorithm: Algorithm,
    blob: Vec<u8>,
}

impl TrustedKey {
    /// Wraps a parsed public key, capturing its wire encoding.
    pub fn from_public_key(public_key: PublicKey) -> std::result::Result<Self, ssh_key::Error> {
        let blob = public_key.to_bytes()?;
        let algorithm = public_key.algorithm();
        Ok(Self {
            public_key,
            algorithm,
            blob,
        })
    }

    /// Parses an OpenSSH public key line (`ssh-ed25519 AAAA... comment`).
    pub fn from_openssh(line: &str) -> std::result::Result<Self, ssh_key::Error> {
        Self::from_public_key(PublicKey::from_openssh(line)?)
    }

    /// Key-type tag, e.g. `ssh-ed25519`.
    pub fn key_type(&self) -> &str {
        self.algorithm.as_str()
    }

    /// Wire-encoded key bytes (what fingerprints are computed over).
    pub fn as_bytes(&self) -> &[u8] {
        &self.blob
    }

    /// The parsed public key.
    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// Fingerprint of this key with the given hash.
    pub fn fingerprint(&self, kind: HashKind) -> Fingerprint {
        Fingerprint::compute(kind, &self.blob)
    }

    /// The key encoded the way known_hosts stores it (base64 of the blob).
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.blob)
    }
}

/// One parsed known_hosts line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrustEntry {
    pub(crate) line: usize,
    pub(crate) marker: Option<Marker>,
    pub(crate) hosts: Vec<HostPattern>,
    pub(crate) key: TrustedKey,
    pub(crate) comment: String,
}

impl TrustEntry {
    /// Line number within the source blob (1-based).
    pub fn line(&self) -> usize {
        self.line
    }

    /// Marker, if the line had one.
    pub fn marker(&self) -> Option<Marker> {
        self.marker
    }

    /// Host patterns this entry applies to.
    pub fn hosts(&self) -> &[HostPattern] {
        &self.hosts
    }

    /// Trusted key for those hosts.
    pub fn key(&self) -> &TrustedKey {
        &self.key
    }

    /// Trailing comment (empty if none).
    pub fn comment(&self) -> &str {
        &self.comment
    }

    /// True for `@revoked` lines.
    pub fn is_revoked(&self) -> bool {
        self.marker == Some(Marker::Revoked)
    }

    /// True for `@cert-authority` lines.
    pub fn is_cert_authority(&self) -> bool {
        self.marker == Some(Marker::CertAuthority)
    }

    /// The host field rendered back to known_hosts syntax.
    pub fn patterns_string(&self) -> String {
        self.hosts
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Immutable, ordered collection of trust entries from one known_hosts blob.
///
/// # Example
///
/// ```rust
/// use hostguard_store::TrustStore;
///
/// let blob = b"# pinned host keys\n\
///     github.com ssh-ed25519 AAAAC3NzaC1lZDI1NTE5AAAAIOMqqnkVzrm0SdG6UOoqKLsabgH5C9okWi0dh2l9GKJl\n";
/// let store = TrustStore::parse(blob).unwrap();
///
/// assert_eq!(store.len(), 1);
/// assert_eq!(store.entries_for("github.com").count(), 1);
/// assert_eq!(store.entries_for("gitlab.com").count(), 0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrustStore {
    entries: Vec<TrustEntry>,
}

impl TrustStore {
    /// Parses a known_hosts blob. See [`crate::parser::parse`].
    pub fn parse(blob: &[u8]) -> Result<Self> {
        crate::parser::parse(blob)
    }

    /// Builds a store from already-parsed entries, keeping their order.
    pub fn from_entries(entries: Vec<TrustEntry>) -> Self {
        Self { entries }
    }

    /// All entries in input order.
    pub fn entries(&self) -> &[TrustEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the blob held no host key lines.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries whose host patterns match `host` (already normalized), in order.
    pub fn entries_for<'a>(&'a self, host: &'a str) -> impl Iterator<Item = &'a TrustEntry> + 'a {
        self.entries.iter().filter(move |entry| entry.matches_host(host))
    }
}

impl<'a> IntoIterator for &'a TrustStore {
    type Item = &'a TrustEntry;
    type IntoIter = std::slice::Iter<'a, TrustEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
