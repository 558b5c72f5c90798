//! # Hostguard Store - Known Hosts Trust Store
//!
//! Parses OpenSSH `known_hosts` data into an immutable, queryable trust store.
//! It is the leaf component of hostguard: it knows nothing about handshakes or
//! verdicts, only which keys are trusted for which host patterns.
//!
//! ## Purpose
//!
//! 1. **Parsing** - Line-oriented, fail-closed parsing of known_hosts blobs
//!    (usually freshly scanned from the server rather than read from disk).
//!
//! 2. **Host Matching** - Plain, wildcard, negated, bracketed (`[host]:port`) and
//!    hashed (`|1|salt|hash`) host patterns.
//!
//! 3. **Fingerprints** - SHA-256, SHA-1 and MD5 digests of trusted keys, for
//!    comparison against what the SSH transport reports.
//!
//! ## Threat Model
//!
//! | Threat | Description | Defense |
//! |--------|-------------|---------|
//! | Corrupted pin | A damaged key line silently dropped, trusting nothing or something else | Fail-closed parse |
//! | Key substitution | Server presents a different key for a pinned host | Per-entry fingerprints |
//! | Compromised key | A pinned key is known to be leaked | `@revoked` marker surfaced on entries |
//! | Host enumeration | Known_hosts leaks the hosts a user connects to | Hashed host names supported |
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                     KNOWN HOSTS STORE                     │
//! ├───────────────────────────────────────────────────────────┤
//! │                                                           │
//! │   known_hosts bytes                                       │
//! │          │                                                │
//! │          ▼                                                │
//! │   ┌─────────────┐   ssh-key    ┌─────────────────────┐    │
//! │   │   PARSER    │─────────────▶│     TrustStore      │    │
//! │   │ line by line│              │  [TrustEntry, ...]  │    │
//! │   └─────────────┘              └──────────┬──────────┘    │
//! │                                           │               │
//! │                   ┌───────────────────────┼───────────┐   │
//! │                   ▼                                   ▼   │
//! │          ┌─────────────────┐              ┌─────────────┐ │
//! │          │ PATTERN MATCHER │              │ FINGERPRINT │ │
//! │          │ glob / ! / |1|  │              │ SHA256/1/MD5│ │
//! │          └─────────────────┘              └─────────────┘ │
//! │                                                           │
//! └───────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use hostguard_store::{HashKind, TrustStore};
//!
//! let blob = b"[git.example.com]:2222 ssh-ed25519 AAAAC3NzaC1lZDI1NTE5AAAAIOMqqnkVzrm0SdG6UOoqKLsabgH5C9okWi0dh2l9GKJl\n";
//! let store = TrustStore::parse(blob).unwrap();
//!
//! for entry in store.entries_for("[git.example.com]:2222") {
//!     println!("{} {}", entry.key().key_type(), entry.key().fingerprint(HashKind::Sha256));
//! }
//! ```
//!
//! ## References
//!
//! - `sshd(8)` - SSH_KNOWN_HOSTS FILE FORMAT
//! - RFC 4253 §6.6 - Public Key Algorithms
//! - RFC 4716 §4 - Public Key Fingerprints

pub mod error;
pub mod fingerprint;
pub mod models;
pub mod parser;
pub mod pattern;

pub use error::{FingerprintError, Result, StoreError};
pub use fingerprint::{Fingerprint, HashKind};
pub use models::{HostPattern, Marker, TrustEntry, TrustStore, TrustedKey};
pub use parser::parse;
pub use pattern::PatternMatch;
