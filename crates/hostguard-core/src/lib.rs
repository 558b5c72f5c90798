//! # Hostguard Core
//!
//! SSH host key verification against a known_hosts trust store.
//! Decides, once per handshake, whether the key a server presented is trusted
//! for the host the caller configured.
//!
//! ## Threat Coverage
//!
//! | Threat | Check | Verdict |
//! |--------|-------|---------|
//! | Transport connected somewhere else | Configured host vs. reported hostname | `HostMismatch` |
//! | Man-in-the-middle / rotated key | Fingerprint vs. trusted entries | `UntrustedKey` |
//! | Leaked host key | `@revoked` entries | `Revoked` |
//! | Downgrade to a weak digest | Policy fingerprint preference | `UntrustedKey` |
//! | Corrupted trust data | Fail-closed parse | `ParseError` |
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                       HOSTGUARD CORE                            │
//! ├─────────────────────────────────────────────────────────────────┤
//! │                                                                 │
//! │   transport handshake                                           │
//! │          │  PresentedCertificate                                │
//! │          ▼                                                      │
//! │   ┌─────────────────┐      ┌──────────────────────────┐         │
//! │   │ HostKeyVerifier │─────▶│ hostname: bare/normalize │         │
//! │   │   (policy)      │      └──────────────────────────┘         │
//! │   └────────┬────────┘                                           │
//! │            │ entries_for(host)                                  │
//! │            ▼                                                    │
//! │   ┌─────────────────┐                                           │
//! │   │   TrustStore    │  ← hostguard-store                        │
//! │   └────────┬────────┘                                           │
//! │            ▼                                                    │
//! │     Accept | Reject { reason }                                  │
//! │                                                                 │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use hostguard_core::{HostKeyVerifier, PresentedCertificate, TrustStore, Verdict};
//!
//! let store = TrustStore::parse(&known_hosts_bytes)?;
//! let cert = PresentedCertificate::from_host_key(server_hostname, host_key_blob);
//!
//! match HostKeyVerifier::default().verify("git.example.com:2222", &store, Some(&cert)) {
//!     Verdict::Accept => continue_handshake(),
//!     Verdict::Reject { reason } => abort(reason),
//! }
//! ```
//!
//! ## Security Notes
//!
//! - The configured host is authoritative; the reported hostname is only checked
//! - Only fingerprints are compared, never the raw key
//! - Fingerprint kinds are tried strongest first, restricted by policy
//! - A matching `@revoked` entry wins over any trusted entry
//! - Unparseable trust data rejects, it never falls back to trusting nothing
//!
//! ## References
//!
//! - `ssh(1)` - StrictHostKeyChecking
//! - `sshd(8)` - SSH_KNOWN_HOSTS FILE FORMAT
//! - RFC 4251 §4.1 - Host Keys

mod certificate;
mod config;
mod error;
pub mod hostname;
mod verdict;
mod verifier;

pub use certificate::PresentedCertificate;
pub use config::{PortHandling, VerifierConfig, VerifyPolicy};
pub use error::VerifierError;
pub use verdict::{RejectCategory, RejectReason, Verdict};
pub use verifier::{verify, verify_known_hosts, HostKeyVerifier};

// Re-export store types for convenience
pub use hostguard_store::{Fingerprint, HashKind, StoreError, TrustEntry, TrustStore};

/// Core result type for hostguard operations.
pub type Result<T> = std::result::Result<T, VerifierError>;

#[cfg(test)]
mod tests;
