//! Verdict types for host key verification results.

use hostguard_store::HashKind;
use serde::{Deserialize, Serialize};

/// The outcome of verifying one presented host key.
///
/// - `Accept`: the key is trusted for the configured host, proceed with the handshake
/// - `Reject`: abort the connection, with the reason
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    /// Presented key matches a trusted entry for the host.
    Accept,

    /// Presented key is not trusted. Do not connect.
    Reject {
        /// The reason for rejecting.
        reason: RejectReason,
    },
}

impl Verdict {
    /// Create an Accept verdict.
    pub fn accept() -> Self {
        Self::Accept
    }

    /// Create a Reject verdict with the given reason.
    pub fn reject(reason: RejectReason) -> Self {
        Self::Reject { reason }
    }

    /// Returns true if this is an Accept verdict.
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accept)
    }

    /// Returns true if this is a Reject verdict.
    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Reject { .. })
    }

    /// The reject reason, if any.
    pub fn reason(&self) -> Option<&RejectReason> {
        match self {
            Self::Accept => None,
            Self::Reject { reason } => Some(reason),
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Accept => write!(f, "accepted"),
            Self::Reject { reason } => write!(f, "rejected: {}", reason),
        }
    }
}

/// Reasons for rejecting a host key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectReason {
    /// The transport supplied no certificate, or one with nothing in it.
    NoCertificate,

    /// The server reported a different host than the one configured.
    HostMismatch {
        /// Configured host, port stripped.
        configured: String,
        /// Hostname reported by the transport.
        presented: String,
    },

    /// No trusted entry for the host carries the presented key.
    UntrustedKey {
        /// Normalized host that was looked up.
        host: String,
        /// Fingerprint kind compared, `None` if the certificate advertised no
        /// kind the policy allows.
        kind: Option<HashKind>,
        /// Number of trusted entries that matched the host.
        candidates: usize,
    },

    /// The presented key is listed on a `@revoked` line for the host.
    Revoked {
        /// Normalized host.
        host: String,
        /// Line of the revocation entry.
        line: usize,
    },

    /// The known_hosts data could not be parsed.
    ParseError {
        /// Offending line.
        line: usize,
        /// Parser message.
        message: String,
    },
}

impl RejectReason {
    /// Broad class of the failure.
    pub fn category(&self) -> RejectCategory {
        match self {
            Self::NoCertificate => RejectCategory::MissingCertificate,
            Self::HostMismatch { .. } | Self::UntrustedKey { .. } | Self::Revoked { .. } => {
                RejectCategory::ServerIdentity
            }
            Self::ParseError { .. } => RejectCategory::LocalTrustData,
        }
    }

    /// True when the host is known but none of its keys matched.
    pub fn is_key_changed(&self) -> bool {
        matches!(self, Self::UntrustedKey { candidates, .. } if *candidates > 0)
    }
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoCertificate => write!(f, "No host key presented"),
            Self::HostMismatch { configured, presented } => {
                write!(
                    f,
                    "Host mismatch: configured '{}', server reported '{}'",
                    configured, presented
                )
            }
            Self::UntrustedKey { host, kind: None, .. } => {
                write!(f, "No usable fingerprint presented for '{}'", host)
            }
            Self::UntrustedKey { host, candidates: 0, .. } => {
                write!(f, "Unknown host '{}': no trusted keys", host)
            }
            Self::UntrustedKey { host, kind: Some(kind), candidates } => {
                write!(
                    f,
                    "Host key for '{}' changed: {} fingerprint matches none of {} trusted keys",
                    host, kind, candidates
                )
            }
            Self::Revoked { host, line } => {
                write!(f, "Host key for '{}' is revoked (line {})", host, line)
            }
            Self::ParseError { message, .. } => {
                write!(f, "Invalid known_hosts data: {}", message)
            }
        }
    }
}

/// Coarse grouping of reject reasons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectCategory {
    /// Nothing was presented.
    MissingCertificate,
    /// The server identity is unknown, changed, or revoked.
    ServerIdentity,
    /// The local known_hosts data is malformed.
    LocalTrustData,
}
