//! The host key verifier.
//!
//! [`HostKeyVerifier`] decides whether the key an SSH server presented during a
//! handshake is trusted for the host the caller meant to reach. It is a pure
//! function of its inputs: no I/O, no caching, no retained certificates.

use crate::certificate::PresentedCertificate;
use crate::config::{PortHandling, VerifierConfig, VerifyPolicy};
use crate::hostname::{bare_host, normalize};
use crate::verdict::{RejectReason, Verdict};

use hostguard_store::{Fingerprint, TrustStore};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Verifies presented host keys against a known_hosts trust store.
///
/// # Security Model
///
/// The pipeline is:
/// 1. Certificate presence
/// 2. Identity reconciliation (configured host vs. reported hostname)
/// 3. Normalization of the configured host into known_hosts form
/// 4. Fingerprint comparison against every entry for that host
///
/// The configured host is authoritative. The hostname reported by the
/// transport only has to agree with it; it is never used for lookup.
/// Every failure is a `Reject` verdict, never an `Accept`.
///
/// # Example
///
/// ```rust
/// use hostguard_core::{HostKeyVerifier, PresentedCertificate, TrustStore};
///
/// let store = TrustStore::parse(
///     b"example.com ssh-ed25519 AAAAC3NzaC1lZDI1NTE5AAAAIOMqqnkVzrm0SdG6UOoqKLsabgH5C9okWi0dh2l9GKJl\n",
/// ).unwrap();
/// let key = store.entries()[0].key().as_bytes().to_vec();
///
/// let verifier = HostKeyVerifier::default();
/// let cert = PresentedCertificate::from_host_key("example.com", key);
/// assert!(verifier.verify("example.com:22", &store, Some(&cert)).is_accepted());
/// ```
#[derive(Debug, Clone, Default)]
pub struct HostKeyVerifier {
    config: VerifierConfig,
}

impl HostKeyVerifier {
    /// Create a verifier with the given configuration.
    pub fn new(config: VerifierConfig) -> Self {
        Self { config }
    }

    /// Create a verifier with default settings and the given policy.
    pub fn with_policy(policy: VerifyPolicy) -> Self {
        Self::new(VerifierConfig {
            policy,
            ..VerifierConfig::default()
        })
    }

    /// The active configuration.
    pub fn config(&self) -> &VerifierConfig {
        &self.config
    }

    /// Verify a presented certificate for `configured_host` (`host` or `host:port`).
    pub fn verify(
        &self,
        configured_host: &str,
        store: &TrustStore,
        presented: Option<&PresentedCertificate>,
    ) -> Verdict {
        let verdict = self.evaluate(configured_host, store, presented);
        self.record(configured_host, &verdict);
        verdict
    }

    /// Parse `known_hosts` bytes and verify against them.
    ///
    /// A store that fails to parse rejects the connection.
    pub fn verify_known_hosts(
        &self,
        configured_host: &str,
        known_hosts: &[u8],
        presented: Option<&PresentedCertificate>,
    ) -> Verdict {
        match TrustStore::parse(known_hosts) {
            Ok(store) => self.verify(configured_host, &store, presented),
            Err(e) => {
                warn!("Refusing '{}': known_hosts unusable: {}", configured_host, e);
                Verdict::reject(RejectReason::ParseError {
                    line: e.line(),
                    message: e.to_string(),
                })
            }
        }
    }

    /// Adapt the verifier to a per-handshake callback.
    ///
    /// The returned closure can be handed to transports that call back once per
    /// connection with whatever certificate they received.
    pub fn callback(
        self,
        configured_host: impl Into<String>,
        store: Arc<TrustStore>,
    ) -> impl Fn(Option<&PresentedCertificate>) -> Verdict + Send + Sync + 'static {
        let configured_host = configured_host.into();
        move |presented: Option<&PresentedCertificate>| {
            self.verify(&configured_host, &store, presented)
        }
    }

    fn evaluate(
        &self,
        configured_host: &str,
        store: &TrustStore,
        presented: Option<&PresentedCertificate>,
    ) -> Verdict {
        let policy = &self.config.policy;

        let Some(cert) = presented.filter(|cert| !cert.is_empty()) else {
            return Verdict::reject(RejectReason::NoCertificate);
        };

        // Phase 1: identity reconciliation
        let configured = bare_host(configured_host);
        let reported = match policy.port_handling {
            PortHandling::Symmetric => bare_host(cert.hostname()),
            PortHandling::ConfiguredOnly => cert.hostname(),
        };
        if !configured.eq_ignore_ascii_case(reported) {
            return Verdict::reject(RejectReason::HostMismatch {
                configured: configured.to_string(),
                presented: cert.hostname().to_string(),
            });
        }

        // Phase 2: lookup form
        let host = normalize(configured_host);

        // Phase 3: fingerprint comparison
        let presented_fp = policy
            .fingerprint_preference
            .iter()
            .find_map(|kind| cert.fingerprint(*kind));

        let mut candidates = 0usize;
        let mut trusted_line = None;
        for entry in store.entries_for(&host) {
            if entry.is_cert_authority() {
                debug!(
                    "Skipping @cert-authority entry at line {} for '{}'",
                    entry.line(),
                    host
                );
                continue;
            }
            if !entry.is_revoked() {
                candidates += 1;
            }

            let Some(fp) = presented_fp else {
                continue;
            };
            if entry.key().fingerprint(fp.kind()) != *fp {
                continue;
            }

            if entry.is_revoked() {
                if policy.honor_revoked {
                    return Verdict::reject(RejectReason::Revoked {
                        host: host.clone(),
                        line: entry.line(),
                    });
                }
            } else if trusted_line.is_none() {
                trusted_line = Some(entry.line());
            }
        }

        debug!(
            "Host '{}': {} candidate entries, compared {}",
            host,
            candidates,
            presented_fp.map_or_else(|| "nothing".to_string(), |fp| fp.kind().to_string())
        );

        match trusted_line {
            Some(line) => {
                debug!("Presented key for '{}' matches line {}", host, line);
                Verdict::accept()
            }
            None => Verdict::reject(RejectReason::UntrustedKey {
                host,
                kind: presented_fp.map(Fingerprint::kind),
                candidates,
            }),
        }
    }

    fn record(&self, configured_host: &str, verdict: &Verdict) {
        match verdict {
            Verdict::Accept if self.config.audit_logging => {
                info!("Host key for '{}' accepted", configured_host);
            }
            Verdict::Accept => {
                debug!("Host key for '{}' accepted", configured_host);
            }
            Verdict::Reject { reason } => {
                warn!("Host key for '{}' rejected: {}", configured_host, reason);
            }
        }
    }
}

/// Verify with the default policy.
pub fn verify(
    configured_host: &str,
    store: &TrustStore,
    presented: Option<&PresentedCertificate>,
) -> Verdict {
    HostKeyVerifier::default().verify(configured_host, store, presented)
}

/// Parse and verify with the default policy.
pub fn verify_known_hosts(
    configured_host: &str,
    known_hosts: &[u8],
    presented: Option<&PresentedCertificate>,
) -> Verdict {
    HostKeyVerifier::default().verify_known_hosts(configured_host, known_hosts, presented)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hostguard_store::HashKind;

    const KEY: &str = "AAAAC3NzaC1lZDI1NTE5AAAAIOMqqnkVzrm0SdG6UOoqKLsabgH5C9okWi0dh2l9GKJl";

    fn store(lines: &str) -> TrustStore {
        TrustStore::parse(lines.as_bytes()).unwrap()
    }

    fn key_blob(store: &TrustStore) -> Vec<u8> {
        store.entries()[0].key().as_bytes().to_vec()
    }

    #[test]
    fn test_accepts_trusted_key() {
        let store = store(&format!("example.com ssh-ed25519 {}\n", KEY));
        let cert = PresentedCertificate::from_host_key("example.com", key_blob(&store));
        assert_eq!(verify("example.com", &store, Some(&cert)), Verdict::Accept);
    }

    #[test]
    fn test_no_certificate() {
        let store = store(&format!("example.com ssh-ed25519 {}\n", KEY));
        let empty = PresentedCertificate::new("example.com");
        for cert in [None, Some(&empty)] {
            assert_eq!(
                verify("example.com", &store, cert),
                Verdict::reject(RejectReason::NoCertificate)
            );
        }
    }

    #[test]
    fn test_host_comparison_ignores_case() {
        let store = store(&format!("example.com ssh-ed25519 {}\n", KEY));
        let cert = PresentedCertificate::from_host_key("Example.COM", key_blob(&store));
        assert!(verify("EXAMPLE.com:22", &store, Some(&cert)).is_accepted());
    }

    #[test]
    fn test_unknown_host_has_no_candidates() {
        let store = store(&format!("example.com ssh-ed25519 {}\n", KEY));
        let cert = PresentedCertificate::from_host_key("other.com", key_blob(&store));
        assert_eq!(
            verify("other.com", &store, Some(&cert)),
            Verdict::reject(RejectReason::UntrustedKey {
                host: "other.com".into(),
                kind: Some(HashKind::Sha256),
                candidates: 0,
            })
        );
    }

    #[test]
    fn test_raw_key_alone_is_never_compared() {
        let store = store(&format!("example.com ssh-ed25519 {}\n", KEY));
        let cert = PresentedCertificate::new("example.com").with_raw_key(key_blob(&store));
        let verdict = verify("example.com", &store, Some(&cert));
        assert_eq!(
            verdict.reason(),
            Some(&RejectReason::UntrustedKey {
                host: "example.com".into(),
                kind: None,
                candidates: 1,
            })
        );
    }

    #[test]
    fn test_revocation_ignored_when_not_honored() {
        let store = store(&format!(
            "example.com ssh-ed25519 {key}\n@revoked example.com ssh-ed25519 {key}\n",
            key = KEY
        ));
        let cert = PresentedCertificate::from_host_key("example.com", key_blob(&store));
        assert!(verify("example.com", &store, Some(&cert)).is_rejected());

        let lenient = HostKeyVerifier::with_policy(VerifyPolicy {
            honor_revoked: false,
            ..VerifyPolicy::default()
        });
        assert!(lenient.verify("example.com", &store, Some(&cert)).is_accepted());
    }

    #[test]
    fn test_verify_known_hosts_parse_error() {
        let cert = PresentedCertificate::from_host_key("example.com", b"blob".to_vec());
        let verdict = verify_known_hosts("example.com", b"# ok\nexample.com ssh-ed25519\n", Some(&cert));
        match verdict {
            Verdict::Reject {
                reason: RejectReason::ParseError { line, .. },
            } => assert_eq!(line, 2),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_callback_adapter() {
        let store = Arc::new(store(&format!("example.com ssh-ed25519 {}\n", KEY)));
        let cert = PresentedCertificate::from_host_key("example.com", key_blob(&store));
        let check = HostKeyVerifier::default().callback("example.com", Arc::clone(&store));
        assert!(check(Some(&cert)).is_accepted());
        assert!(check(None).is_rejected());
    }
}
