//! Unit tests for hostguard-core.

#[test]
fn test_crate_structure() {
    // Smoke test - the re-exported surface fits together
    use crate::{HashKind, PortHandling, PresentedCertificate, RejectReason, Verdict, VerifierConfig};

    let config = VerifierConfig::default();
    assert_eq!(config.policy.port_handling, PortHandling::Symmetric);
    assert_eq!(config.policy.fingerprint_preference[0], HashKind::Sha256);

    assert!(Verdict::accept().is_accepted());
    let reject = Verdict::reject(RejectReason::Revoked {
        host: "example.com".to_string(),
        line: 1,
    });
    assert!(reject.is_rejected());
    assert_eq!(
        reject.to_string(),
        "rejected: Host key for 'example.com' is revoked (line 1)"
    );

    assert!(PresentedCertificate::new("example.com").is_empty());
}

#[test]
fn test_shared_types_are_thread_safe() {
    fn assert_send_sync<T: Send + Sync>() {}

    assert_send_sync::<crate::HostKeyVerifier>();
    assert_send_sync::<crate::TrustStore>();
    assert_send_sync::<crate::Verdict>();
    assert_send_sync::<crate::PresentedCertificate>();
}
