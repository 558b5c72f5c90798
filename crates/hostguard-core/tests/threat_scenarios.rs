//! # Threat Scenario Tests
//!
//! Attacks a known_hosts check is meant to stop, and entries that must not be
//! mistaken for trust.
//!
//! ## Scenarios Covered
//!
//! 1. **Key Substitution**: a MITM presents its own key for a pinned host
//! 2. **Revocation**: leaked keys stay rejected regardless of entry order
//! 3. **Pattern Tricks**: negation, wildcards, hashed names
//! 4. **Unsupported Entries**: `@cert-authority` never grants trust

use hostguard_core::{
    verify, HashKind, HostKeyVerifier, PresentedCertificate, RejectReason, TrustStore, Verdict,
};

const PINNED: &str = "AAAAC3NzaC1lZDI1NTE5AAAAIOMqqnkVzrm0SdG6UOoqKLsabgH5C9okWi0dh2l9GKJl";
const ATTACKER: &str = "AAAAC3NzaC1lZDI1NTE5AAAAICjT2SuA0k/xc5Cbyp+eBY5uN3bRL2K7GdpNtltOK6vy";

/// `ssh-keygen -H` output for github.com.
const HASHED_GITHUB: &str = "|1|b8LfkX9Y09oxr9MMnQyfC9CtciI=|MnTpZgaon9ON5+hrylyRlq/li3Q=";

fn store(text: &str) -> TrustStore {
    TrustStore::parse(text.as_bytes()).unwrap()
}

fn cert(hostname: &str, key: &str) -> PresentedCertificate {
    let key = store(&format!("fixture ssh-ed25519 {}\n", key)).entries()[0]
        .key()
        .as_bytes()
        .to_vec();
    PresentedCertificate::from_host_key(hostname, key)
}

// =============================================================================
// KEY SUBSTITUTION
// =============================================================================

#[test]
fn test_scenario_mitm_with_own_key() {
    let store = store(&format!("git.example.com ssh-ed25519 {}\n", PINNED));

    let verdict = verify("git.example.com", &store, Some(&cert("git.example.com", ATTACKER)));

    match verdict {
        Verdict::Reject { reason } => {
            assert!(reason.is_key_changed(), "Should report a changed key, got {:?}", reason);
            assert!(reason.to_string().contains("changed"));
        }
        Verdict::Accept => panic!("Attacker key must not be accepted"),
    }
}

#[test]
fn test_scenario_key_pinned_for_other_host() {
    // Trusting a key for one host says nothing about another.
    let store = store(&format!("mirror.example.com ssh-ed25519 {}\n", ATTACKER));

    let verdict = verify("git.example.com", &store, Some(&cert("git.example.com", ATTACKER)));
    assert_eq!(
        verdict.reason(),
        Some(&RejectReason::UntrustedKey {
            host: "git.example.com".to_string(),
            kind: Some(HashKind::Sha256),
            candidates: 0,
        })
    );
}

#[test]
fn test_scenario_port_confusion() {
    // A key pinned for port 2222 does not cover port 22.
    let store = store(&format!("[git.example.com]:2222 ssh-ed25519 {}\n", ATTACKER));
    let verdict = verify("git.example.com:22", &store, Some(&cert("git.example.com", ATTACKER)));
    assert!(verdict.is_rejected());
}

// =============================================================================
// REVOCATION
// =============================================================================

#[test]
fn test_scenario_revoked_after_trusted_entry() {
    let store = store(&format!(
        "git.example.com ssh-ed25519 {key}\n@revoked * ssh-ed25519 {key}\n",
        key = PINNED
    ));

    let verdict = verify("git.example.com", &store, Some(&cert("git.example.com", PINNED)));
    assert_eq!(
        verdict.reason(),
        Some(&RejectReason::Revoked {
            host: "git.example.com".to_string(),
            line: 2,
        })
    );
}

#[test]
fn test_scenario_revocation_of_other_key() {
    let store = store(&format!(
        "@revoked git.example.com ssh-ed25519 {}\ngit.example.com ssh-ed25519 {}\n",
        ATTACKER, PINNED
    ));

    let verifier = HostKeyVerifier::default();
    assert!(verifier
        .verify("git.example.com", &store, Some(&cert("git.example.com", PINNED)))
        .is_accepted());
    assert!(matches!(
        verifier.verify("git.example.com", &store, Some(&cert("git.example.com", ATTACKER))),
        Verdict::Reject { reason: RejectReason::Revoked { line: 1, .. } }
    ));
}

// =============================================================================
// PATTERN TRICKS
// =============================================================================

#[test]
fn test_scenario_negated_host() {
    let store = store(&format!(
        "*.example.com,!evil.example.com ssh-ed25519 {}\n",
        PINNED
    ));

    assert!(verify("git.example.com", &store, Some(&cert("git.example.com", PINNED))).is_accepted());
    assert!(verify("evil.example.com", &store, Some(&cert("evil.example.com", PINNED))).is_rejected());
}

#[test]
fn test_scenario_wildcard_does_not_span_ports() {
    let store = store(&format!("*.example.com ssh-ed25519 {}\n", PINNED));
    let verdict = verify("git.example.com:2222", &store, Some(&cert("git.example.com", PINNED)));
    assert!(verdict.is_rejected());
}

#[test]
fn test_scenario_hashed_host() {
    let store = store(&format!("{} ssh-ed25519 {}\n", HASHED_GITHUB, PINNED));

    assert!(verify("github.com", &store, Some(&cert("github.com", PINNED))).is_accepted());
    assert!(verify("GitHub.com:22", &store, Some(&cert("github.com", PINNED))).is_accepted());
    assert!(verify("gitlab.com", &store, Some(&cert("gitlab.com", PINNED))).is_rejected());
}

// =============================================================================
// UNSUPPORTED ENTRIES
// =============================================================================

#[test]
fn test_scenario_cert_authority_never_accepts() {
    let store = store(&format!("@cert-authority *.example.com ssh-ed25519 {}\n", PINNED));

    let verdict = verify("git.example.com", &store, Some(&cert("git.example.com", PINNED)));
    assert_eq!(
        verdict.reason(),
        Some(&RejectReason::UntrustedKey {
            host: "git.example.com".to_string(),
            kind: Some(HashKind::Sha256),
            candidates: 0,
        })
    );
}
