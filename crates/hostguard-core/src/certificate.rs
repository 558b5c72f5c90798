//! The host key certificate a transport presents during a handshake.

use hostguard_store::{Fingerprint, HashKind};

/// Data received from the remote peer for one handshake.
///
/// Transports differ in what they expose: some hand over the raw host key,
/// others only one or more fingerprints, and the reported `hostname` may or may
/// not carry a port. The verifier never retains a certificate.
///
/// # Example
///
/// ```rust
/// use hostguard_core::PresentedCertificate;
/// use hostguard_store::{Fingerprint, HashKind};
///
/// // Transport that only reports an MD5 digest.
/// let fp = Fingerprint::compute(HashKind::Md5, b"key blob");
/// let cert = PresentedCertificate::new("git.example.com").with_fingerprint(fp);
/// assert_eq!(cert.fingerprint(HashKind::Md5), Some(&fp));
/// assert_eq!(cert.fingerprint(HashKind::Sha256), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PresentedCertificate {
    hostname: String,
    fingerprints: Vec<Fingerprint>,
    raw_key: Option<Vec<u8>>,
}

impl PresentedCertificate {
    /// Creates an empty certificate for `hostname`.
    pub fn new(hostname: impl Into<String>) -> Self {
        Self {
            hostname: hostname.into(),
            fingerprints: Vec::new(),
            raw_key: None,
        }
    }

    /// Builds a certificate from the raw wire-encoded host key, deriving every
    /// supported fingerprint the way SSH transports do.
    pub fn from_host_key(hostname: impl Into<String>, key_blob: impl Into<Vec<u8>>) -> Self {
        let key_blob = key_blob.into();
        let mut cert = Self::new(hostname);
        for kind in HashKind::ALL {
            cert = cert.with_fingerprint(Fingerprint::compute(kind, &key_blob));
        }
        cert.with_raw_key(key_blob)
    }

    /// Adds a fingerprint, replacing any existing one of the same kind.
    pub fn with_fingerprint(mut self, fingerprint: Fingerprint) -> Self {
        self.fingerprints.retain(|fp| fp.kind() != fingerprint.kind());
        self.fingerprints.push(fingerprint);
        self
    }

    /// Attaches the raw host key.
    ///
    /// The raw key is informational; comparison only ever uses advertised
    /// fingerprints.
    pub fn with_raw_key(mut self, key_blob: Vec<u8>) -> Self {
        self.raw_key = Some(key_blob);
        self
    }

    /// Hostname as reported by the transport.
    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    /// All advertised fingerprints.
    pub fn fingerprints(&self) -> &[Fingerprint] {
        &self.fingerprints
    }

    /// The advertised fingerprint of `kind`, if any.
    pub fn fingerprint(&self, kind: HashKind) -> Option<&Fingerprint> {
        self.fingerprints.iter().find(|fp| fp.kind() == kind)
    }

    /// Raw host key bytes, if the transport provided them.
    pub fn raw_key(&self) -> Option<&[u8]> {
        self.raw_key.as_deref()
    }

    /// True when there is nothing to verify: no fingerprints and no key.
    pub fn is_empty(&self) -> bool {
        self.fingerprints.is_empty() && self.raw_key.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_host_key_advertises_all_kinds() {
        let cert = PresentedCertificate::from_host_key("example.com", b"blob".to_vec());
        assert_eq!(cert.fingerprints().len(), 3);
        for kind in HashKind::ALL {
            assert_eq!(
                cert.fingerprint(kind),
                Some(&Fingerprint::compute(kind, b"blob"))
            );
        }
        assert_eq!(cert.raw_key(), Some(&b"blob"[..]));
        assert!(!cert.is_empty());
    }

    #[test]
    fn test_with_fingerprint_replaces_same_kind() {
        let cert = PresentedCertificate::new("example.com")
            .with_fingerprint(Fingerprint::compute(HashKind::Sha1, b"old"))
            .with_fingerprint(Fingerprint::compute(HashKind::Sha1, b"new"));
        assert_eq!(cert.fingerprints().len(), 1);
        assert_eq!(
            cert.fingerprint(HashKind::Sha1),
            Some(&Fingerprint::compute(HashKind::Sha1, b"new"))
        );
    }

    #[test]
    fn test_empty_certificate() {
        assert!(PresentedCertificate::new("example.com").is_empty());
        assert!(PresentedCertificate::default().is_empty());
    }
}
