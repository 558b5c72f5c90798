//! Configuration types for hostguard.
//!
//! Verification behavior that historically varied between SSH transports is
//! expressed as explicit policy values instead of separate code paths.

use crate::error::VerifierError;
use crate::Result;
use hostguard_store::HashKind;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for the host key verifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerifierConfig {
    /// Matching and comparison policy.
    pub policy: VerifyPolicy,

    /// Log every verdict at info level for audit trails (debug otherwise).
    pub audit_logging: bool,
}

impl VerifierConfig {
    /// Reads a configuration from JSON. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a JSON configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Rejects configurations that could never accept a host.
    pub fn validate(&self) -> Result<()> {
        if self.policy.fingerprint_preference.is_empty() {
            return Err(VerifierError::Config(
                "fingerprint_preference must name at least one hash".to_string(),
            ));
        }
        Ok(())
    }
}

/// Host matching and fingerprint comparison policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerifyPolicy {
    /// How ports are treated when comparing the configured host with the
    /// hostname reported by the transport.
    pub port_handling: PortHandling,

    /// Hash kinds consulted when comparing fingerprints, strongest first.
    /// Kinds not listed are never compared.
    pub fingerprint_preference: Vec<HashKind>,

    /// Reject keys listed on `@revoked` lines.
    pub honor_revoked: bool,
}

impl Default for VerifyPolicy {
    fn default() -> Self {
        Self {
            port_handling: PortHandling::Symmetric,
            fingerprint_preference: HashKind::ALL.to_vec(),
            honor_revoked: true,
        }
    }
}

impl VerifyPolicy {
    /// Restricts comparison to the given hash kinds, in order.
    pub fn with_fingerprint_preference(mut self, kinds: impl Into<Vec<HashKind>>) -> Self {
        self.fingerprint_preference = kinds.into();
        self
    }

    /// Sets the port handling mode.
    pub fn with_port_handling(mut self, port_handling: PortHandling) -> Self {
        self.port_handling = port_handling;
        self
    }
}

/// Port treatment during identity comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PortHandling {
    /// Strip ports from both the configured host and the reported hostname.
    Symmetric,
    /// Strip the port from the configured host only; the reported hostname is
    /// compared exactly as the transport gave it.
    ConfiguredOnly,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = VerifierConfig::default();
        assert_eq!(config.policy.port_handling, PortHandling::Symmetric);
        assert_eq!(
            config.policy.fingerprint_preference,
            vec![HashKind::Sha256, HashKind::Sha1, HashKind::Md5]
        );
        assert!(config.policy.honor_revoked);
        assert!(!config.audit_logging);
    }

    #[test]
    fn test_config_serialization() {
        let config = VerifierConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed = VerifierConfig::from_json_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = VerifierConfig::from_json_str(
            r#"{"policy": {"fingerprint_preference": ["sha256"], "port_handling": "configured_only"}}"#,
        )
        .unwrap();
        assert_eq!(config.policy.fingerprint_preference, vec![HashKind::Sha256]);
        assert_eq!(config.policy.port_handling, PortHandling::ConfiguredOnly);
        assert!(config.policy.honor_revoked);
    }

    #[test]
    fn test_empty_preference_rejected() {
        let err = VerifierConfig::from_json_str(r#"{"policy": {"fingerprint_preference": []}}"#)
            .unwrap_err();
        assert!(matches!(err, VerifierError::Config(_)));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("hostguard.json");
        std::fs::write(&path, r#"{"audit_logging": true}"#).unwrap();

        let config = VerifierConfig::from_file(&path).unwrap();
        assert!(config.audit_logging);

        assert!(matches!(
            VerifierConfig::from_file(dir.path().join("missing.json")),
            Err(VerifierError::Io(_))
        ));
    }
}
