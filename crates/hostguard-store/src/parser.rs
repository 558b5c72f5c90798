//! # Known Hosts Parser
//!
//! Turns a known_hosts blob into a [`TrustStore`].
//!
//! ## Line Syntax
//!
//! ```text
//! [@marker] host[,host...] key-type base64-key [comment]
//! ```
//!
//! | Line | Result |
//! |------|--------|
//! | empty / whitespace | skipped |
//! | `# ...` | skipped |
//! | valid key line | one [`TrustEntry`] |
//! | anything else | [`StoreError`], whole parse fails |
//!
//! ## Security Notes
//!
//! Fields are separated by any run of spaces or tabs, as OpenSSH allows.
//!
//! Parsing is fail-closed. A line that looks like a key line but cannot be
//! decoded (bad base64, unknown key type, truncated key) aborts the parse
//! instead of being ignored, so a corrupted pin can never silently widen or
//! narrow what is trusted.

use crate::error::{Result, StoreError};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use crate::models::{HostPattern, Marker, TrustEntry, TrustStore, TrustedKey};
use ssh_key::known_hosts::{Entry, HostPatterns};
use ssh_key::{Algorithm, PublicKey};
use tracing::{debug, trace};

/// Parses a known_hosts blob (newline-delimited, `\r\n` tolerated).
///
/// Returns every entry in input order, or the first structural error.
///
/// # Example
///
/// ```rust
/// use hostguard_store::parser::parse;
///
/// let blob = b"\n# comment\n[example.com]:2222 ssh-ed25519 AAAAC3NzaC1lZDI1NTE5AAAAIOMqqnkVzrm0SdG6UOoqKLsabgH5C9okWi0dh2l9GKJl\n";
/// let store = parse(blob).unwrap();
/// assert_eq!(store.len(), 1);
/// assert_eq!(store.entries()[0].line(), 3);
///
/// assert!(parse(b"example.com ssh-ed25519 AAAAC3NzaC1lZDI1NTE5AAAAIOMqq\n").is_err());
/// ```
pub fn parse(blob: &[u8]) -> Result<TrustStore> {
    let mut entries = Vec::new();

    for (index, raw) in blob.split(|b| *b == b'\n').enumerate() {
        let line = index + 1;
        let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
        let text = std::str::from_utf8(raw).map_err(|_| StoreError::InvalidUtf8 { line })?;

        if let Some(entry) = parse_line(text, line)? {
            entries.push(entry);
        }
    }

    debug!("Parsed {} known_hosts entries", entries.len());
    Ok(TrustStore::from_entries(entries))
}

/// Parses a single line. `Ok(None)` for blank and comment lines.
pub fn parse_line(text: &str, line: usize) -> Result<Option<TrustEntry>> {
    let text = text.trim();
    if text.is_empty() || text.starts_with('#') {
        trace!("Skipping line {}", line);
        return Ok(None);
    }

    let mut fields = text.split_ascii_whitespace();

    let mut host_field = fields
        .next()
        .ok_or(StoreError::MissingField { line, field: "host patterns" })?;
    let marker = match host_field {
        "@cert-authority" => Some(Marker::CertAuthority),
        "@revoked" => Some(Marker::Revoked),
        other if other.starts_with('@') => {
            return Err(StoreError::UnknownMarker {
                line,
                marker: other.to_string(),
            });
        }
        _ => None,
    };
    if marker.is_some() {
        host_field = fields
            .next()
            .ok_or(StoreError::MissingField { line, field: "host patterns" })?;
    }

    let key_type = fields
        .next()
        .ok_or(StoreError::MissingField { line, field: "key type" })?;
    let key_data = fields
        .next()
        .ok_or(StoreError::MissingField { line, field: "key data" })?;
    let comment = fields.collect::<Vec<_>>().join(" ");

    Algorithm::new(key_type).map_err(|_| StoreError::UnknownKeyType {
        line,
        key_type: key_type.to_string(),
    })?;

    let blob = STANDARD
        .decode(key_data)
        .map_err(|source| StoreError::InvalidBase64 { line, source })?;
    let public_key =
        PublicKey::from_bytes(&blob).map_err(|source| StoreError::MalformedEntry { line, source })?;
    let key = TrustedKey::from_public_key(public_key)
        .map_err(|source| StoreError::MalformedEntry { line, source })?;
    if key.key_type() != key_type {
        return Err(StoreError::KeyTypeMismatch {
            line,
            declared: key_type.to_string(),
            encoded: key.key_type().to_string(),
        });
    }

    // Fields may be separated by any run of blanks; ssh-key wants single spaces.
    let canonical = match marker {
        Some(marker) => format!("{} {} {} {}", marker, host_field, key_type, key_data),
        None => format!("{} {} {}", host_field, key_type, key_data),
    };
    let entry: Entry = canonical
        .parse()
        .map_err(|source| StoreError::MalformedEntry { line, source })?;

    let hosts = match entry.host_patterns() {
        HostPatterns::Patterns(patterns) => {
            patterns.iter().map(|p| HostPattern::parse(p)).collect()
        }
        HostPatterns::HashedName { salt, hash } => vec![HostPattern::Hashed {
            salt: salt.to_vec(),
            hash: hash.to_vec(),
        }],
    };

    trace!("Line {}: {} entry for {}", line, key_type, host_field);

    Ok(Some(TrustEntry {
        line,
        marker,
        hosts,
        key,
        comment,
    }))
}
