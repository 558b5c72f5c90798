//! Error types for the known_hosts store.
//!
//! Every parse failure carries the 1-based line number of the offending
//! known_hosts line so operators can fix the local trust data directly.

use crate::fingerprint::HashKind;
use thiserror::Error;

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors raised while building a trust store.
///
/// # Security Notes
///
/// Any of these aborts the whole parse. A malformed trust entry is never
/// dropped as if it were a comment: the store is either complete or absent.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The line is not valid UTF-8.
    #[error("line {line}: not valid UTF-8")]
    InvalidUtf8 {
        /// Line number (1-based).
        line: usize,
    },

    /// A required field is missing from a key line.
    #[error("line {line}: missing {field}")]
    MissingField {
        /// Line number (1-based).
        line: usize,
        /// Name of the missing field.
        field: &'static str,
    },

    /// The line starts with an `@` marker that is not defined.
    #[error("line {line}: unknown marker `{marker}`")]
    UnknownMarker {
        /// Line number (1-based).
        line: usize,
        /// The marker as written.
        marker: String,
    },

    /// The key-type token is not a recognized SSH key algorithm.
    #[error("line {line}: unrecognized key type `{key_type}`")]
    UnknownKeyType {
        /// Line number (1-based).
        line: usize,
        /// The key type as written.
        key_type: String,
    },

    /// The key data field is not valid base64.
    #[error("line {line}: key data is not valid base64: {source}")]
    InvalidBase64 {
        /// Line number (1-based).
        line: usize,
        /// Underlying decoding error.
        #[source]
        source: base64::DecodeError,
    },

    /// The declared key type disagrees with the algorithm inside the key blob.
    #[error("line {line}: key type `{declared}` does not match encoded key type `{encoded}`")]
    KeyTypeMismatch {
        /// Line number (1-based).
        line: usize,
        /// Key type token from the line.
        declared: String,
        /// Algorithm found in the decoded key.
        encoded: String,
    },

    /// Structural failure while decoding the key blob or host field.
    #[error("line {line}: malformed host key entry: {source}")]
    MalformedEntry {
        /// Line number (1-based).
        line: usize,
        /// Underlying decoding error.
        #[source]
        source: ssh_key::Error,
    },
}

impl StoreError {
    /// Line number the error refers to.
    pub fn line(&self) -> usize {
        match self {
            Self::InvalidUtf8 { line }
            | Self::MissingField { line, .. }
            | Self::UnknownMarker { line, .. }
            | Self::UnknownKeyType { line, .. }
            | Self::InvalidBase64 { line, .. }
            | Self::KeyTypeMismatch { line, .. }
            | Self::MalformedEntry { line, .. } => *line,
        }
    }
}

/// Errors raised when reading a fingerprint from text or raw bytes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FingerprintError {
    /// No `ALG:` prefix.
    #[error("fingerprint is missing its algorithm prefix (e.g. `SHA256:`)")]
    MissingPrefix,

    /// Prefix names an unsupported hash.
    #[error("unknown fingerprint algorithm `{0}`")]
    UnknownAlgorithm(String),

    /// Digest text is neither valid base64 nor colon-separated hex.
    #[error("invalid {kind} fingerprint encoding")]
    InvalidEncoding {
        /// Kind named by the prefix.
        kind: HashKind,
    },

    /// Digest has the wrong size for its kind.
    #[error("{kind} fingerprint must be {expected} bytes, got {actual}")]
    InvalidLength {
        /// Kind of digest.
        kind: HashKind,
        /// Required digest length.
        expected: usize,
        /// Length that was supplied.
        actual: usize,
    },
}
