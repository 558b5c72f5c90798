//! Host pattern matching.
//!
//! Follows the matching rules of OpenSSH known_hosts host fields:
//!
//! - names compare ASCII case-insensitively
//! - `*` matches any run of characters, `?` exactly one
//! - a matching `!pattern` vetoes the entry even if another pattern matches
//! - hashed names match when HMAC-SHA1(salt, lowercase host) equals the stored hash

use crate::models::{HostPattern, TrustEntry};
use hmac::{Hmac, Mac};
use sha1::Sha1;

type HmacSha1 = Hmac<Sha1>;

/// Outcome of testing one pattern against a host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternMatch {
    /// Pattern applies to the host.
    Match,
    /// Pattern does not apply.
    NoMatch,
    /// A negated pattern matched: the entry must not apply.
    Vetoed,
}

impl HostPattern {
    /// Tests this pattern against a normalized host.
    pub fn matches(&self, host: &str) -> PatternMatch {
        match self {
            Self::Name(pattern) => {
                if glob_match(pattern.as_bytes(), host.as_bytes()) {
                    PatternMatch::Match
                } else {
                    PatternMatch::NoMatch
                }
            }
            Self::Negated(pattern) => {
                if glob_match(pattern.as_bytes(), host.as_bytes()) {
                    PatternMatch::Vetoed
                } else {
                    PatternMatch::NoMatch
                }
            }
            Self::Hashed { salt, hash } => {
                if hashed_name_matches(salt, hash, host) {
                    PatternMatch::Match
                } else {
                    PatternMatch::NoMatch
                }
            }
        }
    }
}

impl TrustEntry {
    /// Returns true if this entry applies to `host` (in normalized form).
    pub fn matches_host(&self, host: &str) -> bool {
        let mut matched = false;
        for pattern in &self.hosts {
            match pattern.matches(host) {
                PatternMatch::Vetoed => return false,
                PatternMatch::Match => matched = true,
                PatternMatch::NoMatch => {}
            }
        }
        matched
    }
}

fn hashed_name_matches(salt: &[u8], hash: &[u8], host: &str) -> bool {
    let Ok(mut mac) = HmacSha1::new_from_slice(salt) else {
        return false;
    };
    mac.update(host.to_ascii_lowercase().as_bytes());
    mac.verify_slice(hash).is_ok()
}

/// Case-insensitive wildcard match supporting `*` and `?`.
fn glob_match(pattern: &[u8], text: &[u8]) -> bool {
    let (mut p, mut t) = (0, 0);
    // Position of the last `*` seen and the text index it is currently absorbing up to.
    let mut backtrack: Option<(usize, usize)> = None;

    while t < text.len() {
        if p < pattern.len() && pattern[p] == b'*' {
            backtrack = Some((p, t));
            p += 1;
        } else if p < pattern.len()
            && (pattern[p] == b'?' || pattern[p].eq_ignore_ascii_case(&text[t]))
        {
            p += 1;
            t += 1;
        } else if let Some((star, absorbed)) = backtrack {
            p = star + 1;
            t = absorbed + 1;
            backtrack = Some((star, absorbed + 1));
        } else {
            return false;
        }
    }

    pattern[p..].iter().all(|&c| c == b'*')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glob_literal_is_case_insensitive() {
        assert!(glob_match(b"Example.COM", b"example.com"));
        assert!(!glob_match(b"example.com", b"example.org"));
        assert!(!glob_match(b"example.com", b"example.com.evil"));
    }

    #[test]
    fn test_glob_wildcards() {
        assert!(glob_match(b"*.example.com", b"git.example.com"));
        assert!(!glob_match(b"*.example.com", b"example.com"));
        assert!(glob_match(b"host?", b"host1"));
        assert!(!glob_match(b"host?", b"host12"));
        assert!(glob_match(b"*", b"anything"));
        assert!(glob_match(b"a*b*c", b"aXXbYYc"));
        assert!(!glob_match(b"a*b*c", b"aXXbYY"));
        assert!(glob_match(b"[*.example.com]:2222", b"[git.example.com]:2222"));
    }

    #[test]
    fn test_negated_pattern_vetoes() {
        let pattern = HostPattern::parse("!bad.example.com");
        assert_eq!(pattern.matches("bad.example.com"), PatternMatch::Vetoed);
        assert_eq!(pattern.matches("good.example.com"), PatternMatch::NoMatch);
    }

    #[test]
    fn test_hashed_name() {
        // `ssh-keygen -H` output for github.com
        let salt = base64_decode("b8LfkX9Y09oxr9MMnQyfC9CtciI=");
        let hash = base64_decode("MnTpZgaon9ON5+hrylyRlq/li3Q=");
        let pattern = HostPattern::Hashed { salt, hash };

        assert_eq!(pattern.matches("github.com"), PatternMatch::Match);
        assert_eq!(pattern.matches("GitHub.com"), PatternMatch::Match);
        assert_eq!(pattern.matches("gitlab.com"), PatternMatch::NoMatch);
    }

    fn base64_decode(s: &str) -> Vec<u8> {
        use base64::Engine as _;
        base64::engine::general_purpose::STANDARD.decode(s).unwrap()
    }
}
