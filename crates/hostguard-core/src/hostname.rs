//! Host and port handling.
//!
//! Two operations matter for verification:
//!
//! - [`bare_host`] strips an optional port so the configured host can be compared
//!   with whatever hostname the transport reports.
//! - [`normalize`] rewrites `host[:port]` into the form known_hosts files record:
//!   `host` for port 22, `[host]:port` otherwise, and `[v6]` for bare IPv6 literals.

/// SSH default port. Entries for it are recorded without brackets.
pub const DEFAULT_SSH_PORT: &str = "22";

/// Splits `host:port` or `[host]:port` into its parts.
///
/// Returns `None` when the input is not a well-formed host/port pair: no port,
/// an unbracketed IPv6 literal, or stray brackets. The port may be empty
/// (`"host:"`), and it is not checked to be numeric.
pub fn split_host_port(address: &str) -> Option<(&str, &str)> {
    let (host, port) = if let Some(inner) = address.strip_prefix('[') {
        let end = inner.find(']')?;
        let port = inner[end + 1..].strip_prefix(':')?;
        (&inner[..end], port)
    } else {
        let (host, port) = address.rsplit_once(':')?;
        // Unbracketed IPv6 literal.
        if host.contains(':') {
            return None;
        }
        (host, port)
    };

    let stray_bracket = |s: &str| s.contains('[') || s.contains(']');
    if stray_bracket(host) || stray_bracket(port) {
        return None;
    }

    Some((host, port))
}

/// The host part of `address`, or the whole string if it carries no port.
pub fn bare_host(address: &str) -> &str {
    split_host_port(address)
        .map(|(host, _)| host)
        .unwrap_or(address)
}

/// Rewrites `host[:port]` into known_hosts lookup form.
///
/// ```rust
/// use hostguard_core::hostname::normalize;
///
/// assert_eq!(normalize("example.com"), "example.com");
/// assert_eq!(normalize("example.com:22"), "example.com");
/// assert_eq!(normalize("example.com:2222"), "[example.com]:2222");
/// assert_eq!(normalize("[::1]:2222"), "[::1]:2222");
/// assert_eq!(normalize("::1"), "[::1]");
/// ```
pub fn normalize(address: &str) -> String {
    let (host, port) = split_host_port(address).unwrap_or((address, DEFAULT_SSH_PORT));

    if port != DEFAULT_SSH_PORT {
        format!("[{}]:{}", host, port)
    } else if host.contains(':') && !host.starts_with('[') {
        format!("[{}]", host)
    } else {
        host.to_string()
    }
}
