//! Client identity resolution for rate limiting.

/// Header carrying the proxy chain, client first.
pub const FORWARDED_FOR_HEADER: &str = "x-forwarded-for";

/// Header set by proxies that only report the nearest client.
pub const REAL_IP_HEADER: &str = "x-real-ip";

/// Identifier used when no client address can be found.
pub const ANONYMOUS: &str = "anonymous";

/// Resolve a stable caller identifier from the forwarding headers.
///
/// Prefers the first entry of `x-forwarded-for`, then `x-real-ip`, then
/// [`ANONYMOUS`]. Values are trimmed; a blank value counts as absent.
/// The address syntax is not validated.
pub fn client_identifier(forwarded_for: Option<&str>, real_ip: Option<&str>) -> String {
    forwarded_for
        .and_then(|chain| chain.split(',').next())
        .map(str::trim)
        .filter(|ip| !ip.is_empty())
        .or_else(|| real_ip.map(str::trim).filter(|ip| !ip.is_empty()))
        .unwrap_or(ANONYMOUS)
        .to_string()
}
