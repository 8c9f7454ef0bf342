//! Captive-portal redirect policy.
//!
//! Operating systems probe arbitrary hosts to detect captivity; serving the
//! setup page only for the device's own identities and answering everything
//! else with a redirect to the access-point IP is what makes the portal pop
//! up on the client.

/// Case-insensitive substring match.
///
/// An empty needle never matches: a blank station IP or host name must not
/// suppress the redirect.
fn contains_ignore_ascii_case(haystack: &str, needle: &str) -> bool {
    let h = haystack.as_bytes();
    let n = needle.as_bytes();
    if n.is_empty() || h.len() < n.len() {
        return false;
    }
    h.windows(n.len()).any(|w| w.eq_ignore_ascii_case(n))
}

/// Decide whether a request must be redirected to the access-point IP.
///
/// A request is redirected when its `Host` value is present and names none
/// of the device's identities: the access-point IP, the station-mode IP, or
/// the configured host name. Matching is case-insensitive containment, so
/// `Host: 192.168.4.1:80` still counts as the device itself. An absent or
/// empty `Host` never redirects.
pub fn should_redirect(host: &str, ap_ip: &str, sta_ip: &str, hostname: Option<&str>) -> bool {
    if host.is_empty() {
        return false;
    }
    let known = contains_ignore_ascii_case(host, ap_ip)
        || contains_ignore_ascii_case(host, sta_ip)
        || hostname.is_some_and(|name| contains_ignore_ascii_case(host, name));
    !known
}
