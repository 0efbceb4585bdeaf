/// Decides whether a caller-supplied post-login destination may be
/// remembered, guarding the return cookie against open-redirect abuse.
///
/// Allowlist entries are whole origins and matching is exact: no prefix,
/// wildcard or path matching. A rejected value is dropped without failing the
/// surrounding login flow.
pub fn validate_return_target<'a>(
    allowed_origins: &[String],
    candidate: &'a str,
) -> Option<&'a str> {
    if candidate.is_empty() {
        return None;
    }
    if allowed_origins.iter().any(|allowed| allowed == candidate) {
        Some(candidate)
    } else {
        tracing::warn!("Ignored non-allowlisted return origin: {}", candidate);
        None
    }
}
