use axum::http::request::Parts;
use tower_cookies::cookie::time::Duration;
use tower_cookies::cookie::SameSite;
use tower_cookies::Cookie;

/// Carries the encoded in-flight authorization request across the identity
/// provider redirect.
pub const AUTH_REQUEST_COOKIE: &str = "OAUTH2_AUTH_REQUEST";

/// Carries the validated post-login return URL for the frontend.
pub const RETURN_TARGET_COOKIE: &str = "SSP_RETURN";

/// Long enough for the provider round-trip, short enough that an abandoned
/// login leaves nothing durable behind.
const AUTH_REQUEST_MAX_AGE_SECONDS: i64 = 180;

/// Outlives the authorization-request cookie: the return target is consumed
/// later in the flow, after that cookie is already gone.
const RETURN_TARGET_MAX_AGE_SECONDS: i64 = 300;

/// True when the client connection is HTTPS end to end, or when a
/// TLS-terminating proxy in front of this backend says it was. Without the
/// forwarded-proto check, `Secure` cookies never round-trip behind a load
/// balancer and the whole login flow breaks.
pub fn is_effectively_secure(parts: &Parts) -> bool {
    if parts.uri.scheme_str() == Some("https") {
        return true;
    }
    parts
        .headers
        .get("x-forwarded-proto")
        .and_then(|value| value.to_str().ok())
        .is_some_and(|proto| proto.eq_ignore_ascii_case("https"))
}

/// The authorization-request cookie. HttpOnly: the payload carries
/// provider-facing request parameters and must stay out of reach of page
/// scripts. SameSite=None: the provider redirect is a cross-site top-level
/// navigation, a Lax or Strict cookie would not come back with it.
pub fn auth_request_cookie(value: String, secure: bool) -> Cookie<'static> {
    Cookie::build((AUTH_REQUEST_COOKIE, value))
        .path("/")
        .max_age(Duration::seconds(AUTH_REQUEST_MAX_AGE_SECONDS))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::None)
        .build()
}

/// The return-target cookie. Not HttpOnly: the frontend reads it for its own
/// routing after login completes.
pub fn return_target_cookie(value: String, secure: bool) -> Cookie<'static> {
    Cookie::build((RETURN_TARGET_COOKIE, value))
        .path("/")
        .max_age(Duration::seconds(RETURN_TARGET_MAX_AGE_SECONDS))
        .http_only(false)
        .secure(secure)
        .same_site(SameSite::None)
        .build()
}

/// Expires the authorization-request cookie. Attribute parity (Path, Secure,
/// HttpOnly, SameSite) with the original write is required or browsers keep
/// the old cookie alive.
pub fn auth_request_removal_cookie(secure: bool) -> Cookie<'static> {
    Cookie::build((AUTH_REQUEST_COOKIE, ""))
        .path("/")
        .max_age(Duration::ZERO)
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::None)
        .build()
}
