use crate::app_state::{AppState, Config};
use crate::cookies::{
    auth_request_cookie, auth_request_removal_cookie, is_effectively_secure,
    return_target_cookie, AUTH_REQUEST_COOKIE, RETURN_TARGET_COOKIE,
};
use crate::oauth::authorization_request::{self, AuthorizationRequest};
use crate::oauth::return_target::validate_return_target;
use axum::async_trait;
use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum::http::StatusCode;
use serde::Deserialize;
use std::sync::Arc;
use tower_cookies::Cookies;

/// Stateless stand-in for a server-side authorization-request store.
///
/// The in-flight request lives in the browser's cookie jar for the duration
/// of the provider redirect, so any backend instance can serve the callback
/// without sessions or sticky load balancing. Every operation is a pure
/// function of the inbound cookies; nothing is kept between requests.
///
/// Per login attempt the cookie moves from absent to saved to consumed,
/// driven by
/// [`save`](Self::save) on the login-initiation request and
/// [`load`](Self::load)/[`remove`](Self::remove) on the provider callback.
pub struct AuthRequestRepository {
    cookies: Cookies,
    config: Arc<Config>,
    secure: bool,
    query: Option<String>,
}

#[derive(Deserialize)]
struct ReturnParameter {
    #[serde(rename = "return")]
    target: Option<String>,
}

impl AuthRequestRepository {
    /// Persists the request for the provider round-trip, along with the
    /// validated `return` target if the initiation request carried one.
    /// `None` clears any previous cookie instead, matching an abandoned
    /// login.
    pub fn save(&self, request: Option<&AuthorizationRequest>) {
        let Some(request) = request else {
            self.delete_auth_request_cookie();
            return;
        };

        self.persist_return_target();

        let encoded = authorization_request::encode(request);
        self.cookies.add(auth_request_cookie(encoded, self.secure));
        tracing::debug!(
            "Saved {} cookie. secure={}, sameSite=None",
            AUTH_REQUEST_COOKIE,
            self.secure
        );
    }

    /// Reads the in-flight request back without consuming it. A missing,
    /// tampered or expired-and-replaced cookie reads as no request in flight.
    pub fn load(&self) -> Option<AuthorizationRequest> {
        let cookie = self.cookies.get(AUTH_REQUEST_COOKIE)?;
        let decoded = authorization_request::decode(cookie.value());
        if decoded.is_none() && !cookie.value().is_empty() {
            tracing::debug!("Discarded undecodable {} cookie", AUTH_REQUEST_COOKIE);
        }
        decoded
    }

    /// Single-use consumption: returns what [`load`](Self::load) sees, then
    /// expires the cookie whether or not decoding succeeded.
    pub fn remove(&self) -> Option<AuthorizationRequest> {
        let existing = self.load();
        self.delete_auth_request_cookie();
        existing
    }

    /// The validated post-login destination, if one was remembered at
    /// initiation time.
    pub fn return_target(&self) -> Option<String> {
        self.cookies
            .get(RETURN_TARGET_COOKIE)
            .map(|cookie| cookie.value().to_string())
    }

    fn delete_auth_request_cookie(&self) {
        self.cookies.add(auth_request_removal_cookie(self.secure));
        tracing::debug!("Deleted {} cookie.", AUTH_REQUEST_COOKIE);
    }

    fn persist_return_target(&self) {
        let Some(query) = self.query.as_deref() else {
            return;
        };
        let target = serde_urlencoded::from_str::<ReturnParameter>(query)
            .ok()
            .and_then(|parameter| parameter.target);
        let Some(target) = target else {
            return;
        };
        if let Some(target) =
            validate_return_target(&self.config.allowed_return_origins, &target)
        {
            self.cookies
                .add(return_target_cookie(target.to_string(), self.secure));
            tracing::debug!("Set {} cookie for {}", RETURN_TARGET_COOKIE, target);
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthRequestRepository
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let cookies = Cookies::from_request_parts(parts, state).await?;
        let config = AppState::from_ref(state).config;
        let secure = is_effectively_secure(parts);
        let query = parts.uri.query().map(str::to_owned);

        Ok(AuthRequestRepository {
            cookies,
            config,
            secure,
            query,
        })
    }
}
