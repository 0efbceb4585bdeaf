mod errors;

use crate::app_state::AppState;
use crate::oauth::authorization_request::AuthorizationRequest;
use crate::repositories::auth_request_cookies::AuthRequestRepository;
use crate::routes::auth::errors::AuthError;
use axum::extract::{Query, State};
use axum::response::Redirect;
use axum::routing::get;
use axum::Router;
use openidconnect::CsrfToken;
use rand::distributions::Alphanumeric;
use rand::{thread_rng, Rng};
use serde::Deserialize;
use serde_json::Value;
use subtle::ConstantTimeEq;
use tower_cookies::CookieManagerLayer;
use url::Url;

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(login))
        .route("/callback", get(callback))
        .layer(CookieManagerLayer::new())
}

/// Login initiation: build the authorization request, persist it in the
/// browser's cookie jar, then send the browser to the identity provider.
async fn login(
    State(app_state): State<AppState>,
    repository: AuthRequestRepository,
) -> Redirect {
    let provider = &app_state.config.identity_provider;
    let request = AuthorizationRequest::new(
        provider.authorization_endpoint.clone(),
        provider.client_id.clone(),
        provider.redirect_uri.clone(),
        new_state_token(),
    )
    .with_scopes(provider.scopes.iter().cloned());

    let provider_uri = provider_redirect_uri(&request);
    let request = request.with_authorization_request_uri(provider_uri.clone());

    repository.save(Some(&request));
    Redirect::to(provider_uri.as_str())
}

#[derive(Deserialize)]
pub struct CallbackParameters {
    state: CsrfToken,
    code: Option<String>,
}

/// Provider callback: check the echoed state against the in-flight request,
/// consume the request, and land the browser back on the frontend.
///
/// Exchanging the authorization code for tokens happens upstream of this
/// subsystem and is deliberately not done here.
async fn callback(
    State(app_state): State<AppState>,
    repository: AuthRequestRepository,
    Query(parameters): Query<CallbackParameters>,
) -> Result<Redirect, AuthError> {
    let in_flight = repository.load().ok_or(AuthError::LoginExpired)?;

    let echoed = parameters.state.secret().as_bytes();
    let expected = in_flight.state.secret().as_bytes();
    if !bool::from(echoed.ct_eq(expected)) {
        return Err(AuthError::StateMismatch);
    }

    repository.remove();

    if let Some(code) = parameters.code {
        tracing::debug!("Received authorization code ({} bytes)", code.len());
    }

    let destination = repository
        .return_target()
        .unwrap_or_else(|| frontend_landing(&app_state));
    Ok(Redirect::to(&destination))
}

/// Anti-CSRF state, minted fresh per login attempt.
fn new_state_token() -> CsrfToken {
    let token: String = thread_rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect();
    CsrfToken::new(token)
}

fn provider_redirect_uri(request: &AuthorizationRequest) -> Url {
    let mut uri = request.authorization_uri.clone();
    {
        let mut query = uri.query_pairs_mut();
        query.append_pair("response_type", &request.response_type);
        query.append_pair("client_id", request.client_id.as_str());
        query.append_pair("redirect_uri", request.redirect_uri.as_str());
        if !request.scopes.is_empty() {
            let mut scopes: Vec<&str> = request.scopes.iter().map(String::as_str).collect();
            scopes.sort_unstable();
            query.append_pair("scope", &scopes.join(" "));
        }
        query.append_pair("state", request.state.secret());
        for (name, value) in &request.additional_parameters {
            match value {
                Value::String(text) => query.append_pair(name, text),
                other => query.append_pair(name, &other.to_string()),
            };
        }
    }
    uri
}

fn frontend_landing(app_state: &AppState) -> String {
    let config = &app_state.config;
    config
        .frontend_base_url
        .join(&config.frontend_landing_path)
        .map(|url| url.to_string())
        .unwrap_or_else(|_| config.frontend_base_url.to_string())
}
