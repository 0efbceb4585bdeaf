use base64::prelude::BASE64_URL_SAFE;
use base64::Engine;
use openidconnect::{ClientId, CsrfToken};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use url::Url;

/// An OAuth2 authorization request in flight: everything the callback side
/// needs after the identity-provider redirect round-trip.
///
/// The wire shape (camelCase JSON, URL-safe base64) matches cookies minted by
/// earlier deployments of this backend, so records survive a rollout in either
/// direction.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizationRequest {
    pub authorization_uri: Url,
    pub client_id: ClientId,
    pub redirect_uri: Url,
    #[serde(default)]
    pub scopes: HashSet<String>,
    pub state: CsrfToken,
    #[serde(default = "default_response_type")]
    pub response_type: String,
    #[serde(default)]
    pub additional_parameters: HashMap<String, Value>,
    #[serde(default)]
    pub attributes: HashMap<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authorization_request_uri: Option<Url>,
}

fn default_response_type() -> String {
    "code".to_string()
}

impl AuthorizationRequest {
    pub fn new(
        authorization_uri: Url,
        client_id: ClientId,
        redirect_uri: Url,
        state: CsrfToken,
    ) -> Self {
        AuthorizationRequest {
            authorization_uri,
            client_id,
            redirect_uri,
            scopes: HashSet::new(),
            state,
            response_type: default_response_type(),
            additional_parameters: HashMap::new(),
            attributes: HashMap::new(),
            authorization_request_uri: None,
        }
    }

    pub fn with_scopes(mut self, scopes: impl IntoIterator<Item = String>) -> Self {
        self.scopes = scopes.into_iter().collect();
        self
    }

    pub fn with_authorization_request_uri(mut self, uri: Url) -> Self {
        self.authorization_request_uri = Some(uri);
        self
    }
}

// `CsrfToken` is a secret newtype without `PartialEq`; equality here compares
// it by value. The callback path compares states in constant time instead.
impl PartialEq for AuthorizationRequest {
    fn eq(&self, other: &Self) -> bool {
        self.authorization_uri == other.authorization_uri
            && self.client_id == other.client_id
            && self.redirect_uri == other.redirect_uri
            && self.scopes == other.scopes
            && self.state.secret() == other.state.secret()
            && self.response_type == other.response_type
            && self.additional_parameters == other.additional_parameters
            && self.attributes == other.attributes
            && self.authorization_request_uri == other.authorization_request_uri
    }
}

/// Serializes a request into a single cookie-safe string.
///
/// Serialization of an in-process record can only fail on a malformed record
/// type, which is a bug rather than an input condition, so it fails fast.
pub fn encode(request: &AuthorizationRequest) -> String {
    let json =
        serde_json::to_string(request).expect("authorization request serializes to JSON");
    BASE64_URL_SAFE.encode(json)
}

/// Inverse of [`encode`]. Any malformed input reads as "no request in
/// flight": a tampered, truncated or version-skewed cookie must degrade to a
/// clean login restart, never an error.
pub fn decode(value: &str) -> Option<AuthorizationRequest> {
    let bytes = BASE64_URL_SAFE.decode(value).ok()?;
    let json = String::from_utf8(bytes).ok()?;
    serde_json::from_str(&json).ok()
}
