use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub mod app_state;
pub mod cookies;
pub mod oauth;
pub mod repositories;
mod routes;

pub use crate::app_state::{AppState, Config, IdentityProviderConfig};
pub use crate::oauth::authorization_request::AuthorizationRequest;
pub use crate::repositories::auth_request_cookies::AuthRequestRepository;

pub fn create_app(config: Config) -> Router {
    routes::main_router()
        .layer(TraceLayer::new_for_http())
        .with_state(AppState {
            config: Arc::new(config),
        })
}
