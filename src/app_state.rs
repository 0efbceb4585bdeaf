use anyhow::Context;
use axum::extract::FromRef;
use openidconnect::ClientId;
use std::sync::Arc;
use url::Url;

#[derive(Clone, FromRef)]
pub struct AppState {
    pub config: Arc<Config>,
}

pub struct Config {
    /// Whole origins a `return` query value must match exactly to be
    /// remembered across the login flow.
    pub allowed_return_origins: Vec<String>,
    pub frontend_base_url: Url,
    pub frontend_landing_path: String,
    pub identity_provider: IdentityProviderConfig,
}

pub struct IdentityProviderConfig {
    pub authorization_endpoint: Url,
    pub client_id: ClientId,
    pub redirect_uri: Url,
    pub scopes: Vec<String>,
}

impl Config {
    /// Reads the deployment configuration from the environment, with defaults
    /// matching the local development setup.
    pub fn from_env() -> anyhow::Result<Config> {
        let allowed_return_origins = env_or(
            "SSP_ALLOWED_RETURN_ORIGINS",
            "http://localhost:5173,https://localhost:5173,https://inventory-service.koyeb.app",
        )
        .split(',')
        .map(|origin| origin.trim().to_string())
        .filter(|origin| !origin.is_empty())
        .collect();

        let frontend_base_url = env_or("SSP_FRONTEND_BASE_URL", "http://localhost:5173")
            .parse::<Url>()
            .context("SSP_FRONTEND_BASE_URL is not a valid URL")?;
        let frontend_landing_path = env_or("SSP_FRONTEND_LANDING_PATH", "/login");

        let identity_provider = IdentityProviderConfig {
            authorization_endpoint: env_or(
                "SSP_IDP_AUTHORIZATION_ENDPOINT",
                "https://accounts.google.com/o/oauth2/v2/auth",
            )
            .parse::<Url>()
            .context("SSP_IDP_AUTHORIZATION_ENDPOINT is not a valid URL")?,
            client_id: ClientId::new(env_or("SSP_IDP_CLIENT_ID", "inventory-backend")),
            redirect_uri: env_or(
                "SSP_IDP_REDIRECT_URI",
                "http://localhost:3000/auth/callback",
            )
            .parse::<Url>()
            .context("SSP_IDP_REDIRECT_URI is not a valid URL")?,
            scopes: env_or("SSP_IDP_SCOPES", "openid,email,profile")
                .split(',')
                .map(|scope| scope.trim().to_string())
                .filter(|scope| !scope.is_empty())
                .collect(),
        };

        Ok(Config {
            allowed_return_origins,
            frontend_base_url,
            frontend_landing_path,
            identity_provider,
        })
    }
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}
