use inventory_auth::{create_app, Config, IdentityProviderConfig};
use openidconnect::ClientId;
use std::sync::OnceLock;
use url::Url;

static LOG_INITIALIZED: OnceLock<()> = OnceLock::new();

pub struct TestConfig {
    pub base_url: Url,
    pub idp_authorization_endpoint: Url,
    pub frontend_landing_url: Url,
    pub allowed_return_origin: String,
}

pub async fn start_test_server() -> TestConfig {
    LOG_INITIALIZED.get_or_init(|| {
        tracing_subscriber::fmt()
            .with_env_filter("inventory_auth=debug,tower_http=debug")
            .init()
    });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let mut base_url = Url::parse("http://127.0.0.1").unwrap();
    base_url.set_port(Some(port)).unwrap();

    let idp_authorization_endpoint = Url::parse("https://idp.example/o/oauth2/auth").unwrap();
    let frontend_base_url = Url::parse("http://localhost:5173").unwrap();
    let allowed_return_origin = "https://inventory-service.koyeb.app".to_string();

    let config = Config {
        allowed_return_origins: vec![
            "http://localhost:5173".to_string(),
            allowed_return_origin.clone(),
        ],
        frontend_base_url: frontend_base_url.clone(),
        frontend_landing_path: "/login".to_string(),
        identity_provider: IdentityProviderConfig {
            authorization_endpoint: idp_authorization_endpoint.clone(),
            client_id: ClientId::new("inventory-backend".to_string()),
            redirect_uri: base_url.join("/auth/callback").unwrap(),
            scopes: vec!["openid".to_string(), "email".to_string()],
        },
    };

    let app = create_app(config);
    tokio::spawn(async { axum::serve(listener, app).await.unwrap() });

    TestConfig {
        base_url,
        idp_authorization_endpoint,
        frontend_landing_url: frontend_base_url.join("/login").unwrap(),
        allowed_return_origin,
    }
}
