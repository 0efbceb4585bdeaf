use inventory_auth::{create_app, Config};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "inventory_auth=debug,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env()?;
    let bind_addr =
        std::env::var("SSP_BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:3000".to_string());

    let app = create_app(config);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::debug!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
