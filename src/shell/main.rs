use tracing_subscriber::{EnvFilter, fmt};

use api_bundle::shared::config::AppConfig;
use api_bundle::shell::compose;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let config = AppConfig::from_env()?;
    let app = compose(&config)?.run().await?;

    let addr = config.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("API listening on http://{}/api", addr);
    axum::serve(listener, app).await?;
    Ok(())
}
