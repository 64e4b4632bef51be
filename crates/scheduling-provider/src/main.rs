use scheduling_provider::{ProviderConfig, VERSION, server};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is normal in a cluster
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    tracing::info!(version = VERSION, "starting scheduling provider");

    let config = ProviderConfig::from_env()?;
    server::serve(&config).await?;

    Ok(())
}
