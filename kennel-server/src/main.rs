use anyhow::Result;
use kennel_server::config::{self, Settings};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let settings = Settings::from_config(&config::load().snapshot())?;
    tracing::info!(env = %settings.environment, "starting kennel");

    let app = kennel_server::build(&settings).await?;
    app.listen(settings.addr()).await?;

    Ok(())
}
