use dotenvy::dotenv;
use nuvix_market_bot::{config::settings::WebhookSettings, errors::Result, webhook};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    dotenv().ok();

    let settings = WebhookSettings::from_env()
        .inspect_err(|e| error!("Missing webhook configuration: {e}"))?;
    info!(
        shop = %settings.shop_name,
        buyers_file = %settings.buyers_file.display(),
        "Starting sales webhook"
    );

    webhook::serve(&settings).await
}
