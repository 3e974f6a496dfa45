use dotenvy::dotenv;
use nuvix_market_bot::{
    bot::{self, BotData},
    config::{self, settings::BotSettings},
    errors::{Error, Result},
};
use std::{
    env,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; variables can also be set externally
    dotenv().ok();

    // 3. Settings, roles and the command policy
    let settings = BotSettings::from_env()
        .inspect_err(|e| error!("Failed to load bot settings: {e}"))?;
    let roles = config::roles::load_role_config_from_env()
        .inspect_err(|e| error!("Failed to load role configuration: {e}"))?;
    let policy = config::policy::load_policy_or_default(&settings.policy_path)
        .inspect_err(|e| error!("Failed to load command policy: {e}"))?;
    info!(
        commands = policy.len(),
        owner = roles.owner_id(),
        "Configuration loaded"
    );

    // 4. Initialize database
    let database = config::database::init_database(&settings.database_url)
        .await
        .inspect(|_| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to initialize database: {e}"))?;

    let token = env::var("DISCORD_TOKEN")
        .inspect_err(|e| error!("DISCORD_TOKEN not found: {e}"))
        .map_err(Error::EnvVar)?;

    // 5. Run the bot, again after every /restart
    loop {
        let restart = Arc::new(AtomicBool::new(false));
        let data = BotData::new(
            database.clone(),
            settings.clone(),
            roles.clone(),
            policy.clone(),
            Arc::clone(&restart),
        )?;

        bot::run_bot(&token, data).await?;

        if !restart.load(Ordering::SeqCst) {
            info!("Bot stopped");
            break;
        }
        info!("Restarting bot...");
    }

    Ok(())
}
