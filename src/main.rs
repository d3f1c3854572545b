use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use mezeg::api::AppState;
use mezeg::config::MezegConfig;
use mezeg::web;

#[tokio::main]
async fn main() -> Result<()> {
    let config = MezegConfig::load().context("Failed to load configuration")?;

    init_tracing(&config);

    let state = AppState::from_config(&config).context("Failed to initialise application")?;
    web::run(state, config.server.port)
        .await
        .context("Web server failed")?;
    Ok(())
}

fn init_tracing(config: &MezegConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if config.logging.format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}
