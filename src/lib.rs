pub mod cli;
pub mod core;
pub mod providers;

use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::core::config::AppConfig;
use crate::core::rates::RateProvider;
use crate::providers::fixer::FixerProvider;

pub enum AppCommand {
    Convert {
        from: Option<String>,
        to: Option<String>,
        amount: Option<String>,
    },
    Currencies,
    Interactive,
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Currency converter starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    match command {
        AppCommand::Currencies => cli::currencies::run(),
        AppCommand::Convert { from, to, amount } => {
            let provider = make_provider(&config)?;
            cli::convert::run(provider, &config, from, to, amount).await
        }
        AppCommand::Interactive => {
            let provider = make_provider(&config)?;
            cli::interactive::run(provider, &config).await
        }
    }
}

fn make_provider(config: &AppConfig) -> Result<Arc<dyn RateProvider>> {
    let api_key = config.resolve_api_key()?;
    let provider = FixerProvider::new(
        config.fixer_base_url(),
        &api_key,
        Duration::from_secs(config.timeout_secs),
    )?;
    Ok(Arc::new(provider))
}
