use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use fxc::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for fxc::AppCommand {
    fn from(cmd: Commands) -> fxc::AppCommand {
        match cmd {
            Commands::Convert { from, to, amount } => fxc::AppCommand::Convert { from, to, amount },
            Commands::Currencies => fxc::AppCommand::Currencies,
            Commands::Interactive => fxc::AppCommand::Interactive,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Convert an amount between two currencies
    Convert {
        /// Source currency code (falls back to the configured default)
        #[arg(short, long)]
        from: Option<String>,
        /// Target currency code (falls back to the configured default)
        #[arg(short, long)]
        to: Option<String>,
        /// Amount to convert
        #[arg(short, long)]
        amount: Option<String>,
    },
    /// List the available currencies
    Currencies,
    /// Start the interactive conversion loop
    Interactive,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => setup(),
        Some(cmd) => fxc::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}

fn setup() -> anyhow::Result<()> {
    use anyhow::Context;

    let path = fxc::core::config::AppConfig::default_config_path()?;

    if path.exists() {
        anyhow::bail!("Configuration file already exists at {}", path.display());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let default_config = r#"---
# Fixer API access key. The FIXER_API_KEY environment variable takes
# precedence, so the key never has to live in this file.
api_key: ""

providers:
  fixer:
    base_url: "http://data.fixer.io"

# Outbound request timeout and the debounce window used by the
# interactive loop.
timeout_secs: 10
debounce_ms: 250

defaults:
  source: "BRL"
  target: "USD"
  amount: "1"
"#;

    std::fs::write(&path, default_config)
        .with_context(|| format!("Failed to write config file to {}", path.display()))?;

    tracing::info!("Created default configuration at {}", path.display());
    Ok(())
}
