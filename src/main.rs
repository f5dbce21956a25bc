use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use piyasa::instrument::Category;
use piyasa::log::init_logging;

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

impl From<Commands> for piyasa::AppCommand {
    fn from(cmd: Commands) -> piyasa::AppCommand {
        match cmd {
            Commands::Quotes { category } => piyasa::AppCommand::Quotes { category },
            Commands::Search { query } => piyasa::AppCommand::Search { query },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Display the market quote catalog
    Quotes {
        /// Restrict to a single category (crypto, currency, stock)
        #[arg(short = 'C', long)]
        category: Option<Category>,
    },
    /// Search the catalog by name or symbol
    Search {
        /// Case-insensitive name/symbol fragment
        query: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => setup(),
        Some(cmd) => piyasa::run_command(cmd.into(), cli.config_path.as_deref()).await,
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

    let path = piyasa::config::AppConfig::default_config_path()?;

    if path.exists() {
        anyhow::bail!("Configuration file already exists at {}", path.display());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let default_config = r#"---
# Reference currency all quotes are denominated in
currency: "TRY"

providers:
  coingecko:
    base_url: "https://api.coingecko.com"
  exchange_rate:
    base_url: "https://api.exchangerate-api.com"

# Seconds before cached quotes go stale
cache_ttl_secs: 300
"#;

    std::fs::write(&path, default_config)
        .with_context(|| format!("Failed to write config file to {}", path.display()))?;

    tracing::info!("Created default configuration at {}", path.display());
    Ok(())
}
