//! newsharvest CLI
//!
//! Collects labeled newspaper articles from a content API into
//! `data/<section>/*.txt` and assembles the stored corpus back into
//! structured rows.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use newsharvest::{
    error::{AppError, Result},
    models::Config,
    pipeline,
    services::ContentClient,
    storage::LocalStorage,
};

/// Environment variable holding the content API credential.
const API_KEY_VAR: &str = "GUARDIAN_API_KEY";

#[derive(Parser, Debug)]
#[command(
    name = "newsharvest",
    version,
    about = "Labeled news corpus collector"
)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "newsharvest.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Collect articles for every configured section
    Collect {
        /// Override the corpus directory from the config
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Override the per-section quota from the config
        #[arg(long)]
        quota: Option<usize>,
    },

    /// Decode stored records and print one JSON row per line
    Assemble {
        /// Override the corpus directory from the config
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },

    /// Validate the configuration file
    Validate,

    /// Show stored record counts per section
    Info,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Read the API key from the environment, loading `.env` first.
///
/// A missing key aborts before any network call is made.
fn load_api_key() -> Result<String> {
    dotenvy::dotenv().ok();
    std::env::var(API_KEY_VAR)
        .map_err(|_| AppError::config(format!("{API_KEY_VAR} missing from environment or .env")))
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = Config::load_or_default(&cli.config);

    match cli.command {
        Command::Collect { data_dir, quota } => {
            if let Some(dir) = data_dir {
                config.collection.data_dir = dir;
            }
            if let Some(quota) = quota {
                config.collection.articles_per_section = quota;
            }
            config.validate()?;

            let api_key = load_api_key()?;
            let client = ContentClient::new(&config.api, api_key)?;
            let storage = LocalStorage::new(&config.collection.data_dir);

            let outcome = pipeline::run_collector(&config, &storage, &client).await?;
            log::info!(
                "Collected {} articles across {} sections ({} failed)",
                outcome.total_written(),
                outcome.sections.len(),
                outcome.failed_sections()
            );
        }

        Command::Assemble { data_dir } => {
            if let Some(dir) = data_dir {
                config.collection.data_dir = dir;
            }
            let storage = LocalStorage::new(&config.collection.data_dir);

            let rows = pipeline::run_assemble(&storage).await?;
            for row in &rows {
                println!("{}", serde_json::to_string(row)?);
            }
        }

        Command::Validate => {
            config.validate()?;
            log::info!(
                "Config OK: {} sections, quota {}, page size {}",
                config.sections.len(),
                config.collection.articles_per_section,
                config.api.page_size
            );
        }

        Command::Info => {
            let storage = LocalStorage::new(&config.collection.data_dir);
            log::info!("Corpus directory: {}", storage.root().display());
            for section in &config.sections {
                let count = storage.record_count(&section.name).await?;
                log::info!("{}: {} records", section.name, count);
            }
        }
    }

    Ok(())
}
