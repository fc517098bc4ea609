//! 4D results collector CLI
//!
//! Fetches the draw archive listing and writes draw results as JSON.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use fourd::{
    error::Result,
    models::Config,
    pipeline,
    storage::LocalStorage,
    utils::http::{HttpPageSource, PageSource},
};
use tokio_util::sync::CancellationToken;

/// fourd - Singapore Pools 4D results collector
#[derive(Parser, Debug)]
#[command(name = "fourd", version, about = "Singapore Pools 4D results collector")]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "fourd.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Collect recent draws into the results file
    Collect {
        /// Number of most recent draws to collect
        #[arg(short, long)]
        limit: Option<usize>,

        /// Collect every listed draw (overrides --limit)
        #[arg(long)]
        all: bool,

        /// Results file path, relative to the output directory
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Collect the newest draw into the latest-draw files
    Latest {
        /// Latest-draw record path, relative to the output directory
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the draw identifiers on the listing page
    List,

    /// Validate the configuration file
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Cancel `token` on Ctrl-C so a running batch stops between draws.
fn cancel_on_ctrl_c(token: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::warn!("Interrupted, finishing current draw...");
            token.cancel();
        }
    });
}

/// Apply command-line flags on top of the loaded configuration.
///
/// `--all` is ORed with `batch.all`, so it wins over any limit. Output paths
/// stay relative to `output.dir` unless absolute.
fn apply_overrides(config: &mut Config, command: &Command) {
    match command {
        Command::Collect { limit, all, output } => {
            if let Some(limit) = limit {
                config.batch.limit = *limit;
            }
            config.batch.all |= *all;
            if let Some(path) = output {
                config.output.results_file = path.display().to_string();
            }
        }
        Command::Latest { output: Some(path) } => {
            config.output.latest_file = path.display().to_string();
        }
        Command::Latest { output: None } | Command::List | Command::Validate => {}
    }
}

/// Validate the configuration and build the HTTP page source.
fn page_source(config: &Config) -> Result<Arc<dyn PageSource>> {
    config.validate()?;
    Ok(Arc::new(HttpPageSource::from_config(&config.crawler)?))
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = Config::load_or_default(&cli.config);
    log::debug!("Loaded configuration from {}", cli.config.display());
    apply_overrides(&mut config, &cli.command);

    match cli.command {
        Command::Collect { .. } => {
            let source = page_source(&config)?;
            let storage = LocalStorage::new(&config.output);
            let cancel = CancellationToken::new();
            cancel_on_ctrl_c(cancel.clone());

            let summary = pipeline::run_collect(&config, source, &storage, cancel).await?;
            log::info!(
                "Collected {} of {} listed draws",
                summary.parsed,
                summary.listed
            );
        }

        Command::Latest { .. } => {
            let source = page_source(&config)?;
            let storage = LocalStorage::new(&config.output);
            let record = pipeline::run_latest(&config, source, &storage).await?;
            log::info!("Latest draw: {} {}", record.draw_number, record.date);
        }

        Command::List => {
            let source = page_source(&config)?;
            for identifier in pipeline::run_list(&config, source).await? {
                println!("{identifier}");
            }
        }

        Command::Validate => {
            log::info!("Validating configuration...");
            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("✓ Config OK");
        }
    }

    log::info!("Done!");

    Ok(())
}
