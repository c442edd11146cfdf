//! Convolens - conversation analytics from your terminal
//!
//! A CLI client for the customer-service conversation analytics API.
//! Fetches conversations, dashboards, and per-agent/per-tag analyses
//! and renders them as Markdown or JSON reports.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (connection, config, backend failure, etc.)

mod analysis;
mod api;
mod cli;
mod config;
mod error;
mod models;
mod report;
mod state;

use analysis::estimate_rollups;
use anyhow::{anyhow, Context, Result};
use api::ApiClient;
use cli::{Args, Command, OutputFormat};
use config::Config;
use error::ApiError;
use indicatif::{ProgressBar, ProgressStyle};
use state::ViewState;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle init-config early (no logging needed)
    if matches!(args.command, Command::InitConfig) {
        return handle_init_config();
    }

    // Initialize logging
    init_logging(&args);

    debug!("Convolens v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    match run(args).await {
        Ok(()) => Ok(()),
        Err(e) => {
            error!("Command failed: {}", e);
            eprintln!("\n❌ Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Handle init-config: generate a default .convolens.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(".convolens.toml");

    if path.exists() {
        eprintln!("⚠️  .convolens.toml already exists. Remove it first or edit it manually.");
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content).context("Failed to write .convolens.toml")?;

    println!("✅ Created .convolens.toml with default settings.");
    println!("   Edit it to point at your analytics API.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args) {
    let level = args.log_level();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Run the selected subcommand.
async fn run(args: Args) -> Result<()> {
    // Load configuration
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);

    let client = ApiClient::new(&config.api.base_url, config.api.timeout_seconds)?;
    info!("Using analytics API at {}", client.base_url());

    let format = config.output_format();
    let default_page_size = config.output.page_size;
    let quiet = args.quiet;

    let rendered = match &args.command {
        Command::Conversations { filters, page } => {
            let filters = filters.to_filter_state();
            let mut page = page.to_page_state(default_page_size);
            let data = fetch(quiet, "Fetching conversations...", {
                client.conversations(&page, &filters)
            })
            .await?;
            page.apply(&data.pagination);
            debug!("showing page {} of {} conversations", page.current, page.total);
            match format {
                OutputFormat::Markdown => report::conversations_markdown(&data, &filters),
                OutputFormat::Json => report::json_report(&data)?,
            }
        }
        Command::Show { id } => {
            let data = fetch(quiet, "Fetching conversation...", {
                client.conversation_detail(id)
            })
            .await?;
            match format {
                OutputFormat::Markdown => report::conversation_detail_markdown(&data),
                OutputFormat::Json => report::json_report(&data)?,
            }
        }
        Command::Dashboard => {
            let data = fetch(quiet, "Fetching dashboard...", client.dashboard()).await?;
            match format {
                OutputFormat::Markdown => report::dashboard_markdown(&data),
                OutputFormat::Json => report::json_report(&data)?,
            }
        }
        Command::Agents => {
            let data = fetch(quiet, "Fetching agents...", client.agents()).await?;
            match format {
                OutputFormat::Markdown => report::agents_markdown(&data),
                OutputFormat::Json => report::json_report(&data)?,
            }
        }
        Command::Agent {
            name,
            filters,
            page,
        } => {
            let filters = filters.to_filter_state();
            let page = page.to_page_state(default_page_size);
            let data = fetch(quiet, "Fetching agent analysis...", {
                client.agent_analysis(name, &page, &filters)
            })
            .await?;
            match format {
                OutputFormat::Markdown => report::agent_markdown(&data),
                OutputFormat::Json => report::json_report(&data)?,
            }
        }
        Command::Tag {
            name,
            filters,
            page,
        } => {
            let filters = filters.to_filter_state();
            let page = page.to_page_state(default_page_size);
            let data = fetch(quiet, "Fetching tag analysis...", {
                client.tag_analysis(name, &page, &filters)
            })
            .await?;
            match format {
                OutputFormat::Markdown => report::tag_markdown(&data),
                OutputFormat::Json => report::json_report(&data)?,
            }
        }
        Command::Tags => {
            // The backend has no dedicated tag-overview endpoint; the
            // rollup is derived from the dashboard's resolution rates.
            let data = fetch(quiet, "Fetching dashboard...", client.dashboard()).await?;
            let rollups = estimate_rollups(&data.tag_resolution_rates);
            match format {
                OutputFormat::Markdown => report::tag_rollups_markdown(&rollups),
                OutputFormat::Json => report::json_report(&rollups)?,
            }
        }
        Command::Options => {
            let data = fetch(quiet, "Fetching filter options...", client.options()).await?;
            match format {
                OutputFormat::Markdown => report::options_markdown(&data),
                OutputFormat::Json => report::json_report(&data)?,
            }
        }
        Command::Health => {
            let data = fetch(quiet, "Checking backend health...", client.health()).await?;
            match format {
                OutputFormat::Markdown => report::health_markdown(&data),
                OutputFormat::Json => report::json_report(&data)?,
            }
        }
        Command::InitConfig => unreachable!("handled before logging init"),
    };

    write_output(&args, &rendered)
}

/// Drive one request through the view lifecycle with a spinner.
async fn fetch<T, F>(quiet: bool, message: &str, request: F) -> Result<T>
where
    F: Future<Output = Result<T, ApiError>>,
{
    let spinner = make_spinner(quiet, message);
    let mut view = ViewState::new();
    let token = view.begin();

    let result = request.await.map_err(|e| e.to_string());
    view.complete(token, result);
    spinner.finish_and_clear();

    view.into_result().map_err(|message| anyhow!(message))
}

/// Create a spinner on stderr, hidden in quiet mode.
fn make_spinner(quiet: bool, message: &str) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// Write the rendered report to the output file or stdout.
fn write_output(args: &Args, rendered: &str) -> Result<()> {
    match &args.output {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            if !args.quiet {
                println!("✅ Report saved to: {}", path.display());
            }
        }
        None => {
            println!("{}", rendered);
        }
    }
    Ok(())
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from .convolens.toml");
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {}", e);
            Ok(Config::default())
        }
    }
}
