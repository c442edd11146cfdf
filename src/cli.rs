//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use crate::state::{FilterState, PageState};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Convolens - conversation analytics from your terminal
///
/// Fetch customer-service conversation analytics from the backend API
/// and render them as Markdown or JSON reports.
///
/// Examples:
///   convolens dashboard
///   convolens conversations --agent 沐沐 --tags 退款,投诉
///   convolens show 12345
///   convolens agent 沐沐 --page 2
///   convolens tags --format json --output tags.json
///   convolens init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Analytics API base URL
    ///
    /// Can also be set via CONVOLENS_API_URL env var or .convolens.toml config.
    #[arg(long, value_name = "URL", env = "CONVOLENS_API_URL")]
    pub api_url: Option<String>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .convolens.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output file path for the report (stdout when omitted)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format (markdown, json)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,
}

/// One report per subcommand.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List conversations with optional filters
    Conversations {
        #[command(flatten)]
        filters: FilterArgs,
        #[command(flatten)]
        page: PageArgs,
    },

    /// Show the full analysis of one conversation
    ///
    /// The leading '#' on conversation IDs may be omitted.
    Show {
        /// Conversation ID, e.g. "#12345" or "12345"
        id: String,
    },

    /// Show the aggregate dashboard
    Dashboard,

    /// List every agent with rollup scores
    Agents,

    /// Show the analysis for one agent
    Agent {
        /// Agent name
        name: String,
        #[command(flatten)]
        filters: FilterArgs,
        #[command(flatten)]
        page: PageArgs,
    },

    /// Show the analysis for one tag
    Tag {
        /// Tag name
        name: String,
        #[command(flatten)]
        filters: FilterArgs,
        #[command(flatten)]
        page: PageArgs,
    },

    /// Show the derived per-tag overview
    Tags,

    /// List the distinct agents, statuses, and tags available as filters
    Options,

    /// Check backend availability
    Health,

    /// Generate a default .convolens.toml configuration file
    InitConfig,
}

/// Filters shared by the list-style subcommands.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Full-text search over conversation content
    #[arg(long, value_name = "TEXT")]
    pub search: Option<String>,

    /// Filter by agent name
    #[arg(long, value_name = "NAME")]
    pub agent: Option<String>,

    /// Filter by resolution status (e.g. 已解决, 部分解决, 未解决)
    #[arg(long, value_name = "STATUS")]
    pub status: Option<String>,

    /// Filter by tags (comma-separated)
    ///
    /// Example: --tags 退款,投诉
    #[arg(long, value_name = "TAGS", value_delimiter = ',')]
    pub tags: Vec<String>,

    /// Start of the time range (requires --to)
    #[arg(long, value_name = "TIME")]
    pub from: Option<String>,

    /// End of the time range (requires --from)
    #[arg(long, value_name = "TIME")]
    pub to: Option<String>,
}

impl FilterArgs {
    /// Build the filter state sent to the API.
    pub fn to_filter_state(&self) -> FilterState {
        FilterState {
            search_text: self.search.clone(),
            agent: self.agent.clone(),
            resolution_status: self.status.clone(),
            tags: self.tags.clone(),
            time_range: match (&self.from, &self.to) {
                (Some(from), Some(to)) => Some((from.clone(), to.clone())),
                _ => None,
            },
        }
    }
}

/// Pagination shared by the list-style subcommands.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct PageArgs {
    /// Page number (1-based)
    #[arg(long, value_name = "NUM")]
    pub page: Option<u32>,

    /// Items per page
    #[arg(long, value_name = "NUM")]
    pub page_size: Option<u32>,
}

impl PageArgs {
    /// Build the page state, falling back to the configured page size.
    pub fn to_page_state(&self, default_page_size: u32) -> PageState {
        let mut state = PageState::new(self.page_size.unwrap_or(default_page_size));
        if let Some(page) = self.page {
            state.set(page, state.page_size);
        }
        state
    }
}

/// Output format for the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Markdown format (default)
    #[default]
    Markdown,
    /// JSON format
    Json,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for init-config
        if matches!(self.command, Command::InitConfig) {
            return Ok(());
        }

        // Validate API URL format when given on the command line
        if let Some(ref url) = self.api_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err("API URL must start with 'http://' or 'https://'".to_string());
            }
        }

        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        // Validate timeout if provided
        if let Some(timeout) = self.timeout {
            if timeout == 0 {
                return Err("Timeout must be at least 1 second".to_string());
            }
        }

        // Validate pagination and time ranges on the paged subcommands
        match &self.command {
            Command::Conversations { filters, page }
            | Command::Agent { filters, page, .. }
            | Command::Tag { filters, page, .. } => {
                if page.page == Some(0) {
                    return Err("Page numbers start at 1".to_string());
                }
                if page.page_size == Some(0) {
                    return Err("Page size must be at least 1".to_string());
                }
                if filters.from.is_some() != filters.to.is_some() {
                    return Err("--from and --to must be used together".to_string());
                }
            }
            _ => {}
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_args(command: Command) -> Args {
        Args {
            command,
            api_url: None,
            config: None,
            output: None,
            format: None,
            timeout: None,
            verbose: false,
            quiet: false,
        }
    }

    fn paged(filters: FilterArgs, page: PageArgs) -> Command {
        Command::Conversations { filters, page }
    }

    #[test]
    fn test_validation_invalid_api_url() {
        let mut args = make_args(Command::Dashboard);
        args.api_url = Some("localhost:5000".to_string());
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_conflicting_options() {
        let mut args = make_args(Command::Dashboard);
        args.verbose = true;
        args.quiet = true;
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_half_open_time_range() {
        let filters = FilterArgs {
            from: Some("2024-03-01".to_string()),
            ..FilterArgs::default()
        };
        let args = make_args(paged(filters, PageArgs::default()));
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_zero_page() {
        let page = PageArgs {
            page: Some(0),
            ..PageArgs::default()
        };
        let args = make_args(paged(FilterArgs::default(), page));
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_filter_args_build_state() {
        let filters = FilterArgs {
            search: Some("退款".to_string()),
            agent: Some("沐沐".to_string()),
            status: None,
            tags: vec!["投诉".to_string()],
            from: Some("2024-03-01".to_string()),
            to: Some("2024-03-31".to_string()),
        };
        let state = filters.to_filter_state();
        assert_eq!(state.search_text.as_deref(), Some("退款"));
        assert_eq!(state.tags, vec!["投诉"]);
        assert_eq!(
            state.time_range,
            Some(("2024-03-01".to_string(), "2024-03-31".to_string()))
        );
    }

    #[test]
    fn test_page_args_fall_back_to_config_size() {
        let page = PageArgs::default();
        let state = page.to_page_state(20);
        assert_eq!(state.current, 1);
        assert_eq!(state.page_size, 20);

        let page = PageArgs {
            page: Some(3),
            page_size: Some(5),
        };
        let state = page.to_page_state(20);
        assert_eq!(state.current, 3);
        assert_eq!(state.page_size, 5);
    }

    #[test]
    fn test_log_level() {
        let mut args = make_args(Command::Dashboard);
        assert_eq!(args.log_level(), tracing::Level::INFO);

        args.verbose = true;
        assert_eq!(args.log_level(), tracing::Level::DEBUG);

        args.verbose = false;
        args.quiet = true;
        assert_eq!(args.log_level(), tracing::Level::ERROR);
    }
}
