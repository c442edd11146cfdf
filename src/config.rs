//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.convolens.toml` files.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// API settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,
}

/// Analytics API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Analytics API base URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:5000/api".to_string()
}

fn default_timeout() -> u64 {
    30
}

/// Report output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default report format ("markdown" or "json").
    #[serde(default = "default_format")]
    pub format: String,

    /// Default page size for list reports.
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            page_size: default_page_size(),
            verbose: false,
        }
    }
}

fn default_format() -> String {
    "markdown".to_string()
}

fn default_page_size() -> u32 {
    10
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(".convolens.toml");

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings.
    /// This method only overrides config when CLI provides explicit values.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref api_url) = args.api_url {
            self.api.base_url = api_url.clone();
        }

        if let Some(timeout) = args.timeout {
            self.api.timeout_seconds = timeout;
        }

        if let Some(format) = args.format {
            self.output.format = match format {
                crate::cli::OutputFormat::Markdown => "markdown".to_string(),
                crate::cli::OutputFormat::Json => "json".to_string(),
            };
        }

        // Flags always override
        if args.verbose {
            self.output.verbose = true;
        }
    }

    /// Resolved output format, defaulting to Markdown on unknown values.
    pub fn output_format(&self) -> crate::cli::OutputFormat {
        match self.output.format.as_str() {
            "json" => crate::cli::OutputFormat::Json,
            _ => crate::cli::OutputFormat::Markdown,
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "http://localhost:5000/api");
        assert_eq!(config.api.timeout_seconds, 30);
        assert_eq!(config.output.page_size, 10);
    }

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
[api]
base_url = "https://analytics.example.com/api"
timeout_seconds = 10

[output]
format = "json"
page_size = 25
verbose = true
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.api.base_url, "https://analytics.example.com/api");
        assert_eq!(config.api.timeout_seconds, 10);
        assert_eq!(config.output.format, "json");
        assert_eq!(config.output.page_size, 25);
        assert!(config.output.verbose);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: Config = toml::from_str("[api]\nbase_url = \"http://10.0.0.2/api\"\n").unwrap();
        assert_eq!(config.api.base_url, "http://10.0.0.2/api");
        assert_eq!(config.api.timeout_seconds, 30);
        assert_eq!(config.output.format, "markdown");
    }

    #[test]
    fn test_output_format_resolution() {
        let mut config = Config::default();
        assert_eq!(config.output_format(), crate::cli::OutputFormat::Markdown);
        config.output.format = "json".to_string();
        assert_eq!(config.output_format(), crate::cli::OutputFormat::Json);
    }

    #[test]
    fn test_default_toml_generation() {
        let toml_str = Config::default_toml();
        assert!(!toml_str.is_empty());
        assert!(toml_str.contains("[api]"));
        assert!(toml_str.contains("[output]"));
    }
}
