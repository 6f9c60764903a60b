//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before any
//! command runs.
//!
//! ## Variables
//!
//! All variables are optional:
//!
//! - `LINKSTASH_DATA_FILE` - Path of the JSON collection file
//!   (default: `linkstash_data/links.json`)
//! - `LINKSTASH_BASE_URL` - Base used when printing short URLs
//!   (default: `https://short.local`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `REMOTE_LOG_URL` - Collector endpoint for shipped log events
//! - `REMOTE_LOG_TOKEN` - Bearer token; shipping is enabled only when set
//! - `REMOTE_LOG_STACK` - Stack label for shipped events: `backend` or
//!   `frontend` (default: `backend`)

use std::env;
use std::path::PathBuf;

use anyhow::Result;
use url::Url;

/// Collector endpoint used when `REMOTE_LOG_URL` is not set.
const DEFAULT_REMOTE_LOG_URL: &str = "http://20.244.56.144/evaluation-service/logs";

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub data_file: PathBuf,
    pub base_url: String,
    pub log_level: String,
    pub log_format: String,
    pub remote_log_url: String,
    /// Bearer token for the log collector. Shipping stays off without it.
    pub remote_log_token: Option<String>,
    pub remote_log_stack: String,
}

impl Config {
    /// Loads configuration from environment variables, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> Result<Self> {
        let data_file = env::var("LINKSTASH_DATA_FILE")
            .unwrap_or_else(|_| "linkstash_data/links.json".to_string())
            .into();

        let base_url =
            env::var("LINKSTASH_BASE_URL").unwrap_or_else(|_| "https://short.local".to_string());

        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let remote_log_url =
            env::var("REMOTE_LOG_URL").unwrap_or_else(|_| DEFAULT_REMOTE_LOG_URL.to_string());

        // An empty token disables shipping just like an absent one.
        let remote_log_token = env::var("REMOTE_LOG_TOKEN").ok().filter(|t| !t.is_empty());

        let remote_log_stack =
            env::var("REMOTE_LOG_STACK").unwrap_or_else(|_| "backend".to_string());

        Ok(Self {
            data_file,
            base_url,
            log_level,
            log_format,
            remote_log_url,
            remote_log_token,
            remote_log_stack,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `data_file` is empty
    /// - `base_url` is not a valid http(s) URL
    /// - `log_format` is not `text` or `json`
    /// - `remote_log_url` is not http(s)
    /// - `remote_log_stack` is not `backend` or `frontend`
    pub fn validate(&self) -> Result<()> {
        if self.data_file.as_os_str().is_empty() {
            anyhow::bail!("LINKSTASH_DATA_FILE must not be empty");
        }

        match Url::parse(&self.base_url) {
            Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
            _ => anyhow::bail!(
                "LINKSTASH_BASE_URL must be a valid http(s) URL, got '{}'",
                self.base_url
            ),
        }

        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.remote_log_url.starts_with("http://")
            && !self.remote_log_url.starts_with("https://")
        {
            anyhow::bail!(
                "REMOTE_LOG_URL must start with 'http://' or 'https://', got '{}'",
                self.remote_log_url
            );
        }

        if self.remote_log_stack != "backend" && self.remote_log_stack != "frontend" {
            anyhow::bail!(
                "REMOTE_LOG_STACK must be 'backend' or 'frontend', got '{}'",
                self.remote_log_stack
            );
        }

        Ok(())
    }

    /// Returns whether log shipping to the remote collector is enabled.
    pub fn is_remote_logging_enabled(&self) -> bool {
        self.remote_log_token.is_some()
    }

    /// Constructs the full short URL for a code.
    pub fn short_url(&self, code: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), code)
    }

    /// Prints configuration summary (without sensitive data).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Data file: {}", self.data_file.display());
        tracing::info!("  Base URL: {}", self.base_url);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);

        if let Some(ref token) = self.remote_log_token {
            tracing::info!(
                "  Remote logging: enabled, token {} ({} stack)",
                mask_token(token),
                self.remote_log_stack
            );
        } else {
            tracing::info!("  Remote logging: disabled");
        }
    }
}

/// Masks a bearer token for logging, keeping only a short prefix.
fn mask_token(token: &str) -> String {
    if token.len() <= 4 {
        "***".to_string()
    } else {
        format!("{}***", &token[..4])
    }
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
