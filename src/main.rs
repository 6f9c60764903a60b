//! CLI front end for the linkstash registry.
//!
//! Works directly on the JSON collection file named by the configuration,
//! so no server needs to be running.
//!
//! # Usage
//!
//! ```bash
//! # Shorten a batch of URLs (up to five per call)
//! linkstash shorten https://example.com/one https://example.com/two
//!
//! # Shorten with a preferred shortcode and a one-week validity
//! linkstash shorten https://example.com --code launch --validity 10080
//!
//! # Resolve a shortcode, recording the click
//! linkstash resolve launch --source https://newsletter.example
//!
//! # List the whole collection
//! linkstash list
//!
//! # Inspect one link's click history
//! linkstash stats launch
//! ```
//!
//! # Environment Variables
//!
//! See [`linkstash::config`] for the full list. Everything has a default;
//! `LINKSTASH_DATA_FILE` picks the collection file.

use std::env;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use tracing_subscriber::EnvFilter;

use linkstash::application::registry::Registry;
use linkstash::config::{self, Config};
use linkstash::domain::entities::{ClickEvent, LinkRecord, LinkSubmission};
use linkstash::error::RegistryError;
use linkstash::infrastructure::persistence::JsonFileStore;
use linkstash::infrastructure::remote_log::{LogLevel, RemoteLogger};

/// CLI for managing a linkstash collection.
#[derive(Parser)]
#[command(name = "linkstash")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Shorten up to five URLs in one atomic batch
    Shorten {
        /// URLs to shorten
        #[arg(required = true)]
        urls: Vec<String>,

        /// Validity window in minutes, applied to the whole batch (default: 30)
        #[arg(short, long)]
        validity: Option<i64>,

        /// Preferred shortcode (single URL only)
        #[arg(short, long)]
        code: Option<String>,
    },

    /// Resolve a shortcode to its target, recording the click
    Resolve {
        /// Shortcode to resolve
        shortcode: String,

        /// Referrer recorded as the click source
        #[arg(short, long)]
        source: Option<String>,
    },

    /// List every link in the collection
    List,

    /// Show one link's details and click history
    Stats {
        /// Shortcode to inspect
        shortcode: String,
    },
}

fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env()?;
    init_tracing(&config);

    if tracing::enabled!(tracing::Level::DEBUG) {
        config.print_summary();
    }

    let remote = config
        .remote_log_token
        .as_ref()
        .map(|token| RemoteLogger::new(&config.remote_log_url, token, &config.remote_log_stack));

    let registry = Registry::new(JsonFileStore::new(&config.data_file));

    match cli.command {
        Commands::Shorten {
            urls,
            validity,
            code,
        } => handle_shorten(&registry, &config, remote.as_ref(), urls, validity, code),
        Commands::Resolve { shortcode, source } => {
            handle_resolve(&registry, remote.as_ref(), &shortcode, source)
        }
        Commands::List => handle_list(&registry),
        Commands::Stats { shortcode } => handle_stats(&registry, &config, &shortcode),
    }
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    if config.log_format == "json" {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

/// Sends one event to the collector when remote logging is configured.
fn ship(remote: Option<&RemoteLogger>, level: LogLevel, package: &str, message: &str) {
    if let Some(logger) = remote {
        logger.log(level, package, message);
    }
}

/// Creates a batch of short links and prints the resulting table.
fn handle_shorten(
    registry: &Registry<JsonFileStore>,
    config: &Config,
    remote: Option<&RemoteLogger>,
    urls: Vec<String>,
    validity: Option<i64>,
    code: Option<String>,
) -> Result<()> {
    println!("{}", "🔗 Shorten URLs".bright_blue().bold());
    println!();

    if code.is_some() && urls.len() > 1 {
        anyhow::bail!("--code applies to a single URL; shorten them one at a time");
    }

    let mut submissions: Vec<LinkSubmission> = urls
        .into_iter()
        .map(|url| {
            let mut submission = LinkSubmission::new(url);
            if let Some(minutes) = validity {
                submission = submission.with_validity(minutes);
            }
            submission
        })
        .collect();

    if let Some(code) = code {
        // Guarded above: --code implies exactly one submission.
        submissions[0] = submissions[0].clone().with_preferred_shortcode(code);
    }

    match registry.create_batch(submissions) {
        Ok(created) => {
            println!(
                "  {:<28} {:<18} {}",
                "Short URL".bright_white().bold(),
                "Expires".bright_white().bold(),
                "Target".bright_white().bold()
            );
            println!("  {}", "─".repeat(90).bright_black());

            for record in &created {
                println!(
                    "  {:<28} {:<18} {}",
                    config.short_url(&record.shortcode).bright_yellow(),
                    format_expiry(record).bright_black(),
                    truncate(&record.original_url, 42).cyan()
                );
            }

            println!();
            println!(
                "{}",
                format!("✅ {} link(s) created", created.len()).green().bold()
            );
            println!();

            ship(
                remote,
                LogLevel::Info,
                "service",
                &format!("created {} short links", created.len()),
            );
            Ok(())
        }
        Err(e) => {
            ship(remote, LogLevel::Error, "service", &e.to_string());
            Err(e.into())
        }
    }
}

/// Resolves one shortcode, printing the redirect target.
fn handle_resolve(
    registry: &Registry<JsonFileStore>,
    remote: Option<&RemoteLogger>,
    shortcode: &str,
    source: Option<String>,
) -> Result<()> {
    // The system timezone stands in for the browser's coarse location hint.
    let coarse_geo = env::var("TZ").ok();
    let event = ClickEvent::now(source.as_deref(), coarse_geo.as_deref());

    match registry.resolve(shortcode, event) {
        Ok(record) => {
            println!("{}", "✅ Click recorded".green().bold());
            println!();
            println!(
                "  Target: {}",
                record.original_url.bright_green().bold()
            );
            println!(
                "  Clicks: {}",
                record.clicks.to_string().bright_green()
            );
            println!();

            ship(
                remote,
                LogLevel::Info,
                "handler",
                &format!("resolved shortcode {shortcode}"),
            );
            Ok(())
        }
        Err(e) => {
            let level = match e {
                RegistryError::Expired { .. } => LogLevel::Warn,
                _ => LogLevel::Error,
            };
            ship(remote, level, "handler", &e.to_string());
            Err(e.into())
        }
    }
}

/// Lists every link with status indicators.
///
/// # Output Format
///
/// ```text
/// 📋 Short Links
///
///   Code         Target                                      Expires            Clicks  Status
///   ──────────────────────────────────────────────────────────────────────────────────────────
///   launch       https://example.com/one                     2025-06-01 10:30   3       ACTIVE
/// ```
fn handle_list(registry: &Registry<JsonFileStore>) -> Result<()> {
    println!("{}", "📋 Short Links".bright_blue().bold());
    println!();

    let records = registry.list();

    if records.is_empty() {
        println!("{}", "  No links yet".yellow());
        println!();
        println!(
            "  Create one with: {} shorten https://example.com",
            "linkstash".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<12} {:<44} {:<18} {:<7} {}",
        "Code".bright_white().bold(),
        "Target".bright_white().bold(),
        "Expires".bright_white().bold(),
        "Clicks".bright_white().bold(),
        "Status".bright_white().bold()
    );
    println!("  {}", "─".repeat(90).bright_black());

    for record in &records {
        let status = if record.is_expired() {
            "EXPIRED".red()
        } else {
            "ACTIVE".green()
        };

        println!(
            "  {:<12} {:<44} {:<18} {:<7} {}",
            record.shortcode.cyan(),
            truncate(&record.original_url, 42),
            format_expiry(record).bright_black(),
            record.clicks.to_string().bright_white(),
            status
        );
    }

    println!();
    println!(
        "  Total: {}",
        records.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Shows one link's details and its full click history.
fn handle_stats(
    registry: &Registry<JsonFileStore>,
    config: &Config,
    shortcode: &str,
) -> Result<()> {
    println!("{}", "📊 Link Statistics".bright_blue().bold());
    println!();

    let record = registry
        .lookup(shortcode)
        .with_context(|| format!("no link found for shortcode '{shortcode}'"))?;

    let status = if record.is_expired() {
        "EXPIRED".red().bold()
    } else {
        "ACTIVE".green().bold()
    };

    println!(
        "  Short URL: {}",
        config.short_url(&record.shortcode).bright_yellow()
    );
    println!("  Target:    {}", record.original_url.cyan());
    println!(
        "  Created:   {}",
        record
            .created_at
            .format("%Y-%m-%d %H:%M UTC")
            .to_string()
            .bright_black()
    );
    println!("  Expires:   {} ({})", format_expiry(&record).bright_black(), status);
    println!(
        "  Clicks:    {}",
        record.clicks.to_string().bright_green().bold()
    );
    println!();

    if record.click_details.is_empty() {
        println!("{}", "  No clicks recorded yet".yellow());
        println!();
        return Ok(());
    }

    println!(
        "  {:<21} {:<36} {}",
        "Timestamp".bright_white().bold(),
        "Source".bright_white().bold(),
        "Location".bright_white().bold()
    );
    println!("  {}", "─".repeat(80).bright_black());

    for click in &record.click_details {
        println!(
            "  {:<21} {:<36} {}",
            click
                .timestamp
                .format("%Y-%m-%d %H:%M:%S")
                .to_string()
                .bright_black(),
            truncate(&click.source, 34).cyan(),
            click.coarse_geo.bright_black()
        );
    }

    println!();
    Ok(())
}

fn format_expiry(record: &LinkRecord) -> String {
    match record.expiry_at {
        Some(expiry_at) => expiry_at.format("%Y-%m-%d %H:%M").to_string(),
        None => "never".to_string(),
    }
}

/// Shortens long values for table display.
fn truncate(value: &str, max: usize) -> String {
    if value.chars().count() <= max {
        value.to_string()
    } else {
        let cut: String = value.chars().take(max.saturating_sub(3)).collect();
        format!("{cut}...")
    }
}
