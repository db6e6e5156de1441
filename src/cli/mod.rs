//! CLI subcommand definitions and handlers.
//!
//! - `portprobe scan <host> <ports>` - TCP probe over a port list
//! - `portprobe sweep` - configured hosts x configured ports (default)
//! - `portprobe config show|init` - inspect or create the settings file

mod config;
mod reporter;
mod scan;
mod sweep;

pub use config::ConfigCommand;
pub use reporter::Reporter;
pub use scan::ScanCommand;
pub use sweep::SweepCommand;

use crate::config::AppSettings;
use crate::error::{CliResult, ConfigError};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// portprobe - TCP reachability and TLS certificate probe.
///
/// Classifies TCP ports as open, closed or filtered, and reports the leaf
/// certificate presented on TLS ports.
#[derive(Parser, Debug)]
#[command(name = "portprobe")]
#[command(author = "HueCodes <huecodes@proton.me>")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Probe TCP ports and TLS certificates", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute (defaults to `sweep`)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to custom configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Output format for results
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Plain)]
    pub output: OutputFormat,

    /// Per-probe timeout in milliseconds, overriding the configuration
    #[arg(short = 't', long, global = true, env = "PORTPROBE_TIMEOUT_MS", value_name = "MS")]
    pub timeout: Option<u64>,
}

impl Cli {
    /// Effective settings: configuration file plus command-line overrides.
    pub fn settings(&self) -> CliResult<AppSettings> {
        let mut settings = AppSettings::resolve(self.config.as_deref())?;
        if let Some(timeout_ms) = self.timeout {
            settings.timeout_ms = timeout_ms;
            settings.validate()?;
        }
        Ok(settings)
    }

    /// Default log filter for the chosen verbosity.
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "warn"
        }
    }

    pub async fn execute(&self) -> CliResult<()> {
        match &self.command {
            Some(Commands::Scan(cmd)) => {
                cmd.execute(self).await?;
            }
            Some(Commands::Sweep(cmd)) => {
                cmd.execute(self).await?;
            }
            Some(Commands::Config(cmd)) => cmd.execute(self)?,
            None => {
                SweepCommand::default().execute(self).await?;
            }
        }
        Ok(())
    }

    /// Where `config init` writes and `config show` reports.
    fn settings_path(&self) -> Result<PathBuf, ConfigError> {
        match &self.config {
            Some(path) => Ok(path.clone()),
            None => AppSettings::default_path(),
        }
    }
}

/// Value parser for host arguments: trims and rejects empty names.
pub(crate) fn parse_host(raw: &str) -> Result<String, String> {
    let host = raw.trim();
    if host.is_empty() {
        return Err("host must not be empty".to_string());
    }
    Ok(host.to_string())
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Probe a host over a list of TCP ports
    #[command(alias = "s")]
    Scan(ScanCommand),

    /// Probe every configured host on every configured port
    #[command(alias = "w")]
    Sweep(SweepCommand),

    /// Show or initialize the configuration
    #[command(alias = "c")]
    Config(ConfigCommand),
}

/// Output format for results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable plain text
    #[default]
    Plain,
    /// JSON structured output
    Json,
    /// CSV format for data analysis
    Csv,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Plain => write!(f, "plain"),
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
        }
    }
}
