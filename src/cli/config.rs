//! Config subcommand implementation.

use crate::cli::Cli;
use crate::config::AppSettings;
use crate::error::{CliResult, ConfigError};
use crate::output;
use clap::{Parser, Subcommand};

/// Show or initialize the configuration.
#[derive(Parser, Debug)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the effective settings as JSON
    Show,

    /// Write the default settings to the settings file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl ConfigCommand {
    pub fn execute(&self, cli: &Cli) -> CliResult<()> {
        match &self.action {
            ConfigAction::Show => {
                let settings = cli.settings()?;
                println!("{}", serde_json::to_string_pretty(&settings)?);
                Ok(())
            }
            ConfigAction::Init { force } => {
                let path = cli.settings_path()?;
                if path.exists() && !force {
                    return Err(ConfigError::AlreadyExists(path).into());
                }
                AppSettings::default().save_to(&path)?;
                if !cli.quiet {
                    output::print_success(&format!("Wrote default settings to {}", path.display()));
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Commands;
    use crate::error::CliError;
    use tempfile::TempDir;

    fn run(args: &[&str]) -> CliResult<()> {
        let cli = Cli::try_parse_from(args).unwrap();
        match &cli.command {
            Some(Commands::Config(cmd)) => cmd.execute(&cli),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_init_writes_defaults_once() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        let config = path.to_str().unwrap();

        run(&["portprobe", "-q", "--config", config, "config", "init"]).unwrap();
        assert_eq!(AppSettings::load_from(&path).unwrap(), AppSettings::default());

        let err = run(&["portprobe", "-q", "--config", config, "config", "init"]).unwrap_err();
        assert!(matches!(err, CliError::Config(ConfigError::AlreadyExists(_))));

        run(&["portprobe", "-q", "--config", config, "config", "init", "--force"]).unwrap();
    }

    #[test]
    fn test_show_requires_readable_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.json");
        let config = path.to_str().unwrap();

        let err = run(&["portprobe", "--config", config, "config", "show"]).unwrap_err();
        assert!(matches!(err, CliError::Config(ConfigError::ReadFailed { .. })));
    }
}
