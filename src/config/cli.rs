use crate::config::toml_config::TomlConfig;
use crate::config::{Overrides, Settings};
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "address-book")]
#[command(about = "Find addresses by postcode and house number and keep an address book")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Base URL of the address lookup service
    #[arg(long)]
    pub base_url: Option<String>,

    /// Path of the lookup endpoint on the base URL
    #[arg(long)]
    pub lookup_path: Option<String>,

    /// Request timeout for lookups, in seconds
    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Interactive form session (default)
    Session,
    /// Run a single lookup and print the addresses as JSON
    Lookup {
        #[arg(long)]
        postcode: String,
        #[arg(long)]
        house_number: String,
    },
}

impl CliConfig {
    pub fn settings(&self) -> Result<Settings> {
        let file = match &self.config {
            Some(path) => {
                let config = TomlConfig::from_file(path)?;
                config.validate()?;
                Some(config)
            }
            None => None,
        };

        let settings = Settings::resolve(
            file.as_ref(),
            Overrides {
                base_url: self.base_url.clone(),
                lookup_path: self.lookup_path.clone(),
                timeout_seconds: self.timeout_seconds,
                verbose: self.verbose,
                json_logs: self.json_logs,
            },
        );
        settings.validate()?;
        Ok(settings)
    }

    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Session)
    }
}
