//! Command-line interface.

pub mod cleanup;
pub mod completions;
pub mod get;
pub mod output;
pub mod sections;
pub mod status;
pub mod sync;

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing::debug;

use crate::core::config::{Overrides, Settings};
use crate::core::constants;
use crate::core::env::EnvFile;
use crate::core::sync::Readiness;
use crate::error::{ConfigError, Result};

/// Thothix Vault - publish sectioned .env files to Vault.
#[derive(Parser)]
#[command(
    name = "thothix-vault",
    about = "Publish sectioned .env files to a Vault KV v2 store",
    version,
    after_help = "Sections are declared with comment headers: # :database - Database settings"
)]
pub struct Cli {
    /// Configuration file to read
    #[arg(long, global = true, value_name = "PATH", default_value = constants::ENV_FILE)]
    pub env_file: PathBuf,

    /// Vault address
    #[arg(long, global = true, env = "VAULT_ADDR")]
    pub addr: Option<String>,

    /// Vault token (defaults to VAULT_ROOT_TOKEN, then VAULT_APP_TOKEN from the .env file)
    #[arg(long, global = true, env = "VAULT_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// KV v2 mount to publish under
    #[arg(long, global = true, env = "VAULT_MOUNT")]
    pub mount: Option<String>,

    /// Environment label for display and token names
    #[arg(long, global = true, env = "ENVIRONMENT")]
    pub environment: Option<String>,

    /// Readiness probes before giving up
    #[arg(long, global = true, value_name = "N")]
    pub retries: Option<u32>,

    /// Pause between readiness probes, in milliseconds
    #[arg(long, global = true, value_name = "MS")]
    pub retry_interval_ms: Option<u64>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit log records as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Publish every section of the .env file to Vault
    Sync {
        /// Run against an in-memory store; nothing leaves this machine
        #[arg(long)]
        dry_run: bool,
        /// Print stored values instead of masking them
        #[arg(long)]
        show_values: bool,
    },

    /// Set up the mount, policies and tokens, then sync
    Init {
        /// Run against an in-memory store; nothing leaves this machine
        #[arg(long)]
        dry_run: bool,
        /// Print stored values instead of masking them
        #[arg(long)]
        show_values: bool,
    },

    /// Preview the sections parsed from the .env file
    Sections,

    /// Read one section back from Vault
    Get {
        /// Section identifier (e.g. database)
        section: String,
        /// Print stored values instead of masking them
        #[arg(long)]
        show_values: bool,
    },

    /// Check whether Vault is reachable and unsealed
    Status,

    /// Remove temporary files left behind by earlier runs
    Cleanup {
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
        /// Directory to clean
        #[arg(long, value_name = "DIR", default_value = ".")]
        dir: PathBuf,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// Global options shared by every handler.
pub struct Context {
    pub env_file: PathBuf,
    overrides: Overrides,
    retries: Option<u32>,
    retry_interval: Option<Duration>,
}

impl Context {
    fn from_cli(cli: &Cli) -> Self {
        let environment = cli
            .environment
            .clone()
            .or_else(|| std::env::var("NODE_ENV").ok());

        Self {
            env_file: cli.env_file.clone(),
            overrides: Overrides {
                addr: cli.addr.clone(),
                token: cli.token.clone(),
                mount: cli.mount.clone(),
                environment,
            },
            retries: cli.retries,
            retry_interval: cli.retry_interval_ms.map(Duration::from_millis),
        }
    }

    /// Read the configuration file.
    pub fn read_config(&self) -> Result<String> {
        read_config(&self.env_file)
    }

    /// Resolve settings, reading `VAULT_*` keys from the configuration file
    /// when it exists.
    pub fn settings(&self) -> Result<Settings> {
        let env = if self.env_file.exists() {
            Some(EnvFile::load(&self.env_file)?)
        } else {
            debug!(path = %self.env_file.display(), "no configuration file, using flags and defaults");
            None
        };
        Settings::resolve(&self.overrides, env.as_ref())
    }

    /// Resolve settings from already-read configuration text.
    pub fn settings_from(&self, text: &str) -> Result<Settings> {
        let env = EnvFile::parse(text, self.env_file.clone());
        Settings::resolve(&self.overrides, Some(&env))
    }

    /// Apply `--retries` and `--retry-interval-ms` over `default`.
    pub fn readiness(&self, default: Readiness) -> Readiness {
        Readiness {
            attempts: self.retries.unwrap_or(default.attempts),
            interval: self.retry_interval.unwrap_or(default.interval),
        }
    }
}

fn read_config(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| {
        ConfigError::ReadEnv {
            path: path.to_path_buf(),
            source,
        }
        .into()
    })
}

/// Execute a command.
pub fn execute(cli: Cli) -> Result<()> {
    let ctx = Context::from_cli(&cli);

    match cli.command {
        Command::Sync {
            dry_run,
            show_values,
        } => sync::sync(&ctx, dry_run, show_values),
        Command::Init {
            dry_run,
            show_values,
        } => sync::init(&ctx, dry_run, show_values),
        Command::Sections => sections::execute(&ctx),
        Command::Get {
            section,
            show_values,
        } => get::execute(&ctx, &section, show_values),
        Command::Status => status::execute(&ctx),
        Command::Cleanup { yes, dir } => cleanup::execute(&dir, yes),
        Command::Completions { shell } => completions::execute(shell),
    }
}
