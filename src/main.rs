//! Thothix Vault - publish sectioned `.env` files to Vault.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use thothix_vault::cli::output;
use thothix_vault::cli::{execute, Cli};
use thothix_vault::error::{ConfigError, Error, StoreError, SyncError};

fn main() {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_env("THOTHIX_VAULT_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("thothix_vault=debug")
        } else {
            EnvFilter::new("thothix_vault=warn")
        }
    });

    let registry = tracing_subscriber::registry().with(filter);
    if cli.log_json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .without_time()
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    if let Err(e) = execute(cli) {
        let suggestion = match &e {
            Error::Config(ConfigError::MissingToken) => {
                Some("set VAULT_ROOT_TOKEN or VAULT_APP_TOKEN in .env, or pass --token")
            }
            Error::Config(ConfigError::ReadEnv { .. }) => {
                Some("pass --env-file to point at your configuration")
            }
            Error::Sync(SyncError::Unreachable { .. }) => {
                Some("is Vault running and unsealed? check with: thothix-vault status")
            }
            Error::Store(StoreError::Auth { .. }) | Error::Sync(SyncError::Auth { .. }) => {
                Some("check the Vault token")
            }
            Error::SectionNotFound { .. } => {
                Some("run sync first, or list local sections with: thothix-vault sections")
            }
            Error::Sync(SyncError::SectionsFailed { .. }) => {
                Some("re-run sync once the failing sections are fixed")
            }
            _ => None,
        };

        output::error(&e.to_string());
        if let Some(hint) = suggestion {
            output::hint(hint);
        }
        std::process::exit(1);
    }
}
