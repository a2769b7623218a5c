//! Sync and init commands.

use chrono::Local;
use tracing::debug;

use crate::cli::{output, Context};
use crate::core::domain::{IssuedToken, SectionOutcome, SectionReport, SyncReport};
use crate::core::store;
use crate::core::sync::{self as engine, Readiness, SyncOptions};
use crate::error::{Result, SyncError};

/// Publish every section without bootstrapping.
pub fn sync(ctx: &Context, dry_run: bool, show_values: bool) -> Result<()> {
    run(ctx, false, dry_run, show_values)
}

/// Bootstrap the store, then publish every section.
pub fn init(ctx: &Context, dry_run: bool, show_values: bool) -> Result<()> {
    run(ctx, true, dry_run, show_values)
}

fn run(ctx: &Context, bootstrap: bool, dry_run: bool, show_values: bool) -> Result<()> {
    let text = ctx.read_config()?;
    let settings = ctx.settings_from(&text)?;
    let store = store::open(&settings, dry_run)?;

    let (options, readiness) = if bootstrap {
        (
            SyncOptions::init(settings.environment.clone()),
            Readiness::for_init(),
        )
    } else {
        (
            SyncOptions::sync(settings.environment.clone()),
            Readiness::for_sync(),
        )
    };
    let options = options.with_readiness(ctx.readiness(readiness));
    debug!(?options, "sync options");

    output::header(if bootstrap {
        "Initializing Vault"
    } else {
        "Syncing to Vault"
    });
    output::kv("file:", output::path(&ctx.env_file.display().to_string()));
    if dry_run {
        output::kv("store:", "in-memory (dry run)");
    } else {
        output::kv("addr:", &settings.addr);
    }
    output::kv("mount:", &settings.mount);
    output::kv("environment:", &settings.environment);

    let report = engine::sync(&*store, &text, &settings.mount, &options)?;

    if let Some(tokens) = &report.tokens {
        output::section("Tokens");
        print_token("app", &tokens.app);
        print_token("readonly", &tokens.readonly);
        println!();
        output::warn("each init mints new tokens; earlier ones stay valid until they expire or are revoked");
        output::hint(&format!(
            "add to {}: {}",
            ctx.env_file.display(),
            output::cmd(&format!("VAULT_APP_TOKEN={}", tokens.app.expose()))
        ));
    }

    print_report(&report, show_values);

    if report.sections.is_empty() {
        output::warn(&format!(
            "no sections found in {}",
            ctx.env_file.display()
        ));
        output::hint("declare one with a header like: # :database - Database settings");
        return Ok(());
    }

    if !report.is_success() {
        return Err(SyncError::SectionsFailed {
            failed: report.write_failures(),
            total: report.sections.len(),
        }
        .into());
    }

    Ok(())
}

fn print_token(label: &str, token: &IssuedToken) {
    let expires = chrono::Duration::from_std(token.ttl)
        .ok()
        .map(|ttl| (Local::now() + ttl).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "unknown".to_string());

    output::kv(&format!("{}:", label), token.expose());
    output::dimmed(&format!(
        "    policy {}, {}, expires {}",
        token.policy, token.display_name, expires
    ));
}

fn print_report(report: &SyncReport, show_values: bool) {
    output::section("Sections");
    for section in &report.sections {
        print_section(section, show_values);
    }

    println!();
    let summary = format!(
        "{} written, {} failed, {} unverified",
        report.written(),
        report.write_failures(),
        report.verify_failures()
    );
    if report.is_success() && report.verify_failures() == 0 {
        output::success(&summary);
    } else if report.is_success() {
        output::warn(&summary);
    } else {
        output::error(&summary);
    }
}

fn print_section(section: &SectionReport, show_values: bool) {
    let label = format!(
        "{} ({} field{})",
        output::key(&section.key),
        section.fields,
        if section.fields == 1 { "" } else { "s" }
    );

    match &section.outcome {
        SectionOutcome::Written { version } => {
            let version = version
                .map(|v| format!(", version {}", v))
                .unwrap_or_default();
            output::success(&format!("{}{}", label, version));
        }
        SectionOutcome::WriteFailed(reason) => {
            output::error(&format!("{}: write failed: {}", label, reason));
        }
        SectionOutcome::VerifyFailed(reason) => {
            output::warn(&format!("{}: verification failed: {}", label, reason));
        }
    }

    if !section.description.is_empty() {
        output::dimmed(&format!("    {}", section.description));
    }

    if let Some(stored) = &section.stored {
        output::dimmed(&format!("    fingerprint {}", stored.fingerprint()));
        for (field, value) in stored.iter() {
            let shown = if show_values {
                value.to_string()
            } else {
                output::mask(value)
            };
            output::list_item(&format!("{} = {}", field, shown));
        }
    }
}
