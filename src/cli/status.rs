//! Status command.

use tracing::info;

use crate::cli::{output, Context};
use crate::core::store;
use crate::core::sync::Readiness;
use crate::error::{Result, SyncError};

/// Probe the store once, or as often as `--retries` allows.
pub fn execute(ctx: &Context) -> Result<()> {
    let settings = ctx.settings()?;
    let store = store::open(&settings, false)?;
    let readiness = ctx.readiness(Readiness {
        attempts: 1,
        ..Readiness::for_sync()
    });

    output::kv("addr:", &settings.addr);
    output::kv("mount:", &settings.mount);
    if let Some(source) = settings.token_source() {
        output::kv("token:", source);
    }

    if !readiness.wait(&*store) {
        return Err(SyncError::Unreachable {
            attempts: readiness.attempts.max(1),
        }
        .into());
    }
    output::success("vault is ready");

    if store.mount_exists(&settings.mount) {
        output::success(&format!("mount {} exists", output::key(&settings.mount)));
    } else {
        info!(mount = %settings.mount, "mount missing or not visible to this token");
        output::warn(&format!(
            "mount {} not found (or not visible to this token)",
            output::key(&settings.mount)
        ));
        output::hint(&format!("run: {}", output::cmd("thothix-vault init")));
    }

    Ok(())
}
