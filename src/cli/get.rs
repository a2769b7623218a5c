//! Get command.

use crate::cli::{output, Context};
use crate::core::store;
use crate::error::{Error, Result};

/// Read one section back from the store.
pub fn execute(ctx: &Context, section: &str, show_values: bool) -> Result<()> {
    let settings = ctx.settings()?;
    let store = store::open(&settings, false)?;
    let key = section.to_lowercase();

    let Some(document) = store.get_secret(&settings.mount, &key)? else {
        return Err(Error::SectionNotFound {
            mount: settings.mount.clone(),
            key,
        });
    };

    output::header(&format!("{}/{}", settings.mount, key));
    output::dimmed(&format!("fingerprint {}", document.fingerprint()));
    for (field, value) in document.iter() {
        let shown = if show_values {
            value.to_string()
        } else {
            output::mask(value)
        };
        output::kv(&format!("{}:", output::key(field)), shown);
    }

    Ok(())
}
