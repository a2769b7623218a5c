//! Sections command.
//!
//! Shows what `sync` would publish without touching the store.

use crate::cli::{output, Context};
use crate::core::parser;
use crate::error::Result;

/// Preview parsed sections and skipped lines.
pub fn execute(ctx: &Context) -> Result<()> {
    let text = ctx.read_config()?;
    let parsed = parser::parse_sections(&text);

    if parsed.sections.is_empty() {
        output::warn(&format!(
            "no sections found in {}",
            ctx.env_file.display()
        ));
        output::hint("declare one with a header like: # :database - Database settings");
    }

    for section in &parsed.sections {
        let document = section.document();
        output::section(&format!(
            "{} ({} field{})",
            section.key,
            document.len(),
            if document.len() == 1 { "" } else { "s" }
        ));
        if !section.description.is_empty() {
            output::dimmed(&section.description);
        }
        for field in document.fields() {
            output::list_item(&output::key(field));
        }
    }

    if !parsed.notices.is_empty() {
        output::section("Skipped lines");
        for notice in &parsed.notices {
            output::warn(&notice.to_string());
        }
    }

    Ok(())
}
