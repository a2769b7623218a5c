//! Shared CLI output helpers.
//!
//! Color scheme (respects NO_COLOR):
//! - Green: success, checkmarks
//! - Red: errors
//! - Yellow: warnings
//! - Cyan: paths, commands, keys, hints
//! - Bold: headers, important values
//! - Dimmed: secondary info

use std::fmt::Display;

use console::{style, StyledObject};

const RULE_WIDTH: usize = 56;

/// Check if color output is disabled via NO_COLOR env var.
fn colors_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

/// Apply `f` only when colors are on.
fn paint<D>(value: D, f: impl FnOnce(StyledObject<D>) -> StyledObject<D>) -> String
where
    D: Display,
{
    if colors_enabled() {
        f(style(value)).to_string()
    } else {
        value.to_string()
    }
}

/// Print a success message with checkmark (green).
///
/// Example: `✓ database written`
pub fn success(msg: &str) {
    println!("{} {}", paint("✓", |s| s.green()), msg);
}

/// Print an error message to stderr (red).
///
/// Example: `✗ vault not ready after 3 attempt(s)`
pub fn error(msg: &str) {
    eprintln!("{} {}", paint("✗", |s| s.red()), msg);
}

/// Print a warning message (yellow).
///
/// Example: `⚠ line 4: KEY is outside any section`
pub fn warn(msg: &str) {
    println!("{} {}", paint("⚠", |s| s.yellow()), msg);
}

/// Print a hint message (cyan).
///
/// Example: `→ run thothix-vault init first`
pub fn hint(msg: &str) {
    println!("{} {}", paint("→", |s| s.cyan()), paint(msg, |s| s.cyan()));
}

/// Print a bold header.
pub fn header(title: &str) {
    println!("{}", paint(title, |s| s.bold()));
}

/// Print a key-value pair (label dimmed, value bold).
///
/// Example: `  mount:  thothix`
pub fn kv(label: &str, value: impl Display) {
    println!(
        "  {}  {}",
        paint(label, |s| s.dim()),
        paint(value.to_string(), |s| s.bold())
    );
}

/// Print a list item with bullet.
pub fn list_item(item: &str) {
    println!("  • {}", item);
}

/// Print a horizontal rule separator.
pub fn rule() {
    println!("{}", paint("─".repeat(RULE_WIDTH), |s| s.dim()));
}

/// Format a path string in cyan.
pub fn path(p: &str) -> String {
    paint(p, |s| s.cyan())
}

/// Format a command string in green.
pub fn cmd(c: &str) -> String {
    paint(c, |s| s.green())
}

/// Format a key name in cyan.
pub fn key(k: &str) -> String {
    paint(k, |s| s.cyan())
}

/// Print a dimmed/secondary message.
pub fn dimmed(msg: &str) {
    println!("{}", paint(msg, |s| s.dim()));
}

/// Print a section header with a separator line.
///
/// Example:
/// ```text
/// Sections
/// ────────────────────────────────────────────────────────
/// ```
pub fn section(title: &str) {
    println!();
    header(title);
    rule();
}

/// Mask a secret value. Lengths past eight characters are not revealed.
pub fn mask(value: &str) -> String {
    if value.is_empty() {
        String::new()
    } else {
        "•".repeat(value.chars().count().min(8))
    }
}
