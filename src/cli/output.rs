//! CLI output formatting.
//!
//! Human-readable output uses colored symbols and aligned label/value
//! fields; `--json` switches every command to a single JSON document on
//! stdout. Quiet mode suppresses everything but warnings and errors.

use std::fmt::Display;
use std::sync::{OnceLock, RwLock};

use owo_colors::OwoColorize;
use serde_json::json;

/// Runtime output configuration shared by CLI handlers.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputConfig {
    /// Emit machine-readable JSON output instead of human-readable text.
    pub json: bool,
    /// Suppress non-essential output.
    pub quiet: bool,
    /// Emit ANSI colors.
    pub color: bool,
}

impl OutputConfig {
    #[must_use]
    pub const fn new(json: bool, quiet: bool, color: bool) -> Self {
        Self { json, quiet, color }
    }
}

static OUTPUT_CONFIG: OnceLock<RwLock<OutputConfig>> = OnceLock::new();

fn config_cell() -> &'static RwLock<OutputConfig> {
    OUTPUT_CONFIG.get_or_init(|| RwLock::new(OutputConfig::default()))
}

fn read_config() -> OutputConfig {
    match config_cell().read() {
        Ok(config) => *config,
        Err(poisoned) => *poisoned.into_inner(),
    }
}

fn write_config(config: OutputConfig) {
    match config_cell().write() {
        Ok(mut current) => *current = config,
        Err(poisoned) => *poisoned.into_inner() = config,
    }
}

/// Check if regular (non-JSON) output should be suppressed.
fn regular_output_suppressed(config: OutputConfig) -> bool {
    config.json || config.quiet
}

/// Apply `paint` only when colors are enabled.
fn paint(text: &str, painter: impl FnOnce(&str) -> String) -> String {
    if read_config().color {
        painter(text)
    } else {
        text.to_string()
    }
}

/// Apply output settings from global CLI flags.
pub fn configure(config: OutputConfig) {
    write_config(config);
}

#[must_use]
pub fn is_json() -> bool {
    read_config().json
}

/// Print the application header with name and version.
pub fn header(version: &str) {
    if regular_output_suppressed(read_config()) {
        return;
    }

    println!(
        "{} {}",
        paint("maxbid", |s| s.bold().to_string()),
        paint(version, |s| s.dimmed().to_string())
    );
}

/// Print a labeled value.
pub fn field(label: &str, value: impl Display) {
    if regular_output_suppressed(read_config()) {
        return;
    }

    let label = format!("{label:<14}");
    println!("  {} {}", paint(&label, |s| s.dimmed().to_string()), value);
}

/// Print a success line.
pub fn success(message: &str) {
    if regular_output_suppressed(read_config()) {
        return;
    }

    println!("  {} {}", paint("✓", |s| s.green().to_string()), message);
}

/// Print a warning line. Shown in quiet mode; goes to stderr in JSON mode.
pub fn warning(message: &str) {
    if read_config().json {
        eprintln!(
            "{}",
            json!({ "type": "warning", "payload": { "message": message } })
        );
        return;
    }

    println!("  {} {}", paint("⚠", |s| s.yellow().to_string()), message);
}

/// Print an error line to stderr.
pub fn error(message: &str) {
    if read_config().json {
        eprintln!(
            "{}",
            json!({ "type": "error", "payload": { "message": message } })
        );
        return;
    }

    eprintln!("  {} {}", paint("×", |s| s.red().to_string()), message);
}

/// Print a section header.
pub fn section(title: &str) {
    if regular_output_suppressed(read_config()) {
        return;
    }

    println!();
    println!("{}", paint(title, |s| s.bold().to_string()));
}

/// Print a note.
pub fn note(message: &str) {
    if regular_output_suppressed(read_config()) {
        return;
    }

    println!("  {}", paint(message, |s| s.dimmed().to_string()));
}

/// Print a hint with "hint:" prefix.
pub fn hint(message: &str) {
    if regular_output_suppressed(read_config()) {
        return;
    }

    println!(
        "  {}: {}",
        paint("hint", |s| s.cyan().dimmed().to_string()),
        paint(message, |s| s.dimmed().to_string())
    );
}

/// Print multiple lines of content, each indented.
pub fn lines(content: &str) {
    if regular_output_suppressed(read_config()) {
        return;
    }

    for line in content.lines() {
        println!("  {line}");
    }
}

/// Emit a JSON document (only in JSON mode).
pub fn json_output(value: serde_json::Value) {
    if read_config().json {
        println!("{value}");
    }
}

/// Format a positive value in green.
#[must_use]
pub fn positive(value: impl Display) -> String {
    paint(&value.to_string(), |s| s.green().to_string())
}

/// Format a negative value in red.
#[must_use]
pub fn negative(value: impl Display) -> String {
    paint(&value.to_string(), |s| s.red().to_string())
}

/// Green for non-negative amounts, red for losses.
#[must_use]
pub fn signed(value: impl Display, is_negative: bool) -> String {
    if is_negative {
        negative(value)
    } else {
        positive(value)
    }
}

/// Format a highlighted value in cyan.
#[must_use]
pub fn highlight(value: impl Display) -> String {
    paint(&value.to_string(), |s| s.cyan().bold().to_string())
}

/// Format a dimmed/muted value.
#[must_use]
pub fn muted(value: impl Display) -> String {
    paint(&value.to_string(), |s| s.dimmed().to_string())
}
