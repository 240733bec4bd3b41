//! Path utilities for maxbid.
//!
//! All data lives under `~/.maxbid/`:
//! - `~/.maxbid/config.toml` - optional configuration
//! - `~/.maxbid/preferences.json` - saved auction, margin, and inputs

use std::path::PathBuf;

/// Returns the maxbid home directory (`~/.maxbid/`).
pub fn home_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".maxbid")
}

/// Returns the default config file path (`~/.maxbid/config.toml`).
pub fn default_config() -> PathBuf {
    home_dir().join("config.toml")
}

/// Returns the default preferences file path (`~/.maxbid/preferences.json`).
pub fn default_preferences() -> PathBuf {
    home_dir().join("preferences.json")
}
