//! Persisted calculator preferences.
//!
//! The selected auction, target margin, and the raw text of the last four
//! numeric inputs are kept in a small JSON file between runs. Writes replace
//! the whole record, so the last write wins. The calculation core never
//! reads this file; callers resolve preferences into explicit arguments.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::{Auction, TargetMargin};
use crate::error::{Error, Result};

/// Raw text of the last-entered inputs, parsed leniently on use.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SavedInputs {
    pub sell_price: String,
    pub repairs: String,
    pub towing: String,
    pub your_bid: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub auction: Option<Auction>,
    /// Stored unvalidated; see [`Preferences::margin`].
    pub target_margin: Option<Decimal>,
    pub inputs: SavedInputs,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Preferences {
    /// The saved margin, if present and within `[0, 1)`.
    #[must_use]
    pub fn margin(&self) -> Option<TargetMargin> {
        let ratio = self.target_margin?;
        match TargetMargin::try_new(ratio) {
            Ok(margin) => Some(margin),
            Err(e) => {
                warn!(error = %e, "ignoring saved target margin");
                None
            }
        }
    }

    pub fn set_margin(&mut self, margin: TargetMargin) {
        self.target_margin = Some(margin.ratio());
    }
}

/// JSON file holding one [`Preferences`] record.
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    path: PathBuf,
}

impl PreferenceStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read saved preferences.
    ///
    /// A missing file yields defaults. An unreadable record is discarded
    /// with a warning rather than failing the calculation.
    ///
    /// # Errors
    ///
    /// Returns an IO error if the file exists but cannot be read.
    pub fn load(&self) -> Result<Preferences> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no saved preferences");
                return Ok(Preferences::default());
            }
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str(&content) {
            Ok(prefs) => Ok(prefs),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "discarding unreadable preferences");
                Ok(Preferences::default())
            }
        }
    }

    /// Write the whole record, stamping `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be written.
    pub fn save(&self, prefs: &mut Preferences) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| Error::Preferences {
                path: self.path.clone(),
                reason: format!("cannot create directory: {e}"),
            })?;
        }

        prefs.updated_at = Some(Utc::now());
        let json = serde_json::to_string_pretty(prefs)?;
        fs::write(&self.path, json).map_err(|e| Error::Preferences {
            path: self.path.clone(),
            reason: format!("cannot write: {e}"),
        })?;

        debug!(path = %self.path.display(), "preferences saved");
        Ok(())
    }

    /// Delete saved preferences. Returns whether a file was removed.
    ///
    /// # Errors
    ///
    /// Returns an IO error if the file exists but cannot be removed.
    pub fn reset(&self) -> Result<bool> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn margin_outside_unit_interval_is_ignored() {
        let prefs = Preferences {
            target_margin: Some(dec!(1.5)),
            ..Preferences::default()
        };
        assert_eq!(prefs.margin(), None);
    }

    #[test]
    fn saved_margin_round_trips_through_setter() {
        let mut prefs = Preferences::default();
        prefs.set_margin(TargetMargin::try_new(dec!(0.15)).unwrap());
        assert_eq!(prefs.margin().map(TargetMargin::ratio), Some(dec!(0.15)));
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let prefs: Preferences = serde_json::from_str(r#"{"auction":"copart"}"#).unwrap();
        assert_eq!(prefs.auction, Some(Auction::Copart));
        assert_eq!(prefs.target_margin, None);
        assert_eq!(prefs.inputs, SavedInputs::default());
    }
}
