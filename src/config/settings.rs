//! User settings for finboard
//!
//! Stored as `config.json` in the base directory. Every field has a serde
//! default, so older or hand-edited files keep loading.

use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use std::path::PathBuf;

use super::paths::FinboardPaths;
use crate::error::{FinboardError, FinboardResult};
use crate::models::{BudgetThresholds, DEFAULT_NEARING_LIMIT_RATIO};
use crate::storage::file_io::{read_json, write_json_atomic};

/// User settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Symbol printed before amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// strftime format for dates in terminal output
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Usage ratio above which a budget is flagged as nearing its limit
    #[serde(default = "default_nearing_limit_ratio")]
    pub nearing_limit_ratio: f64,

    /// Dataset loaded when no `--data` is given
    #[serde(default)]
    pub default_dataset: Option<PathBuf>,

    /// Default number of rows in the transaction register
    #[serde(default = "default_register_limit")]
    pub register_limit: usize,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_nearing_limit_ratio() -> f64 {
    DEFAULT_NEARING_LIMIT_RATIO
}

fn default_register_limit() -> usize {
    20
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            nearing_limit_ratio: default_nearing_limit_ratio(),
            default_dataset: None,
            register_limit: default_register_limit(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or defaults if the file doesn't exist
    ///
    /// Nothing is written; the caller decides when to persist.
    pub fn load_or_create(paths: &FinboardPaths) -> FinboardResult<Self> {
        let settings: Settings = read_json(paths.settings_file())
            .map_err(|e| FinboardError::Config(format!("Failed to load settings: {}", e)))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check the values a hand-edited file could get wrong
    pub fn validate(&self) -> FinboardResult<()> {
        self.thresholds()?;
        check_date_format(&self.date_format)
    }

    pub fn save(&self, paths: &FinboardPaths) -> FinboardResult<()> {
        paths.ensure_directories()?;
        write_json_atomic(paths.settings_file(), self)
    }

    /// Budget thresholds, validated
    pub fn thresholds(&self) -> FinboardResult<BudgetThresholds> {
        BudgetThresholds::new(self.nearing_limit_ratio)
    }
}

/// Reject formats chrono cannot render for a plain date
///
/// Unknown specifiers parse to `Item::Error`; time-of-day specifiers parse
/// fine but fail when rendered, so a sample date is formatted as well.
fn check_date_format(format: &str) -> FinboardResult<()> {
    let invalid = || FinboardError::Config(format!("Invalid date format '{}'", format));

    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(invalid());
    }
    let sample = NaiveDate::from_ymd_opt(2023, 6, 1).ok_or_else(invalid)?;
    let mut rendered = String::new();
    write!(rendered, "{}", sample.format(format)).map_err(|_| invalid())?;
    Ok(())
}
