use std::path::Path;

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

const DEFAULT_FILE: &str = "schedule_finder";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Slots covered by the positional fallback mapping.
    pub max_slots: u32,
    /// Shorter tables cannot hold both a header and data.
    pub min_table_rows: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            max_slots: 7,
            min_table_rows: 2,
        }
    }
}

impl Settings {
    /// Defaults, then a settings file, then `SCHEDULE_*` variables.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let defaults = Settings::default();
        let file = match path {
            Some(p) => File::from(p).required(true),
            None => File::with_name(DEFAULT_FILE).required(false),
        };

        Config::builder()
            .set_default("max_slots", i64::from(defaults.max_slots))?
            .set_default("min_table_rows", defaults.min_table_rows as i64)?
            .add_source(file)
            .add_source(Environment::with_prefix("SCHEDULE").try_parsing(true))
            .build()
            .context("loading settings")?
            .try_deserialize()
            .context("invalid settings")
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_document_layout() {
        let s = Settings::default();
        assert_eq!(s.max_slots, 7);
        assert_eq!(s.min_table_rows, 2);
    }

    #[test]
    fn explicit_file_overrides_defaults() {
        let s = Settings::load(Some(Path::new("tests/fixtures/settings.toml"))).unwrap();
        assert_eq!(s.max_slots, 8);
        assert_eq!(s.min_table_rows, 2);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        assert!(Settings::load(Some(Path::new("tests/fixtures/absent.toml"))).is_err());
    }
}
