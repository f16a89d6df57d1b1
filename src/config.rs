//! Display configuration
//!
//! Options are read, in order of precedence, from an explicit
//! [`DisplayConfig`], a TOML file, or `KADRO_*` environment variables.
//! A process-wide default is used by the `Display` impls of `Table` and
//! `Frame`.

use std::path::Path;
use std::sync::RwLock;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Rendering options for tables and frames
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Maximum number of rows rendered before the output is truncated
    pub max_rows: usize,
    /// Digits after the decimal point for Float64 cells
    pub float_precision: usize,
    /// Minimum width of each rendered column
    pub column_width: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            max_rows: 10,
            float_precision: 3,
            column_width: 12,
        }
    }
}

lazy_static! {
    static ref GLOBAL_DISPLAY: RwLock<DisplayConfig> = RwLock::new(DisplayConfig::default());
}

impl DisplayConfig {
    /// Parse a TOML document. Missing keys take their default.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: DisplayConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Defaults overridden by `KADRO_MAX_ROWS`, `KADRO_FLOAT_PRECISION` and
    /// `KADRO_COLUMN_WIDTH`
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        if let Some(v) = read_env_usize("KADRO_MAX_ROWS")? {
            config.max_rows = v;
        }
        if let Some(v) = read_env_usize("KADRO_FLOAT_PRECISION")? {
            config.float_precision = v;
        }
        if let Some(v) = read_env_usize("KADRO_COLUMN_WIDTH")? {
            config.column_width = v;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_rows == 0 {
            return Err(Error::Config("max_rows must be greater than 0".to_string()));
        }
        if self.column_width < 4 {
            return Err(Error::Config(format!(
                "column_width must be at least 4, got {}",
                self.column_width
            )));
        }
        Ok(())
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| Error::Config(e.to_string()))
    }
}

fn read_env_usize(key: &str) -> Result<Option<usize>> {
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<usize>()
            .map(Some)
            .map_err(|e| Error::Config(format!("{}: {}", key, e))),
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(Error::Config(format!("{}: {}", key, e))),
    }
}

/// Current process-wide display configuration
pub fn global() -> DisplayConfig {
    GLOBAL_DISPLAY
        .read()
        .map(|config| config.clone())
        .unwrap_or_default()
}

/// Replace the process-wide display configuration
pub fn set_global(config: DisplayConfig) -> Result<()> {
    config.validate()?;
    let mut guard = GLOBAL_DISPLAY
        .write()
        .map_err(|_| Error::Config("display configuration lock poisoned".to_string()))?;
    log::debug!("display configuration updated: {:?}", config);
    *guard = config;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = DisplayConfig::from_toml_str("max_rows = 25").unwrap();
        assert_eq!(config.max_rows, 25);
        assert_eq!(config.float_precision, 3);
        assert_eq!(config.column_width, 12);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            DisplayConfig::from_toml_str("max_rows = 0"),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            DisplayConfig::from_toml_str("column_width = 2"),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            DisplayConfig::from_toml_str("max_rows = \"ten\""),
            Err(Error::Toml(_))
        ));
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = DisplayConfig {
            max_rows: 4,
            float_precision: 1,
            column_width: 8,
        };
        let text = config.to_toml_string().unwrap();
        assert_eq!(DisplayConfig::from_toml_str(&text).unwrap(), config);
    }
}
