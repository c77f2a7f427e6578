//! Persistent CLI settings.
//!
//! Read from `<config_dir>/pillar/config.toml`, or from the file given with
//! `--config`. Every field is optional in the file.

use std::path::{Path, PathBuf};

use pillar_curves::bootstrap::BootstrapConfig;
use serde::{Deserialize, Serialize};

use crate::cli::OutputFormat;
use crate::error::{CliError, CliResult};

/// Default number of decimals in table output.
pub const DEFAULT_PRECISION: usize = 8;

/// All CLI settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Bootstrap bracket, tolerance, budget and method.
    pub bootstrap: BootstrapConfig,
    /// Output preferences.
    pub output: OutputSettings,
}

/// Output preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Format used when `--format` is not given.
    pub format: OutputFormat,
    /// Decimals shown in tables.
    pub precision: usize,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            format: OutputFormat::Table,
            precision: DEFAULT_PRECISION,
        }
    }
}

impl Settings {
    /// Location of the user's settings file.
    pub fn default_path() -> CliResult<PathBuf> {
        let base = dirs::config_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| CliError::Config("could not determine config directory".into()))?;
        Ok(base.join("pillar").join("config.toml"))
    }

    /// Resolves the settings file: the explicit path, else the default one.
    pub fn resolve_path(explicit: Option<&Path>) -> CliResult<PathBuf> {
        match explicit {
            Some(path) => Ok(path.to_path_buf()),
            None => Self::default_path(),
        }
    }

    /// Loads settings.
    ///
    /// An explicit path must exist; a missing default file means defaults.
    pub fn load(explicit: Option<&Path>) -> CliResult<Self> {
        let path = Self::resolve_path(explicit)?;
        if explicit.is_none() && !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)?;
        let settings = Self::from_toml(&content)
            .map_err(|e| CliError::Config(format!("{}: {e}", path.display())))?;
        Ok(settings)
    }

    /// Parses and validates settings from TOML text.
    pub fn from_toml(content: &str) -> CliResult<Self> {
        let settings: Self =
            toml::from_str(content).map_err(|e| CliError::Config(e.to_string()))?;
        settings
            .bootstrap
            .validate()
            .map_err(|e| CliError::Config(e.to_string()))?;
        Ok(settings)
    }

    /// Renders settings as TOML.
    pub fn to_toml(&self) -> CliResult<String> {
        toml::to_string_pretty(self).map_err(|e| CliError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pillar_curves::bootstrap::RootMethod;

    #[test]
    fn test_partial_file() {
        let settings = Settings::from_toml(
            r#"
            [bootstrap]
            upper = 2.0
            method = "hybrid"

            [output]
            precision = 4
            "#,
        )
        .unwrap();

        assert_eq!(settings.bootstrap.lower, -1.0);
        assert_eq!(settings.bootstrap.upper, 2.0);
        assert_eq!(settings.bootstrap.method, RootMethod::Hybrid);
        assert_eq!(settings.output.precision, 4);
        assert_eq!(settings.output.format, OutputFormat::Table);
    }

    #[test]
    fn test_invalid_bracket_rejected() {
        let result = Settings::from_toml("[bootstrap]\nlower = 3.0\nupper = 1.0\n");
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn test_toml_round_trip() {
        let settings = Settings::default();
        let text = settings.to_toml().unwrap();

        assert!(text.contains("[bootstrap]"));
        assert!(text.contains("[output]"));
        assert_eq!(Settings::from_toml(&text).unwrap(), settings);
    }

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(Settings::from_toml("").unwrap(), Settings::default());
    }
}
