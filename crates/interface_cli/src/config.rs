//! CLI configuration

use std::path::PathBuf;

use serde::Deserialize;

use crate::args::Cli;

/// CLI configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Ledger data file
    pub data_file: PathBuf,
    /// Directory receiving a backup of the data file before each save
    pub backup_dir: PathBuf,
    /// Log level
    pub log_level: String,
    /// Useful life used by `depreciate` when no `--life-years` is given
    pub depreciation_life_years: u32,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("ledger_data.json"),
            backup_dir: PathBuf::from("backups"),
            log_level: "info".to_string(),
            depreciation_life_years: 5,
        }
    }
}

impl CliConfig {
    /// Loads configuration from environment
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("LEDGER"))
            .build()?
            .try_deserialize()
    }

    /// Applies global command-line flags on top of the loaded values
    pub fn with_overrides(mut self, cli: &Cli) -> Self {
        if let Some(data_file) = &cli.data_file {
            self.data_file = data_file.clone();
        }
        if let Some(backup_dir) = &cli.backup_dir {
            self.backup_dir = backup_dir.clone();
        }
        if let Some(log_level) = &cli.log_level {
            self.log_level = log_level.clone();
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_defaults() {
        let config = CliConfig::default();
        assert_eq!(config.data_file, PathBuf::from("ledger_data.json"));
        assert_eq!(config.backup_dir, PathBuf::from("backups"));
        assert_eq!(config.depreciation_life_years, 5);
    }

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::try_parse_from([
            "ledger",
            "--data-file",
            "/tmp/books.json",
            "--log-level",
            "debug",
            "accounts",
        ])
        .unwrap();
        let config = CliConfig::default().with_overrides(&cli);

        assert_eq!(config.data_file, PathBuf::from("/tmp/books.json"));
        assert_eq!(config.backup_dir, PathBuf::from("backups"));
        assert_eq!(config.log_level, "debug");
    }
}
