pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::domain::model::UNIT_COUNT;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_range, validate_required_field, Validate,
};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "sudoku-validator")]
#[command(about = "Validates a completed 9x9 sudoku grid")]
pub struct CliConfig {
    /// Grid file: 81 digits 1-9 in row order, any other bytes are separators
    #[arg(required_unless_present = "config")]
    pub grid_file: Option<String>,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    /// Worker threads for unit checks (0 = one per CPU)
    #[arg(long, default_value = "0")]
    pub workers: usize,

    /// Read settings from a TOML file instead of CLI flags
    #[arg(long)]
    pub config: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log process statistics per phase")]
    pub monitor: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn grid_path(&self) -> &str {
        self.grid_file.as_deref().unwrap_or_default()
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn workers(&self) -> usize {
        self.workers
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        let grid_file = validate_required_field("grid_file", &self.grid_file)?;
        validate_non_empty_string("grid_file", grid_file)?;
        validate_path("grid_file", grid_file)?;
        validate_path("output_path", &self.output_path)?;
        validate_range("workers", self.workers, 0, UNIT_COUNT)?;
        Ok(())
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    fn base_config() -> CliConfig {
        CliConfig {
            grid_file: Some("grid.txt".to_string()),
            output_path: "./output".to_string(),
            workers: 0,
            config: None,
            verbose: false,
            monitor: false,
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn test_missing_grid_file_fails() {
        let mut config = base_config();
        config.grid_file = None;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_too_many_workers_fails() {
        let mut config = base_config();
        config.workers = UNIT_COUNT + 1;
        assert!(config.validate().is_err());
    }
}
