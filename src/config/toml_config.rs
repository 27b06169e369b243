use crate::core::ConfigProvider;
use crate::domain::model::UNIT_COUNT;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_range, Validate,
};
use serde::{Deserialize, Serialize};

const DEFAULT_OUTPUT_PATH: &str = "./output";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub pipeline: PipelineConfig,
    pub input: InputConfig,
    pub validation: Option<ValidationConfig>,
    pub output: Option<OutputConfig>,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub grid_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: Option<bool>,
}

impl TomlConfig {
    pub fn from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: TomlConfig = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring
            .as_ref()
            .and_then(|monitoring| monitoring.enabled)
            .unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn grid_path(&self) -> &str {
        &self.input.grid_path
    }

    fn output_path(&self) -> &str {
        self.output
            .as_ref()
            .and_then(|output| output.path.as_deref())
            .unwrap_or(DEFAULT_OUTPUT_PATH)
    }

    fn workers(&self) -> usize {
        self.validation
            .as_ref()
            .and_then(|validation| validation.workers)
            .unwrap_or(0)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("pipeline.name", &self.pipeline.name)?;
        validate_path("input.grid_path", &self.input.grid_path)?;

        if let Some(validation) = &self.validation {
            if let Some(workers) = validation.workers {
                validate_range("validation.workers", workers, 0, UNIT_COUNT)?;
            }
        }

        if let Some(output) = &self.output {
            if let Some(path) = &output.path {
                validate_path("output.path", path)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        [pipeline]
        name = "nightly-check"
        description = "validate the nightly puzzle export"

        [input]
        grid_path = "puzzles/solved.txt"

        [validation]
        workers = 4

        [output]
        path = "./reports"

        [monitoring]
        enabled = true
    "#;

    #[test]
    fn test_parse_full_config() {
        let config: TomlConfig = toml::from_str(SAMPLE).unwrap();
        assert_eq!(config.pipeline.name, "nightly-check");
        assert_eq!(config.grid_path(), "puzzles/solved.txt");
        assert_eq!(config.workers(), 4);
        assert_eq!(config.output_path(), "./reports");
        assert!(config.monitoring_enabled());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_optional_tables_fall_back_to_defaults() {
        let minimal = r#"
            [pipeline]
            name = "minimal"

            [input]
            grid_path = "grid.txt"
        "#;

        let config: TomlConfig = toml::from_str(minimal).unwrap();
        assert_eq!(config.workers(), 0);
        assert_eq!(config.output_path(), DEFAULT_OUTPUT_PATH);
        assert!(!config.monitoring_enabled());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_out_of_range_workers_fails_validation() {
        let mut config: TomlConfig = toml::from_str(SAMPLE).unwrap();
        config.validation = Some(ValidationConfig {
            workers: Some(UNIT_COUNT + 1),
        });
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_pipeline_name_fails_validation() {
        let mut config: TomlConfig = toml::from_str(SAMPLE).unwrap();
        config.pipeline.name = "  ".to_string();
        assert!(config.validate().is_err());
    }
}
