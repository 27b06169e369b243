use crate::core::{ConfigProvider, Pipeline, Storage};
use crate::domain::model::{
    Grid, UnitFailure, ValidationOutcome, ValidationReport, Verdict, UNIT_COUNT,
};
use crate::utils::error::Result;
use crate::validator::coordinator::Coordinator;
use crate::validator::event::ValidationEvent;
use chrono::Utc;

pub struct GridPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> GridPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for GridPipeline<S, C> {
    async fn extract(&self) -> Result<Grid> {
        tracing::debug!("Reading grid from: {}", self.config.grid_path());
        let raw = self.storage.read_file(self.config.grid_path()).await?;

        let grid = Grid::parse(&raw)?;
        tracing::debug!("Parsed grid:\n{}", grid);
        Ok(grid)
    }

    async fn validate(&self, grid: Grid) -> Result<ValidationOutcome> {
        let coordinator = Coordinator::new(self.config.workers());
        tracing::debug!(
            "Dispatching {} units across {} workers",
            UNIT_COUNT,
            coordinator.workers()
        );

        let (event_tx, event_rx) = crossbeam_channel::unbounded();

        // external logging collaborator: drains observational events,
        // never feeds back into the verdict
        let event_logger = tokio::task::spawn_blocking(move || {
            for event in event_rx.iter() {
                match event {
                    ValidationEvent::UnitChecked { unit, ok } => {
                        tracing::debug!("Checked {}: {}", unit, if ok { "ok" } else { "invalid" });
                    }
                    ValidationEvent::ClassValidated(kind) => {
                        tracing::info!("{} valid.", kind.plural());
                    }
                    ValidationEvent::Finished(verdict) => {
                        tracing::debug!("Validation finished: {}", verdict);
                    }
                }
            }
        });

        let summary =
            tokio::task::spawn_blocking(move || coordinator.run(grid, event_tx)).await?;
        event_logger.await?;

        let failure = match summary.verdict {
            Verdict::Valid => None,
            Verdict::Invalid { unit, error } => Some(UnitFailure {
                unit,
                error,
                message: format!("{}: {}", unit, error),
            }),
        };

        let report = ValidationReport {
            valid: summary.verdict.is_valid(),
            failure,
            units_checked: summary.units_checked,
            workers: summary.workers,
            duration_ms: summary.elapsed.as_millis() as u64,
            completed_at: Utc::now(),
        };

        Ok(ValidationOutcome {
            verdict: summary.verdict,
            report,
        })
    }

    async fn report(&self, outcome: &ValidationOutcome) -> Result<String> {
        let report_path = format!("{}/report.json", self.config.output_path());

        let json = serde_json::to_string_pretty(&outcome.report)?;
        self.storage.write_file(&report_path, json.as_bytes()).await?;

        tracing::debug!("Report written to: {}", report_path);
        Ok(report_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{UnitError, UnitId, UnitKind};
    use crate::utils::error::ValidatorError;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    const SOLVED: &str =
        "534678912672195348198342567859761423426853791713924856961537284287419635345286179";

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
            }
        }

        async fn put_file(&self, path: &str, data: &[u8]) {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                ValidatorError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct MockConfig {
        grid_path: String,
        output_path: String,
        workers: usize,
    }

    impl MockConfig {
        fn new(grid_path: &str) -> Self {
            Self {
                grid_path: grid_path.to_string(),
                output_path: "test_output".to_string(),
                workers: 1,
            }
        }
    }

    impl ConfigProvider for MockConfig {
        fn grid_path(&self) -> &str {
            &self.grid_path
        }

        fn output_path(&self) -> &str {
            &self.output_path
        }

        fn workers(&self) -> usize {
            self.workers
        }
    }

    #[tokio::test]
    async fn test_extract_parses_a_stored_grid() {
        let storage = MockStorage::new();
        storage.put_file("grid.txt", SOLVED.as_bytes()).await;

        let pipeline = GridPipeline::new(storage, MockConfig::new("grid.txt"));
        let grid = pipeline.extract().await.unwrap();

        assert_eq!(grid.value(0, 0), 5);
        assert_eq!(grid.value(8, 8), 9);
    }

    #[tokio::test]
    async fn test_extract_rejects_short_input() {
        let storage = MockStorage::new();
        storage.put_file("grid.txt", &SOLVED.as_bytes()[..80]).await;

        let pipeline = GridPipeline::new(storage, MockConfig::new("grid.txt"));
        let error = pipeline.extract().await.unwrap_err();

        assert!(matches!(error, ValidatorError::ParseError(_)));
    }

    #[tokio::test]
    async fn test_extract_missing_file_is_an_io_error() {
        let pipeline = GridPipeline::new(MockStorage::new(), MockConfig::new("missing.txt"));
        let error = pipeline.extract().await.unwrap_err();

        assert!(matches!(error, ValidatorError::IoError(_)));
    }

    #[tokio::test]
    async fn test_validate_solved_grid() {
        let pipeline = GridPipeline::new(MockStorage::new(), MockConfig::new("grid.txt"));
        let grid = Grid::parse(SOLVED.as_bytes()).unwrap();

        let outcome = pipeline.validate(grid).await.unwrap();

        assert_eq!(outcome.verdict, Verdict::Valid);
        assert!(outcome.report.valid);
        assert!(outcome.report.failure.is_none());
        assert_eq!(outcome.report.units_checked, UNIT_COUNT);
        assert_eq!(outcome.report.workers, 1);
    }

    #[tokio::test]
    async fn test_validate_reports_the_failing_unit() {
        let pipeline = GridPipeline::new(MockStorage::new(), MockConfig::new("grid.txt"));
        let mut tampered = String::from(SOLVED);
        tampered.replace_range(0..1, "1");
        let grid = Grid::parse(tampered.as_bytes()).unwrap();

        let outcome = pipeline.validate(grid).await.unwrap();

        assert_eq!(
            outcome.verdict,
            Verdict::Invalid {
                unit: UnitId::new(UnitKind::Row, 0),
                error: UnitError::Duplicate(1),
            }
        );
        let failure = outcome.report.failure.unwrap();
        assert_eq!(failure.unit, UnitId::new(UnitKind::Row, 0));
        assert_eq!(failure.message, "row 0: digit 1 appears more than once");
    }

    #[tokio::test]
    async fn test_report_writes_json_to_storage() {
        let storage = MockStorage::new();
        let pipeline = GridPipeline::new(storage.clone(), MockConfig::new("grid.txt"));
        let grid = Grid::parse(SOLVED.as_bytes()).unwrap();

        let outcome = pipeline.validate(grid).await.unwrap();
        let report_path = pipeline.report(&outcome).await.unwrap();

        assert_eq!(report_path, "test_output/report.json");

        let stored = storage.get_file("test_output/report.json").await.unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&stored).unwrap();
        assert_eq!(parsed["valid"], serde_json::Value::Bool(true));
        assert_eq!(parsed["units_checked"], serde_json::json!(UNIT_COUNT));
        assert!(parsed["completed_at"].is_string());
    }
}
