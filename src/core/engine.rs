use crate::core::Pipeline;
use crate::domain::model::Verdict;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

/// What a full engine run produced.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub verdict: Verdict,
    pub report_path: String,
}

/// Drives a pipeline through its three stages: parse, validate, report.
/// A run is single-shot; rerunning means building a new grid from input.
pub struct ValidationEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> ValidationEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(false),
        }
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub async fn run(&self) -> Result<RunOutcome> {
        tracing::info!("Starting grid validation...");

        tracing::info!("Parsing grid...");
        let grid = self.pipeline.extract().await?;
        self.monitor.log_stats("parse");

        tracing::info!("Validating units...");
        let outcome = self.pipeline.validate(grid).await?;
        self.monitor.log_stats("validate");

        tracing::info!("Writing report...");
        let report_path = self.pipeline.report(&outcome).await?;
        self.monitor.log_stats("report");
        self.monitor.log_final_stats();

        tracing::info!("{}", outcome.verdict);

        Ok(RunOutcome {
            verdict: outcome.verdict,
            report_path,
        })
    }
}
