use clap::Parser;
use sudoku_validator::core::engine::RunOutcome;
use sudoku_validator::core::ConfigProvider;
use sudoku_validator::utils::error::Result;
use sudoku_validator::utils::{logger, validation::Validate};
use sudoku_validator::{
    CliConfig, GridPipeline, LocalStorage, TomlConfig, ValidationEngine, ValidatorError,
};

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting sudoku-validator");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let result = match cli.config.clone() {
        Some(config_path) => match TomlConfig::from_file(&config_path) {
            Ok(config) => {
                let monitor = cli.monitor || config.monitoring_enabled();
                run(config, monitor).await
            }
            Err(e) => Err(e),
        },
        None => {
            let monitor = cli.monitor;
            run(cli, monitor).await
        }
    };

    match result {
        Ok(outcome) if outcome.verdict.is_valid() => {
            println!("✅ {}", outcome.verdict);
            println!("📁 Report saved to: {}", outcome.report_path);
        }
        Ok(outcome) => {
            eprintln!("❌ {}", outcome.verdict);
            std::process::exit(1);
        }
        Err(e) => {
            tracing::error!("Validation run failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(exit_code(&e));
        }
    }
}

async fn run<C>(config: C, monitor: bool) -> Result<RunOutcome>
where
    C: ConfigProvider + Validate + 'static,
{
    config.validate()?;

    if monitor {
        tracing::info!("🔍 System monitoring enabled");
    }

    let storage = LocalStorage::new(".".to_string());
    let pipeline = GridPipeline::new(storage, config);
    let engine = ValidationEngine::new_with_monitoring(pipeline, monitor);
    engine.run().await
}

fn exit_code(error: &ValidatorError) -> i32 {
    match error {
        ValidatorError::ParseError(_)
        | ValidatorError::ConfigFileError(_)
        | ValidatorError::InvalidConfigValueError { .. }
        | ValidatorError::MissingConfigError { .. } => 2,
        _ => 3,
    }
}
