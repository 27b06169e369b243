pub mod config;
pub mod core;
pub mod domain;
pub mod utils;
pub mod validator;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::config::cli::LocalStorage;
pub use crate::config::toml_config::TomlConfig;
pub use crate::core::engine::{RunOutcome, ValidationEngine};
pub use crate::core::pipeline::GridPipeline;
pub use crate::domain::model::{Grid, ParseError, UnitError, UnitId, UnitKind, Verdict};
pub use crate::utils::error::{Result, ValidatorError};
