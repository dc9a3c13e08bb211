pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use app::report::{OutputFormat, PlanReport};
pub use config::cli::LocalStorage;
pub use config::experiment::{ConfigFormat, ExperimentFile};
pub use self::core::{
    calculator::{calculate, calculate_checked, format_volume},
    engine::PlanEngine,
};
pub use domain::model::{
    CalculationResult, MasterMix, Primer, PrimersConfig, QpcrConfig, Recipe, Samples,
    WorkingSolution,
};
pub use utils::error::{QpcrError, Result};
