use crate::app::report::{OutputFormat, PlanReport};
use crate::config::experiment::{ConfigFormat, ExperimentFile};
use crate::core::calculator::{calculate, format_volume};
use crate::domain::model::QpcrConfig;
use crate::domain::ports::Storage;
use crate::utils::error::{QpcrError, Result};
use crate::utils::validation::Validate;

pub struct PlanEngine<S: Storage> {
    storage: S,
    strict: bool,
}

impl<S: Storage> PlanEngine<S> {
    pub fn new(storage: S, strict: bool) -> Self {
        Self { storage, strict }
    }

    pub async fn load(&self, path: &str) -> Result<ExperimentFile> {
        tracing::debug!("Loading experiment from {}", path);

        let bytes = self.storage.read_file(path).await?;
        let content = String::from_utf8(bytes).map_err(|e| QpcrError::ConfigError {
            message: format!("Experiment file '{}' is not valid UTF-8: {}", path, e),
        })?;

        ExperimentFile::from_str_with_format(&content, ConfigFormat::from_path(path))
    }

    pub fn plan(&self, file: ExperimentFile) -> Result<PlanReport> {
        if self.strict {
            file.validate()?;
            tracing::debug!("Experiment '{}' passed validation", file.name());
        }

        let result = calculate(file.config());
        tracing::info!(
            "Planned '{}': {} reactions, master mix {}, cDNA {}",
            file.name(),
            result.total_reactions,
            format_volume(result.master_mix.total_volume),
            format_volume(result.total_cdna_volume)
        );

        let name = file.name().to_string();
        Ok(PlanReport::new(name, file.into_config(), result))
    }

    /// Load, apply `overrides`, plan and render. The rendered report is also
    /// written to `output` when one is given.
    pub async fn run<F>(
        &self,
        path: &str,
        overrides: F,
        format: OutputFormat,
        output: Option<&str>,
    ) -> Result<String>
    where
        F: FnOnce(&mut QpcrConfig),
    {
        let mut file = self.load(path).await?;
        overrides(&mut file.config);

        let report = self.plan(file)?;
        let rendered = report.render(format)?;

        if let Some(output) = output {
            self.storage.write_file(output, rendered.as_bytes()).await?;
            tracing::info!("Report ({}) written to {}", format, output);
        }

        Ok(rendered)
    }
}
