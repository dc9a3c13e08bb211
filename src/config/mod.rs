pub mod cli;
pub mod experiment;

#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::domain::model::{QpcrConfig, MAX_REPEAT};
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "qpcr-plan")]
#[command(about = "Plan qPCR working solution and master mix volumes")]
pub struct CliConfig {
    /// Experiment file (.toml or .json)
    #[arg(short, long, default_value = "experiment.toml")]
    pub config: String,

    /// Replace the targets listed in the experiment file
    #[arg(long, value_delimiter = ',')]
    pub targets: Vec<String>,

    /// Replace the groups listed in the experiment file
    #[arg(long, value_delimiter = ',')]
    pub groups: Vec<String>,

    /// Replace the technical replicate count
    #[arg(long)]
    pub repeat: Option<usize>,

    /// Report format: table, json or csv
    #[arg(short, long, default_value = "table")]
    pub format: String,

    /// Write the report to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<String>,

    /// Reject empty targets/groups, zero repeats and negative volumes
    #[arg(long)]
    pub strict: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    pub fn apply_overrides(&self, config: &mut QpcrConfig) {
        if !self.targets.is_empty() {
            tracing::debug!("Overriding targets with {:?}", self.targets);
            config.samples.targets = self.targets.clone();
        }
        if !self.groups.is_empty() {
            tracing::debug!("Overriding groups with {:?}", self.groups);
            config.samples.groups = self.groups.clone();
        }
        if let Some(repeat) = self.repeat {
            tracing::debug!("Overriding repeat with {}", repeat);
            config.samples.repeat = repeat;
        }
    }
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn config_path(&self) -> &str {
        &self.config
    }

    fn output_path(&self) -> Option<&str> {
        self.output.as_deref()
    }

    fn format(&self) -> &str {
        &self.format
    }

    fn strict(&self) -> bool {
        self.strict
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("config", &self.config)?;
        if let Some(output) = &self.output {
            validation::validate_path("output", output)?;
        }
        if let Some(repeat) = self.repeat {
            validation::validate_range("repeat", repeat, 1, MAX_REPEAT)?;
        }
        self.format.parse::<crate::app::report::OutputFormat>()?;
        Ok(())
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;
    use crate::domain::model::{Primer, PrimersConfig, Recipe, Samples};

    fn qpcr_config() -> QpcrConfig {
        QpcrConfig {
            samples: Samples {
                targets: vec!["GeneA".to_string()],
                repeat: 3,
                groups: vec!["Control".to_string()],
            },
            recipe: Recipe {
                mix: 10.0,
                primers: 1.0,
                cdna: 2.0,
                water: 6.0,
            },
            primers: PrimersConfig {
                forward: Primer {
                    name: "F1".to_string(),
                    concentration: 10.0,
                },
                reverse: Primer {
                    name: "R1".to_string(),
                    concentration: 10.0,
                },
            },
        }
    }

    #[test]
    fn test_parse_defaults() {
        let cli = CliConfig::try_parse_from(["qpcr-plan"]).unwrap();
        assert_eq!(cli.config_path(), "experiment.toml");
        assert_eq!(ConfigProvider::format(&cli), "table");
        assert!(cli.output_path().is_none());
        assert!(!cli.strict());
        assert!(cli.validate().is_ok());
    }

    #[test]
    fn test_overrides() {
        let cli = CliConfig::try_parse_from([
            "qpcr-plan",
            "--targets",
            "GeneX,GeneY",
            "--groups",
            "A,B,C",
            "--repeat",
            "4",
        ])
        .unwrap();

        let mut config = qpcr_config();
        cli.apply_overrides(&mut config);
        assert_eq!(config.samples.targets, vec!["GeneX", "GeneY"]);
        assert_eq!(config.samples.groups, vec!["A", "B", "C"]);
        assert_eq!(config.samples.total_reactions(), 24);
    }

    #[test]
    fn test_no_overrides_keeps_file_values() {
        let cli = CliConfig::try_parse_from(["qpcr-plan", "-c", "panel.json"]).unwrap();
        let mut config = qpcr_config();
        cli.apply_overrides(&mut config);
        assert_eq!(config, qpcr_config());
    }

    #[test]
    fn test_invalid_cli_values() {
        let cli = CliConfig::try_parse_from(["qpcr-plan", "--repeat", "0"]).unwrap();
        assert!(cli.validate().is_err());

        let cli = CliConfig::try_parse_from(["qpcr-plan", "--repeat", "10001"]).unwrap();
        assert!(cli.validate().is_err());

        let cli = CliConfig::try_parse_from(["qpcr-plan", "--format", "xlsx"]).unwrap();
        assert!(cli.validate().is_err());
    }
}
