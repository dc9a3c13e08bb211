use crate::core::calculator::format_volume;
use crate::domain::model::{CalculationResult, QpcrConfig};
use crate::utils::error::{QpcrError, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt::{self, Write as _};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

impl FromStr for OutputFormat {
    type Err = QpcrError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "table" | "text" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            other => Err(QpcrError::InvalidConfigValueError {
                field: "format".to_string(),
                value: other.to_string(),
                reason: "Unsupported format. Valid formats: table, json, csv".to_string(),
            }),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

/// A calculated plan together with the inputs it came from.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanReport {
    pub experiment: String,
    pub generated_at: DateTime<Utc>,
    pub config: QpcrConfig,
    pub result: CalculationResult,
}

#[derive(Serialize)]
struct CsvRow<'a> {
    scope: &'a str,
    target: &'a str,
    mix: f64,
    #[serde(rename = "forwardPrimer")]
    forward_primer: f64,
    #[serde(rename = "reversePrimer")]
    reverse_primer: f64,
    water: f64,
    #[serde(rename = "totalVolume")]
    total_volume: f64,
}

impl PlanReport {
    pub fn new(experiment: impl Into<String>, config: QpcrConfig, result: CalculationResult) -> Self {
        Self {
            experiment: experiment.into(),
            generated_at: Utc::now(),
            config,
            result,
        }
    }

    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Table => Ok(self.render_table()),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(self)?),
            OutputFormat::Csv => self.render_csv(),
        }
    }

    fn render_table(&self) -> String {
        let samples = &self.config.samples;
        let primers = &self.config.primers;
        let result = &self.result;
        let mut out = String::new();

        // writing into a String cannot fail
        let _ = writeln!(out, "qPCR plan: {}", self.experiment);
        let _ = writeln!(
            out,
            "Generated: {}",
            self.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        );
        let _ = writeln!(
            out,
            "Reactions: {} per target x {} targets = {}",
            samples.reactions_per_target(),
            samples.targets.len(),
            result.total_reactions
        );
        let _ = writeln!(
            out,
            "Primers: {} ({} uM) / {} ({} uM)",
            primers.forward.name,
            primers.forward.concentration,
            primers.reverse.name,
            primers.reverse.concentration
        );

        for target in samples.distinct_targets() {
            if let Some(ws) = result.working_solution(target) {
                let _ = writeln!(out);
                let _ = writeln!(out, "Working solution [{}]", target);
                write_volume_rows(
                    &mut out,
                    ws.mix,
                    ws.forward_primer,
                    ws.reverse_primer,
                    ws.water,
                    ws.total_volume,
                );
            }
        }

        let mm = &result.master_mix;
        let _ = writeln!(out);
        let _ = writeln!(out, "Master mix");
        write_volume_rows(
            &mut out,
            mm.mix,
            mm.forward_primer,
            mm.reverse_primer,
            mm.water,
            mm.total_volume,
        );

        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "Total cDNA: {}",
            format_volume(result.total_cdna_volume)
        );
        out
    }

    fn render_csv(&self) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());

        for target in self.config.samples.distinct_targets() {
            if let Some(ws) = self.result.working_solution(target) {
                writer.serialize(CsvRow {
                    scope: "working_solution",
                    target,
                    mix: ws.mix,
                    forward_primer: ws.forward_primer,
                    reverse_primer: ws.reverse_primer,
                    water: ws.water,
                    total_volume: ws.total_volume,
                })?;
            }
        }

        let mm = &self.result.master_mix;
        writer.serialize(CsvRow {
            scope: "master_mix",
            target: "",
            mix: mm.mix,
            forward_primer: mm.forward_primer,
            reverse_primer: mm.reverse_primer,
            water: mm.water,
            total_volume: mm.total_volume,
        })?;

        let bytes = writer
            .into_inner()
            .map_err(|e| QpcrError::IoError(std::io::Error::new(e.error().kind(), e.to_string())))?;
        String::from_utf8(bytes).map_err(|e| QpcrError::ConfigError {
            message: format!("CSV output is not valid UTF-8: {}", e),
        })
    }
}

fn write_volume_rows(out: &mut String, mix: f64, fwd: f64, rev: f64, water: f64, total: f64) {
    for (label, volume) in [
        ("Mix", mix),
        ("Forward primer", fwd),
        ("Reverse primer", rev),
        ("Water", water),
        ("Total", total),
    ] {
        let _ = writeln!(out, "  {:<16}{:>12}", label, format_volume(volume));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::calculator::calculate;
    use crate::domain::model::{Primer, PrimersConfig, Recipe, Samples};

    fn report() -> PlanReport {
        let config = QpcrConfig {
            samples: Samples {
                targets: vec!["GeneB".to_string(), "GeneA".to_string()],
                repeat: 3,
                groups: vec!["Control".to_string(), "Treatment".to_string()],
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
                    concentration: 5.0,
                },
            },
        };
        let result = calculate(&config);
        PlanReport::new("panel", config, result)
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!(" csv ".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Table);
        match "xlsx".parse::<OutputFormat>().unwrap_err() {
            QpcrError::InvalidConfigValueError { field, value, .. } => {
                assert_eq!(field, "format");
                assert_eq!(value, "xlsx");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_table_lists_targets_in_input_order() {
        let table = report().render(OutputFormat::Table).unwrap();

        let b = table.find("Working solution [GeneB]").unwrap();
        let a = table.find("Working solution [GeneA]").unwrap();
        assert!(b < a);
        assert!(table.contains("Reactions: 6 per target x 2 targets = 12"));
        assert!(table.contains("108.0 ul"));
        assert!(table.contains("216.0 ul"));
        assert!(table.contains("Total cDNA: 24.0 ul"));
        assert!(table.contains("R1 (5 uM)"));
    }

    #[test]
    fn test_json_uses_wire_field_names() {
        let json = report().render(OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["experiment"], "panel");
        assert_eq!(value["result"]["totalReactions"], 12);
        assert_eq!(value["result"]["totalcDNAVolume"], 24.0);
        assert_eq!(value["result"]["masterMix"]["totalVolume"], 216.0);
        assert_eq!(
            value["result"]["workingSolutions"]["GeneA"]["forwardPrimer"],
            6.0
        );
        assert_eq!(value["config"]["recipe"]["cDNA"], 2.0);
        assert!(value["generatedAt"].is_string());
    }

    #[test]
    fn test_csv_rows() {
        let csv = report().render(OutputFormat::Csv).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(
            lines[0],
            "scope,target,mix,forwardPrimer,reversePrimer,water,totalVolume"
        );
        assert_eq!(lines[1], "working_solution,GeneB,60.0,6.0,6.0,36.0,108.0");
        assert_eq!(lines[2], "working_solution,GeneA,60.0,6.0,6.0,36.0,108.0");
        assert_eq!(lines[3], "master_mix,,120.0,12.0,12.0,72.0,216.0");
        assert_eq!(lines.len(), 4);
    }
}
