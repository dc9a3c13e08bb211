use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single primer, concentration in µM.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Primer {
    pub name: String,
    pub concentration: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrimersConfig {
    pub forward: Primer,
    pub reverse: Primer,
}

/// Per-reaction volumes in µL. `primers` is the volume of each primer;
/// forward and reverse share it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub mix: f64,
    pub primers: f64,
    #[serde(rename = "cDNA")]
    pub cdna: f64,
    pub water: f64,
}

impl Recipe {
    /// Premix volume of one reaction, cDNA excluded.
    pub fn reaction_volume(&self) -> f64 {
        self.mix + self.primers * 2.0 + self.water
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Samples {
    pub targets: Vec<String>,
    pub repeat: usize,
    pub groups: Vec<String>,
}

/// Upper bound on `repeat` accepted by validation.
pub const MAX_REPEAT: usize = 10_000;

impl Samples {
    /// `groups × repeat`, saturating at `usize::MAX`.
    pub fn reactions_per_target(&self) -> usize {
        self.groups.len().saturating_mul(self.repeat)
    }

    /// `groups × repeat × targets`, saturating at `usize::MAX`.
    pub fn total_reactions(&self) -> usize {
        self.reactions_per_target()
            .saturating_mul(self.targets.len())
    }

    /// Targets in input order with repeated names dropped.
    pub fn distinct_targets(&self) -> Vec<&str> {
        let mut seen = std::collections::HashSet::new();
        self.targets
            .iter()
            .map(String::as_str)
            .filter(|t| seen.insert(*t))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QpcrConfig {
    pub samples: Samples,
    pub recipe: Recipe,
    pub primers: PrimersConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkingSolution {
    pub mix: f64,
    pub forward_primer: f64,
    pub reverse_primer: f64,
    pub water: f64,
    pub total_volume: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MasterMix {
    pub mix: f64,
    pub forward_primer: f64,
    pub reverse_primer: f64,
    pub water: f64,
    pub total_volume: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    pub total_reactions: usize,
    pub working_solutions: BTreeMap<String, WorkingSolution>,
    pub master_mix: MasterMix,
    #[serde(rename = "totalcDNAVolume")]
    pub total_cdna_volume: f64,
}

impl CalculationResult {
    pub fn working_solution(&self, target: &str) -> Option<&WorkingSolution> {
        self.working_solutions.get(target)
    }
}
