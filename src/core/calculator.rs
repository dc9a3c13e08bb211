use crate::domain::model::{CalculationResult, MasterMix, QpcrConfig, WorkingSolution};
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use std::collections::BTreeMap;

/// Compute the reagent volumes for every target, the combined master mix
/// and the total cDNA.
///
/// No validation happens here: empty target or group lists and a zero
/// `repeat` give zero reactions and zero volumes. Reaction counts saturate at
/// `usize::MAX` instead of overflowing. Use [`calculate_checked`] to reject
/// such configs up front.
pub fn calculate(config: &QpcrConfig) -> CalculationResult {
    let samples = &config.samples;
    let recipe = &config.recipe;

    let reactions_per_target = samples.reactions_per_target();
    let total_reactions = samples.total_reactions();

    tracing::debug!(
        targets = samples.targets.len(),
        reactions_per_target,
        total_reactions,
        "Calculating qPCR volumes"
    );

    let per_target = reactions_per_target as f64;
    let mut working_solutions = BTreeMap::new();

    for target in &samples.targets {
        let mix = recipe.mix * per_target;
        let forward_primer = recipe.primers * per_target;
        let reverse_primer = recipe.primers * per_target;
        let water = recipe.water * per_target;
        let total_volume = mix + forward_primer + reverse_primer + water;

        working_solutions.insert(
            target.clone(),
            WorkingSolution {
                mix,
                forward_primer,
                reverse_primer,
                water,
                total_volume,
            },
        );
    }

    let total = total_reactions as f64;
    // closed form, not the sum of the four fields
    let master_mix = MasterMix {
        mix: recipe.mix * total,
        forward_primer: recipe.primers * total,
        reverse_primer: recipe.primers * total,
        water: recipe.water * total,
        total_volume: recipe.reaction_volume() * total,
    };

    CalculationResult {
        total_reactions,
        working_solutions,
        master_mix,
        total_cdna_volume: recipe.cdna * total,
    }
}

/// Validate `config` first and fail on the first offending field.
pub fn calculate_checked(config: &QpcrConfig) -> Result<CalculationResult> {
    config.validate()?;
    Ok(calculate(config))
}

/// One decimal place plus the `ul` suffix.
///
/// Rounding follows `{:.1}`: nearest to the exact binary value, ties to even.
/// Negative zero prints as `0.0 ul`.
pub fn format_volume(volume: f64) -> String {
    let volume = if volume == 0.0 { 0.0 } else { volume };
    format!("{:.1} ul", volume)
}
