use crate::domain::model::{Primer, PrimersConfig, QpcrConfig, Recipe, Samples, MAX_REPEAT};
use crate::utils::error::{QpcrError, Result};
use std::collections::HashSet;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(QpcrError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(QpcrError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(QpcrError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// Rejects an empty list, then every blank entry (reported as `field[i]`).
pub fn validate_non_empty_list(field_name: &str, values: &[String]) -> Result<()> {
    if values.is_empty() {
        return Err(QpcrError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: "[]".to_string(),
            reason: "At least one entry is required".to_string(),
        });
    }

    for (i, value) in values.iter().enumerate() {
        validate_non_empty_string(&format!("{}[{}]", field_name, i), value)?;
    }
    Ok(())
}

pub fn validate_non_negative_volume(field_name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(QpcrError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Volume must be a finite number >= 0".to_string(),
        });
    }
    Ok(())
}

pub fn validate_positive_real(field_name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(QpcrError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value must be a finite number > 0".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(QpcrError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

impl Validate for Samples {
    fn validate(&self) -> Result<()> {
        validate_non_empty_list("samples.targets", &self.targets)?;
        validate_non_empty_list("samples.groups", &self.groups)?;
        validate_range("samples.repeat", self.repeat, 1, MAX_REPEAT)?;

        let mut seen = HashSet::new();
        for target in &self.targets {
            if !seen.insert(target.as_str()) {
                tracing::warn!("Target '{}' is listed more than once", target);
            }
        }
        Ok(())
    }
}

impl Validate for Recipe {
    fn validate(&self) -> Result<()> {
        validate_non_negative_volume("recipe.mix", self.mix)?;
        validate_non_negative_volume("recipe.primers", self.primers)?;
        validate_non_negative_volume("recipe.cDNA", self.cdna)?;
        validate_non_negative_volume("recipe.water", self.water)?;
        Ok(())
    }
}

fn validate_primer(prefix: &str, primer: &Primer) -> Result<()> {
    validate_non_empty_string(&format!("{}.name", prefix), &primer.name)?;
    validate_positive_real(&format!("{}.concentration", prefix), primer.concentration)
}

impl Validate for PrimersConfig {
    fn validate(&self) -> Result<()> {
        validate_primer("primers.forward", &self.forward)?;
        validate_primer("primers.reverse", &self.reverse)
    }
}

impl Validate for QpcrConfig {
    fn validate(&self) -> Result<()> {
        self.samples.validate()?;
        self.recipe.validate()?;
        self.primers.validate()
    }
}
