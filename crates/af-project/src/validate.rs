//! Design file validation logic.
//!
//! Every numeric precondition the antenna models rely on is checked here, so a
//! project that validates can be evaluated without further input checks.

use crate::schema::{AntennaDef, DesignDef, FrequencyDef, Project, YagiFactorsDef};
use std::collections::HashSet;

/// Smallest Yagi that can be laid out: reflector + active element.
pub const MIN_YAGI_ELEMENTS: usize = 2;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Missing reference: {id} in {context}")]
    MissingReference { id: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_project(project: &Project) -> Result<(), ValidationError> {
    if project.version > crate::migrate::LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: project.version,
        });
    }

    require_positive("defaults.diameter_mm", project.defaults.diameter_mm)?;
    require_positive(
        "defaults.target_impedance_ohms",
        project.defaults.target_impedance_ohms,
    )?;

    let mut design_ids = HashSet::new();
    for design in &project.designs {
        if !design_ids.insert(&design.id) {
            return Err(ValidationError::DuplicateId {
                id: design.id.clone(),
                context: "designs".to_string(),
            });
        }
        validate_design(design)?;
    }

    Ok(())
}

fn validate_design(design: &DesignDef) -> Result<(), ValidationError> {
    if design.id.trim().is_empty() {
        return Err(ValidationError::InvalidValue {
            field: "design id".to_string(),
            value: format!("{:?}", design.id),
            reason: "must not be empty".to_string(),
        });
    }

    match &design.frequency {
        FrequencyDef::Mhz { mhz } => {
            require_positive(&format!("design '{}' frequency.mhz", design.id), *mhz)?;
        }
        FrequencyDef::Band { band } => {
            if af_model::find_band(band).is_none() {
                return Err(ValidationError::MissingReference {
                    id: band.clone(),
                    context: format!("design '{}' band", design.id),
                });
            }
        }
    }

    if let Some(d) = design.diameter_mm {
        require_positive(&format!("design '{}' diameter_mm", design.id), d)?;
    }

    match &design.antenna {
        AntennaDef::Monopole | AntennaDef::Dipole => {}
        AntennaDef::Yagi {
            element_count,
            factors,
        } => {
            require_element_count(design, *element_count)?;
            if let Some(f) = factors {
                validate_factors(design, f)?;
            }
        }
        AntennaDef::OptimizeYagi {
            element_count,
            step,
        } => {
            require_element_count(design, *element_count)?;
            require_step(design, *step)?;
        }
    }

    Ok(())
}

fn validate_factors(design: &DesignDef, f: &YagiFactorsDef) -> Result<(), ValidationError> {
    let fields = [
        ("active", f.active),
        ("reflector", f.reflector),
        ("director_base", f.director_base),
        ("ref_active_spacing", f.ref_active_spacing),
        ("active_director_spacing", f.active_director_spacing),
    ];
    for (name, value) in fields {
        require_positive(&format!("design '{}' factors.{}", design.id, name), value)?;
    }
    Ok(())
}

fn require_element_count(design: &DesignDef, count: usize) -> Result<(), ValidationError> {
    if count < MIN_YAGI_ELEMENTS {
        return Err(ValidationError::InvalidValue {
            field: format!("design '{}' element_count", design.id),
            value: count.to_string(),
            reason: format!("a Yagi needs at least {} elements", MIN_YAGI_ELEMENTS),
        });
    }
    if count > af_model::MAX_YAGI_ELEMENTS {
        return Err(ValidationError::InvalidValue {
            field: format!("design '{}' element_count", design.id),
            value: count.to_string(),
            reason: format!(
                "a Yagi can have at most {} elements",
                af_model::MAX_YAGI_ELEMENTS
            ),
        });
    }
    Ok(())
}

fn require_step(design: &DesignDef, step: f64) -> Result<(), ValidationError> {
    use af_optimize::{MAX_STEP, MIN_STEP};
    if !step.is_finite() || !(MIN_STEP..=MAX_STEP).contains(&step) {
        return Err(ValidationError::InvalidValue {
            field: format!("design '{}' step", design.id),
            value: step.to_string(),
            reason: format!("must lie in [{}, {}] wavelengths", MIN_STEP, MAX_STEP),
        });
    }
    Ok(())
}

fn require_positive(field: &str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ValidationError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
            reason: "must be a positive number".to_string(),
        });
    }
    Ok(())
}
