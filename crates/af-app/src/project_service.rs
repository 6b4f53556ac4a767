//! Design file loading, saving, validation, and introspection.

use std::path::Path;

use af_model::{CorrectionMode, YagiFactors};
use af_project::schema::{CorrectionDef, DesignDef, FrequencyDef, Project, YagiFactorsDef};
use serde::Serialize;

use crate::compute::Calculator;
use crate::error::{AppError, AppResult};

/// Summary of a design for listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DesignSummary {
    pub id: String,
    pub name: String,
    pub antenna: String,
    pub frequency_mhz: f64,
    /// Band the frequency falls in, if any.
    pub band: Option<String>,
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// Load a design file. `.json` files are read as JSON, everything else as YAML.
pub fn load_project(path: &Path) -> AppResult<Project> {
    let content = std::fs::read_to_string(path).map_err(|e| AppError::ProjectFileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let project = if is_json(path) {
        af_project::parse_json(&content)?
    } else {
        af_project::parse_yaml(&content)?
    };
    Ok(project)
}

pub fn save_project(path: &Path, project: &Project) -> AppResult<()> {
    if is_json(path) {
        af_project::save_json(path, project)?;
    } else {
        af_project::save_yaml(path, project)?;
    }
    Ok(())
}

pub fn validate_project(project: &Project) -> AppResult<()> {
    af_project::validate_project(project).map_err(|e| AppError::Validation(e.to_string()))
}

pub fn list_designs(project: &Project) -> AppResult<Vec<DesignSummary>> {
    project
        .designs
        .iter()
        .map(|design| {
            let frequency_mhz = resolve_frequency_mhz(&design.frequency)?;
            Ok(DesignSummary {
                id: design.id.clone(),
                name: design.name.clone(),
                antenna: design.antenna.label().to_string(),
                frequency_mhz,
                band: af_model::band_containing(frequency_mhz).map(|b| b.name.to_string()),
            })
        })
        .collect()
}

pub fn get_design<'a>(project: &'a Project, design_id: &str) -> AppResult<&'a DesignDef> {
    project
        .designs
        .iter()
        .find(|d| d.id == design_id)
        .ok_or_else(|| AppError::DesignNotFound(design_id.to_string()))
}

/// Explicit frequency, or the center of the named band.
pub fn resolve_frequency_mhz(frequency: &FrequencyDef) -> AppResult<f64> {
    match frequency {
        FrequencyDef::Mhz { mhz } => Ok(*mhz),
        FrequencyDef::Band { band } => af_model::find_band(band)
            .map(|b| b.center_mhz)
            .ok_or_else(|| AppError::InvalidInput(format!("unknown band '{}'", band))),
    }
}

/// Conductor diameter in meters, falling back to the project default.
pub fn design_diameter_m(project: &Project, design: &DesignDef) -> f64 {
    design.diameter_mm.unwrap_or(project.defaults.diameter_mm) / 1000.0
}

pub fn correction_mode(correction: CorrectionDef) -> CorrectionMode {
    match correction {
        CorrectionDef::DiameterCorrected => CorrectionMode::DiameterCorrected,
        CorrectionDef::ThinWire => CorrectionMode::ThinWire,
    }
}

pub fn yagi_factors(def: &YagiFactorsDef) -> YagiFactors {
    YagiFactors {
        active_factor: def.active,
        reflector_factor: def.reflector,
        director_base_factor: def.director_base,
        ref_active_spacing_factor: def.ref_active_spacing,
        active_director_spacing_factor: def.active_director_spacing,
    }
}

/// Calculator configured from the project defaults.
pub fn calculator_for(project: &Project) -> Calculator {
    Calculator::new(correction_mode(project.defaults.correction))
        .with_target_impedance(project.defaults.target_impedance_ohms)
}
