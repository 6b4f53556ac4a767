//! Result data types.
//!
//! All lengths are in meters and frequencies in hertz; presentation layers convert.

use serde::{Deserialize, Serialize};

pub type RunId = String;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AntennaKind {
    Monopole,
    Dipole,
    YagiUda,
}

impl AntennaKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Monopole => "monopole",
            Self::Dipole => "dipole",
            Self::YagiUda => "yagi-uda",
        }
    }
}

/// Computed geometry and figures of merit for one antenna.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResultRecord {
    #[serde(rename = "type")]
    pub kind: AntennaKind,
    pub frequency_hz: f64,
    pub wavelength_m: f64,
    /// Radiator length; `None` for Yagis, whose lengths live in `elements`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length_m: Option<f64>,
    pub shortening_factor: f64,
    pub impedance_ohms: f64,
    pub gain_dbi: f64,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elements: Option<YagiElementsRecord>,
}

impl ResultRecord {
    pub fn frequency_mhz(&self) -> f64 {
        self.frequency_hz / 1e6
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct YagiElementsRecord {
    pub reflector_length_m: f64,
    pub active_length_m: f64,
    /// Ordered from the active element outward.
    pub director_lengths_m: Vec<f64>,
    pub ref_active_spacing_m: f64,
    pub active_director_spacing_m: f64,
}

impl YagiElementsRecord {
    pub fn element_count(&self) -> usize {
        2 + self.director_lengths_m.len()
    }
}

/// Winner of a Yagi grid search.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OptimizationRecord {
    pub frequency_hz: f64,
    pub element_count: usize,
    pub step: f64,
    pub wavelength_m: f64,
    pub reflector_length_m: f64,
    pub active_length_m: f64,
    pub director_length_m: f64,
    pub spacing_m: f64,
    pub impedance_ohms: f64,
    pub gain_dbi: f64,
    pub swr: f64,
    pub score: f64,
    /// Number of grid points evaluated.
    pub evaluations: usize,
    /// Name of the scoring function used.
    pub scoring: String,
}

/// Everything stored for one run, as written to `result.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum RunOutput {
    Antenna {
        record: ResultRecord,
    },
    /// `optimization` and `record` are both `None` when the element count was too
    /// small to optimize.
    Optimization {
        optimization: Option<OptimizationRecord>,
        record: Option<ResultRecord>,
    },
}

impl RunOutput {
    pub fn record(&self) -> Option<&ResultRecord> {
        match self {
            Self::Antenna { record } => Some(record),
            Self::Optimization { record, .. } => record.as_ref(),
        }
    }

    pub fn is_infeasible(&self) -> bool {
        matches!(
            self,
            Self::Optimization {
                optimization: None,
                ..
            }
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunManifest {
    pub run_id: RunId,
    pub design_id: String,
    /// Antenna type label of the design, e.g. `"optimize-yagi"`.
    pub antenna: String,
    pub frequency_hz: f64,
    /// RFC 3339.
    pub timestamp: String,
    pub engine_version: String,
}

impl RunManifest {
    /// Manifest stamped with the current UTC time.
    pub fn now(
        run_id: RunId,
        design_id: &str,
        antenna: &str,
        frequency_hz: f64,
        engine_version: &str,
    ) -> Self {
        Self {
            run_id,
            design_id: design_id.to_string(),
            antenna: antenna.to_string(),
            frequency_hz,
            timestamp: chrono::Utc::now().to_rfc3339(),
            engine_version: engine_version.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dipole_record() -> ResultRecord {
        ResultRecord {
            kind: AntennaKind::Dipole,
            frequency_hz: 145e6,
            wavelength_m: 2.0675,
            length_m: Some(1.0042),
            shortening_factor: 0.9714,
            impedance_ohms: 73.0,
            gain_dbi: 2.15,
            description: "Half-wave dipole".to_string(),
            elements: None,
        }
    }

    #[test]
    fn record_json_uses_type_tag() {
        let json = serde_json::to_value(dipole_record()).unwrap();
        assert_eq!(json["type"], "Dipole");
        assert!(json.get("elements").is_none());
        assert_eq!(dipole_record().frequency_mhz(), 145.0);
    }

    #[test]
    fn infeasible_output_has_no_record() {
        let out = RunOutput::Optimization {
            optimization: None,
            record: None,
        };
        assert!(out.is_infeasible());
        assert!(out.record().is_none());

        let out = RunOutput::Antenna {
            record: dipole_record(),
        };
        assert!(!out.is_infeasible());
        assert_eq!(out.record().map(|r| r.kind), Some(AntennaKind::Dipole));
    }

    #[test]
    fn manifest_timestamp_is_rfc3339() {
        let m = RunManifest::now("abc".to_string(), "d1", "dipole", 145e6, "0.1.0");
        assert!(chrono::DateTime::parse_from_rfc3339(&m.timestamp).is_ok());
    }
}
