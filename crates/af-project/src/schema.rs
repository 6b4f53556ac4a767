//! Design file schema definitions.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub defaults: DefaultsDef,
    #[serde(default)]
    pub designs: Vec<DesignDef>,
}

/// Settings shared by every design unless the design overrides them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DefaultsDef {
    #[serde(default = "default_diameter_mm")]
    pub diameter_mm: f64,
    #[serde(default)]
    pub correction: CorrectionDef,
    #[serde(default = "default_target_impedance_ohms")]
    pub target_impedance_ohms: f64,
}

impl Default for DefaultsDef {
    fn default() -> Self {
        Self {
            diameter_mm: default_diameter_mm(),
            correction: CorrectionDef::default(),
            target_impedance_ohms: default_target_impedance_ohms(),
        }
    }
}

fn default_diameter_mm() -> f64 {
    4.0
}

fn default_target_impedance_ohms() -> f64 {
    50.0
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum CorrectionDef {
    #[default]
    DiameterCorrected,
    ThinWire,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DesignDef {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub frequency: FrequencyDef,
    pub antenna: AntennaDef,
    /// Overrides `defaults.diameter_mm` for this design.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diameter_mm: Option<f64>,
}

/// Either an explicit frequency or the center of a named band.
///
/// ```yaml
/// frequency: { mhz: 145.0 }
/// frequency: { band: 70cm }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FrequencyDef {
    Mhz { mhz: f64 },
    Band { band: String },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum AntennaDef {
    Monopole,
    Dipole,
    Yagi {
        element_count: usize,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        factors: Option<YagiFactorsDef>,
    },
    OptimizeYagi {
        element_count: usize,
        #[serde(default = "default_step")]
        step: f64,
    },
}

fn default_step() -> f64 {
    0.005
}

/// Yagi length factors; omitted fields take the usual design defaults.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct YagiFactorsDef {
    #[serde(default = "default_active_factor")]
    pub active: f64,
    #[serde(default = "default_reflector_factor")]
    pub reflector: f64,
    #[serde(default = "default_director_base_factor")]
    pub director_base: f64,
    #[serde(default = "default_ref_active_spacing")]
    pub ref_active_spacing: f64,
    #[serde(default = "default_active_director_spacing")]
    pub active_director_spacing: f64,
}

impl Default for YagiFactorsDef {
    fn default() -> Self {
        Self {
            active: default_active_factor(),
            reflector: default_reflector_factor(),
            director_base: default_director_base_factor(),
            ref_active_spacing: default_ref_active_spacing(),
            active_director_spacing: default_active_director_spacing(),
        }
    }
}

fn default_active_factor() -> f64 {
    0.48
}

fn default_reflector_factor() -> f64 {
    1.03
}

fn default_director_base_factor() -> f64 {
    0.46
}

fn default_ref_active_spacing() -> f64 {
    0.20
}

fn default_active_director_spacing() -> f64 {
    0.18
}

impl AntennaDef {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Monopole => "monopole",
            Self::Dipole => "dipole",
            Self::Yagi { .. } => "yagi",
            Self::OptimizeYagi { .. } => "optimize-yagi",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_design_uses_defaults() {
        let yaml = r#"
version: 1
name: minimal
designs:
  - id: d1
    frequency: { mhz: 145.0 }
    antenna: { type: Dipole }
"#;
        let project: Project = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(project.defaults, DefaultsDef::default());
        assert_eq!(project.designs[0].antenna, AntennaDef::Dipole);
        assert_eq!(project.designs[0].frequency, FrequencyDef::Mhz { mhz: 145.0 });
        assert!(project.designs[0].diameter_mm.is_none());
    }

    #[test]
    fn band_frequency_and_yagi_factors() {
        let yaml = r#"
version: 1
name: yagi
defaults:
  correction: ThinWire
designs:
  - id: y1
    name: Five element
    frequency: { band: 70cm }
    antenna:
      type: Yagi
      element_count: 5
      factors: { active: 0.47 }
"#;
        let project: Project = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(project.defaults.correction, CorrectionDef::ThinWire);
        let design = &project.designs[0];
        assert_eq!(
            design.frequency,
            FrequencyDef::Band {
                band: "70cm".to_string()
            }
        );
        match &design.antenna {
            AntennaDef::Yagi {
                element_count,
                factors: Some(f),
            } => {
                assert_eq!(*element_count, 5);
                assert_eq!(f.active, 0.47);
                assert_eq!(f.reflector, 1.03);
            }
            other => panic!("unexpected antenna {other:?}"),
        }
    }

    #[test]
    fn optimize_step_defaults() {
        let yaml = "type: OptimizeYagi\nelement_count: 4\n";
        let antenna: AntennaDef = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            antenna,
            AntennaDef::OptimizeYagi {
                element_count: 4,
                step: 0.005
            }
        );
        assert_eq!(antenna.label(), "optimize-yagi");
    }
}
