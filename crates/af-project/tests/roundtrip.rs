use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use af_project::{
    AntennaDef, CorrectionDef, DefaultsDef, DesignDef, FrequencyDef, Project, YagiFactorsDef,
};

fn unique_temp_dir(prefix: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    dir.push(format!("{}_{}", prefix, nanos));
    dir
}

fn sample_project() -> Project {
    Project {
        version: af_project::LATEST_VERSION,
        name: "roundtrip".to_string(),
        defaults: DefaultsDef {
            diameter_mm: 5.0,
            correction: CorrectionDef::ThinWire,
            target_impedance_ohms: 50.0,
        },
        designs: vec![
            DesignDef {
                id: "d1".to_string(),
                name: "Dipole".to_string(),
                frequency: FrequencyDef::Band {
                    band: "20m".to_string(),
                },
                antenna: AntennaDef::Dipole,
                diameter_mm: Some(2.0),
            },
            DesignDef {
                id: "y1".to_string(),
                name: "Yagi".to_string(),
                frequency: FrequencyDef::Mhz { mhz: 435.0 },
                antenna: AntennaDef::Yagi {
                    element_count: 7,
                    factors: Some(YagiFactorsDef {
                        active: 0.47,
                        ..YagiFactorsDef::default()
                    }),
                },
                diameter_mm: None,
            },
            DesignDef {
                id: "o1".to_string(),
                name: "Optimized".to_string(),
                frequency: FrequencyDef::Mhz { mhz: 145.0 },
                antenna: AntennaDef::OptimizeYagi {
                    element_count: 4,
                    step: 0.004,
                },
                diameter_mm: None,
            },
        ],
    }
}

#[test]
fn yaml_roundtrip() {
    let dir = unique_temp_dir("af_project_yaml");
    fs::create_dir_all(&dir).expect("failed to create temp dir");
    let path = dir.join("project.yaml");

    let project = sample_project();
    af_project::save_yaml(&path, &project).expect("save failed");
    let loaded = af_project::load_yaml(&path).expect("load failed");
    assert_eq!(loaded, project);
}

#[test]
fn json_roundtrip() {
    let dir = unique_temp_dir("af_project_json");
    fs::create_dir_all(&dir).expect("failed to create temp dir");
    let path = dir.join("project.json");

    let project = sample_project();
    af_project::save_json(&path, &project).expect("save failed");
    let loaded = af_project::load_json(&path).expect("load failed");
    assert_eq!(loaded, project);
}

#[test]
fn save_refuses_invalid_project() {
    let dir = unique_temp_dir("af_project_invalid");
    fs::create_dir_all(&dir).expect("failed to create temp dir");
    let path = dir.join("project.yaml");

    let mut project = sample_project();
    project.defaults.diameter_mm = 0.0;
    assert!(af_project::save_yaml(&path, &project).is_err());
    assert!(!path.exists());
}
