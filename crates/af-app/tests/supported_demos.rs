use std::path::PathBuf;

use af_app::{evaluate_design, list_designs, load_project};

fn demos_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../demos/projects")
}

#[test]
fn every_demo_design_evaluates() {
    for file in [
        "01_two_meter_basics.yaml",
        "02_yagi_optimization.yaml",
        "03_hf_thin_wire.yaml",
    ] {
        let path = demos_dir().join(file);
        let project = load_project(&path).expect("demo loads");
        let summaries = list_designs(&project).expect("designs resolve");
        assert_eq!(summaries.len(), project.designs.len());

        for design in &project.designs {
            let output = evaluate_design(&project, design, None)
                .unwrap_or_else(|e| panic!("{file}/{}: {e}", design.id));
            let record = output
                .record()
                .unwrap_or_else(|| panic!("{file}/{}: no record", design.id));
            assert!(record.impedance_ohms > 0.0);
            assert!(record.wavelength_m > 0.0);
        }
    }
}

#[test]
fn band_designs_resolve_to_band_centers() {
    let project = load_project(&demos_dir().join("01_two_meter_basics.yaml")).unwrap();
    let summaries = list_designs(&project).unwrap();
    let mono = summaries.iter().find(|s| s.id == "mono-2m").unwrap();
    assert_eq!(mono.frequency_mhz, 145.0);
    assert_eq!(mono.band.as_deref(), Some("2m"));
    assert_eq!(mono.antenna, "monopole");
}
