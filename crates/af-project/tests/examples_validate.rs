use std::path::PathBuf;

#[test]
fn demos_validate() {
    let crate_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let root = crate_dir
        .parent()
        .and_then(|p| p.parent())
        .expect("workspace root");

    let demos = [
        "demos/projects/01_two_meter_basics.yaml",
        "demos/projects/02_yagi_optimization.yaml",
        "demos/projects/03_hf_thin_wire.yaml",
    ];

    for rel in demos {
        let path = root.join(rel);
        let result = af_project::load_yaml(&path);
        assert!(
            result.is_ok(),
            "demo failed validation: {} => {:?}",
            path.display(),
            result.err()
        );
    }
}
