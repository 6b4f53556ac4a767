use af_project::{ProjectError, ValidationError, parse_yaml};

fn expect_invalid(yaml: &str) -> ValidationError {
    match parse_yaml(yaml) {
        Err(ProjectError::Validation(e)) => e,
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn duplicate_design_ids_are_rejected() {
    let err = expect_invalid(
        r#"
version: 1
name: dup
designs:
  - id: a
    frequency: { mhz: 145.0 }
    antenna: { type: Dipole }
  - id: a
    frequency: { mhz: 435.0 }
    antenna: { type: Monopole }
"#,
    );
    assert!(matches!(err, ValidationError::DuplicateId { .. }));
}

#[test]
fn non_positive_frequency_is_rejected() {
    let err = expect_invalid(
        r#"
version: 1
name: bad
designs:
  - id: a
    frequency: { mhz: 0.0 }
    antenna: { type: Dipole }
"#,
    );
    assert!(err.to_string().contains("frequency"));
}

#[test]
fn non_positive_diameter_is_rejected() {
    let err = expect_invalid(
        r#"
version: 1
name: bad
defaults:
  diameter_mm: -1.0
designs: []
"#,
    );
    assert!(matches!(err, ValidationError::InvalidValue { .. }));

    let err = expect_invalid(
        r#"
version: 1
name: bad
designs:
  - id: a
    frequency: { mhz: 145.0 }
    diameter_mm: 0.0
    antenna: { type: Monopole }
"#,
    );
    assert!(err.to_string().contains("diameter_mm"));
}

#[test]
fn unknown_band_is_a_missing_reference() {
    let err = expect_invalid(
        r#"
version: 1
name: bad
designs:
  - id: a
    frequency: { band: 11m }
    antenna: { type: Dipole }
"#,
    );
    assert!(matches!(err, ValidationError::MissingReference { .. }));
}

#[test]
fn single_element_yagi_is_rejected() {
    let err = expect_invalid(
        r#"
version: 1
name: bad
designs:
  - id: a
    frequency: { mhz: 145.0 }
    antenna: { type: Yagi, element_count: 1 }
"#,
    );
    assert!(err.to_string().contains("element_count"));
}

#[test]
fn oversized_yagi_is_rejected() {
    for antenna in [
        "{ type: Yagi, element_count: 69 }",
        "{ type: OptimizeYagi, element_count: 1000 }",
    ] {
        let err = expect_invalid(&format!(
            "version: 1\nname: big\ndesigns:\n  - id: a\n    frequency: {{ mhz: 145.0 }}\n    antenna: {antenna}\n"
        ));
        assert!(err.to_string().contains("at most 68"), "{err}");
    }
}

#[test]
fn optimization_step_outside_grid_range_is_rejected() {
    for step in ["0.5", "0.0005", "0.0"] {
        let err = expect_invalid(&format!(
            "version: 1\nname: coarse\ndesigns:\n  - id: a\n    frequency: {{ mhz: 145.0 }}\n    antenna: {{ type: OptimizeYagi, element_count: 4, step: {step} }}\n"
        ));
        assert!(err.to_string().contains("step"), "{step}: {err}");
    }
}

#[test]
fn two_element_optimization_is_accepted() {
    // Too small to optimize, but that is reported as an infeasible result, not a file error
    let project = parse_yaml(
        r#"
version: 1
name: ok
designs:
  - id: a
    frequency: { mhz: 145.0 }
    antenna: { type: OptimizeYagi, element_count: 2 }
"#,
    )
    .expect("valid project");
    assert_eq!(project.designs.len(), 1);
}

#[test]
fn future_version_is_unsupported() {
    let err = expect_invalid("version: 99\nname: future\n");
    assert!(matches!(
        err,
        ValidationError::UnsupportedVersion { version: 99 }
    ));
}
