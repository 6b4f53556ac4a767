use af_app::{
    AppError, Calculator, compute_dipole, compute_monopole, compute_yagi, optimize_and_build_yagi,
    optimize_yagi,
};
use af_model::{CorrectionMode, MAX_YAGI_ELEMENTS};
use af_results::AntennaKind;

fn close(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() < tol
}

#[test]
fn monopole_and_dipole_at_two_meters() {
    let mono = compute_monopole(145.0, 0.004).expect("monopole");
    assert_eq!(mono.kind, AntennaKind::Monopole);
    assert!(close(mono.wavelength_m, 2.0675, 1e-4));
    assert!(close(mono.shortening_factor, 0.9714, 1e-4));
    assert!(close(mono.length_m.unwrap(), 0.5021, 1e-4));
    assert_eq!(mono.impedance_ohms, 36.5);
    assert_eq!(mono.gain_dbi, 5.0);

    let dipole = compute_dipole(145.0, 0.004).expect("dipole");
    assert_eq!(dipole.kind, AntennaKind::Dipole);
    assert!(close(dipole.length_m.unwrap(), 1.0042, 1e-4));
    assert_eq!(dipole.impedance_ohms, 73.0);
    assert_eq!(dipole.gain_dbi, 2.15);
    assert_eq!(dipole.frequency_mhz(), 145.0);
}

#[test]
fn two_element_yagi_has_no_directors() {
    let yagi = compute_yagi(145.0, 2, 0.004, None).expect("yagi");
    let elements = yagi.elements.as_ref().expect("yagi elements");
    assert!(elements.director_lengths_m.is_empty());
    assert_eq!(yagi.gain_dbi, 7.0);
    assert_eq!(yagi.impedance_ohms, 50.0);
    assert!(yagi.length_m.is_none());
}

#[test]
fn yagi_directors_taper() {
    let yagi = compute_yagi(145.0, 6, 0.004, None).expect("yagi");
    let elements = yagi.elements.expect("yagi elements");
    assert_eq!(elements.element_count(), 6);
    assert!(close(yagi.gain_dbi, 10.2, 1e-12));
    for pair in elements.director_lengths_m.windows(2) {
        assert!(pair[1] < pair[0]);
    }
    assert!(close(
        elements.reflector_length_m,
        1.03 * elements.active_length_m,
        1e-12
    ));
    // Spacings are never shortened
    assert!(close(elements.ref_active_spacing_m, 0.20 * yagi.wavelength_m, 1e-12));
}

#[test]
fn invalid_inputs_are_rejected_before_the_model_runs() {
    for result in [
        compute_monopole(0.0, 0.004),
        compute_dipole(-1.0, 0.004),
        compute_dipole(f64::NAN, 0.004),
        compute_monopole(145.0, 0.0),
        compute_yagi(145.0, 1, 0.004, None),
        compute_yagi(145.0, 0, 0.004, None),
    ] {
        assert!(matches!(result, Err(AppError::InvalidInput(_))), "{result:?}");
    }

    for step in [0.0, 0.0005, 0.2, f64::INFINITY] {
        let result = optimize_yagi(145.0, 4, step, 0.004);
        assert!(matches!(result, Err(AppError::InvalidInput(_))), "step {step}");
    }
}

#[test]
fn element_count_is_capped_where_directors_stay_positive() {
    assert!(compute_yagi(145.0, MAX_YAGI_ELEMENTS, 0.004, None).is_ok());
    for count in [MAX_YAGI_ELEMENTS + 1, usize::MAX] {
        let result = compute_yagi(145.0, count, 0.004, None);
        assert!(matches!(result, Err(AppError::InvalidInput(_))), "{result:?}");
        let result = optimize_yagi(145.0, count, 0.005, 0.004);
        assert!(matches!(result, Err(AppError::InvalidInput(_))), "{result:?}");
    }
}

#[test]
fn optimizer_below_three_elements_is_infeasible() {
    assert_eq!(optimize_yagi(145.0, 2, 0.005, 0.004).unwrap(), None);
    assert_eq!(optimize_yagi(145.0, 0, 0.005, 0.004).unwrap(), None);
    assert!(optimize_and_build_yagi(145.0, 2, 0.005, 0.004).unwrap().is_none());
}

#[test]
fn optimizer_winner_at_two_meters() {
    let opt = optimize_yagi(145.0, 3, 0.005, 0.004)
        .unwrap()
        .expect("three elements are feasible");
    let lam = opt.wavelength_m;
    assert_eq!(opt.evaluations, 625);
    assert_eq!(opt.scoring, "swr-penalty");
    assert!(close(opt.reflector_length_m / lam, 0.505, 1e-9));
    assert!(close(opt.active_length_m / lam, 0.49, 1e-9));
    assert!(close(opt.director_length_m / lam, 0.45, 1e-9));
    assert!(close(opt.spacing_m / lam, 0.185, 1e-9));
    assert!(close(opt.impedance_ohms, 52.1842, 1e-3));
    assert!(close(opt.swr, 1.0437, 1e-3));
    assert!(close(opt.score, 3.7279, 1e-3));
    assert!((20.0..=100.0).contains(&opt.impedance_ohms));
}

#[test]
fn optimizer_is_deterministic() {
    let a = optimize_yagi(435.0, 5, 0.004, 0.003).unwrap().unwrap();
    let b = optimize_yagi(435.0, 5, 0.004, 0.003).unwrap().unwrap();
    assert_eq!(a.score.to_bits(), b.score.to_bits());
    assert_eq!(a.active_length_m.to_bits(), b.active_length_m.to_bits());
    assert_eq!(a.spacing_m.to_bits(), b.spacing_m.to_bits());
}

#[test]
fn optimized_yagi_is_built_from_winning_lengths() {
    let build = optimize_and_build_yagi(145.0, 4, 0.005, 0.004)
        .unwrap()
        .expect("feasible");
    let opt = &build.optimization;
    let record = &build.record;
    let elements = record.elements.as_ref().expect("yagi elements");

    assert_eq!(record.kind, AntennaKind::YagiUda);
    assert_eq!(elements.element_count(), 4);
    assert!(close(elements.ref_active_spacing_m, opt.spacing_m, 1e-9));
    assert!(close(elements.active_director_spacing_m, opt.spacing_m, 1e-9));
    let k = record.shortening_factor;
    assert!(close(elements.active_length_m, opt.active_length_m * k, 1e-9));
    assert!(close(
        elements.director_lengths_m[0],
        opt.director_length_m * k * (1.0 - 0.015),
        1e-9
    ));
    // Reflector factor is not carried over from the search
    assert!(close(
        elements.reflector_length_m,
        1.03 * elements.active_length_m,
        1e-9
    ));
}

#[test]
fn thin_wire_calculator() {
    let calc = Calculator::new(CorrectionMode::ThinWire);
    let dipole = calc.dipole(145.0, 0.004).unwrap();
    assert_eq!(dipole.shortening_factor, 0.95);
    assert!(close(dipole.length_m.unwrap(), 0.5 * dipole.wavelength_m * 0.95, 1e-12));

    let opt = calc.optimize_yagi(145.0, 3, 0.005, 0.004).unwrap().unwrap();
    assert!(close(opt.score, 3.74625, 1e-6));
    assert!(close(opt.impedance_ohms, 50.35, 1e-6));
}

#[test]
fn optimizer_reports_progress() {
    let calc = Calculator::default();
    let mut seen = Vec::new();
    let opt = calc
        .optimize_yagi_with_progress(
            145.0,
            3,
            0.005,
            0.004,
            Some(&mut |p: af_optimize::SearchProgress| seen.push(p)),
        )
        .unwrap()
        .unwrap();
    let last = seen.last().expect("progress events");
    assert_eq!(last.evaluated, 625);
    assert_eq!(last.best_score, opt.score);
}
