use af_app::{Calculator, sweep_bands};
use af_model::BANDS;

#[test]
fn sweep_keeps_band_plan_order() {
    let entries = sweep_bands(&Calculator::default(), 3, 0.005, 0.004).expect("sweep");
    assert_eq!(entries.len(), BANDS.len());
    for (entry, band) in entries.iter().zip(BANDS.iter()) {
        assert_eq!(entry.band, band.name);
        assert_eq!(entry.center_mhz, band.center_mhz);
        let opt = entry.optimization.as_ref().expect("feasible");
        assert!((opt.frequency_hz - band.center_mhz * 1e6).abs() < 1e-3);
        assert_eq!(opt.evaluations, 625);
    }
}

#[test]
fn sweep_matches_single_optimizations() {
    let calc = Calculator::default();
    let entries = sweep_bands(&calc, 5, 0.005, 0.006).expect("sweep");
    for entry in &entries {
        let single = calc
            .optimize_yagi(entry.center_mhz, 5, 0.005, 0.006)
            .unwrap();
        assert_eq!(entry.optimization, single);
    }
}

#[test]
fn sweep_of_two_elements_is_all_infeasible() {
    let entries = sweep_bands(&Calculator::default(), 2, 0.005, 0.004).expect("sweep");
    assert!(entries.iter().all(|e| e.optimization.is_none()));
}

#[test]
fn sweep_rejects_bad_step() {
    assert!(sweep_bands(&Calculator::default(), 3, 0.5, 0.004).is_err());
}
