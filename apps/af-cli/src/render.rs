//! Plain-text rendering of result records, in centimeters and MHz.

use af_app::BandSweepEntry;
use af_results::{AntennaKind, OptimizationRecord, ResultRecord, RunOutput};

fn cm(meters: f64) -> f64 {
    meters * 100.0
}

fn band_suffix(frequency_mhz: f64) -> String {
    af_model::band_containing(frequency_mhz)
        .map(|b| format!(" ({})", b.name))
        .unwrap_or_default()
}

pub fn print_record(record: &ResultRecord) {
    let title = match record.kind {
        AntennaKind::Monopole => "Monopole",
        AntennaKind::Dipole => "Dipole",
        AntennaKind::YagiUda => "Yagi-Uda",
    };
    let mhz = record.frequency_mhz();
    println!("{} @ {:.3} MHz{}", title, mhz, band_suffix(mhz));
    println!("  {}", record.description);
    println!("  Wavelength:       {:>9.2} cm", cm(record.wavelength_m));
    println!("  Shortening k:     {:>9.4}", record.shortening_factor);

    if let Some(length) = record.length_m {
        println!("  Length:           {:>9.2} cm", cm(length));
    }
    if let Some(e) = &record.elements {
        println!("  Reflector:        {:>9.2} cm", cm(e.reflector_length_m));
        println!("  Active:           {:>9.2} cm", cm(e.active_length_m));
        for (i, d) in e.director_lengths_m.iter().enumerate() {
            println!("  Director {:<2}:      {:>9.2} cm", i + 1, cm(*d));
        }
        println!("  Refl-active gap:  {:>9.2} cm", cm(e.ref_active_spacing_m));
        println!(
            "  Active-dir gap:   {:>9.2} cm",
            cm(e.active_director_spacing_m)
        );
    }

    println!("  Impedance:        {:>9.1} ohm", record.impedance_ohms);
    println!("  Gain:             {:>9.2} dBi", record.gain_dbi);
}

pub fn print_optimization(opt: &OptimizationRecord) {
    let mhz = opt.frequency_hz / 1e6;
    println!(
        "Optimized {}-element Yagi-Uda @ {:.3} MHz{}",
        opt.element_count,
        mhz,
        band_suffix(mhz)
    );
    println!(
        "  {} grid points, step {} wavelengths, scoring '{}'",
        opt.evaluations, opt.step, opt.scoring
    );
    println!("  Wavelength:       {:>9.2} cm", cm(opt.wavelength_m));
    println!("  Reflector:        {:>9.2} cm", cm(opt.reflector_length_m));
    println!("  Active:           {:>9.2} cm", cm(opt.active_length_m));
    println!("  Director:         {:>9.2} cm", cm(opt.director_length_m));
    println!("  Spacing:          {:>9.2} cm", cm(opt.spacing_m));
    println!("  Impedance:        {:>9.1} ohm", opt.impedance_ohms);
    println!("  SWR:              {:>9.3}", opt.swr);
    println!("  Gain:             {:>9.2} dBi", opt.gain_dbi);
    println!("  Score:            {:>9.4}", opt.score);
}

pub fn print_output(output: &RunOutput) {
    match output {
        RunOutput::Antenna { record } => print_record(record),
        RunOutput::Optimization {
            optimization: Some(opt),
            record,
        } => {
            print_optimization(opt);
            if let Some(record) = record {
                println!();
                print_record(record);
            }
        }
        RunOutput::Optimization {
            optimization: None,
            ..
        } => println!("No feasible Yagi: the search needs at least 3 elements"),
    }
}

pub fn print_sweep(entries: &[BandSweepEntry]) {
    println!(
        "{:<5} {:>10} {:>9} {:>9} {:>9} {:>7} {:>7} {:>8}",
        "band", "MHz", "active", "director", "spacing", "ohm", "SWR", "score"
    );
    for entry in entries {
        match &entry.optimization {
            Some(opt) => println!(
                "{:<5} {:>10.3} {:>7.2}cm {:>7.2}cm {:>7.2}cm {:>7.1} {:>7.3} {:>8.4}",
                entry.band,
                entry.center_mhz,
                cm(opt.active_length_m),
                cm(opt.director_length_m),
                cm(opt.spacing_m),
                opt.impedance_ohms,
                opt.swr,
                opt.score
            ),
            None => println!(
                "{:<5} {:>10.3}  infeasible",
                entry.band, entry.center_mhz
            ),
        }
    }
}
