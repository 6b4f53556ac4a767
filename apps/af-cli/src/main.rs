mod render;

use af_app::{
    AppError, AppResult, Calculator, RunOptions, RunProgressEvent, RunRequest, RunStage,
    project_service, run_service,
};
use af_model::{CorrectionMode, YagiFactors};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "antennaflow")]
#[command(about = "antennaflow - monopole, dipole and Yagi-Uda antenna calculator", long_about = None)]
struct Cli {
    /// Print results as JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone)]
struct FrequencyArgs {
    /// Design frequency in MHz
    #[arg(short, long, conflicts_with = "band")]
    freq: Option<f64>,
    /// Amateur band name (e.g. 2m, 70cm); its center frequency is used
    #[arg(short, long)]
    band: Option<String>,
}

#[derive(Args, Clone)]
struct ConductorArgs {
    /// Conductor diameter in millimeters
    #[arg(short, long = "diameter-mm", default_value_t = 4.0)]
    diameter_mm: f64,
    /// Ignore conductor thickness (fixed shortening factor 0.95)
    #[arg(long)]
    thin_wire: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Quarter-wave monopole
    Monopole {
        #[command(flatten)]
        frequency: FrequencyArgs,
        #[command(flatten)]
        conductor: ConductorArgs,
    },
    /// Half-wave dipole
    Dipole {
        #[command(flatten)]
        frequency: FrequencyArgs,
        #[command(flatten)]
        conductor: ConductorArgs,
    },
    /// Yagi-Uda array from length factors
    Yagi {
        #[command(flatten)]
        frequency: FrequencyArgs,
        #[command(flatten)]
        conductor: ConductorArgs,
        /// Total number of elements (reflector + active + directors)
        #[arg(short, long, default_value_t = 3)]
        elements: usize,
        /// Active element length in wavelengths
        #[arg(long)]
        active: Option<f64>,
        /// Reflector length relative to the active element
        #[arg(long)]
        reflector: Option<f64>,
        /// Director base length in wavelengths, before taper
        #[arg(long)]
        director: Option<f64>,
        /// Reflector to active spacing in wavelengths
        #[arg(long)]
        ref_spacing: Option<f64>,
        /// Active to director spacing in wavelengths
        #[arg(long)]
        dir_spacing: Option<f64>,
    },
    /// Grid-search the best Yagi-Uda factors
    Optimize {
        #[command(flatten)]
        frequency: FrequencyArgs,
        #[command(flatten)]
        conductor: ConductorArgs,
        /// Total number of elements (at least 3)
        #[arg(short, long, default_value_t = 3)]
        elements: usize,
        /// Grid step in wavelengths
        #[arg(short, long, default_value_t = 0.005)]
        step: f64,
        /// Also lay out the winning geometry
        #[arg(long)]
        build: bool,
    },
    /// List the amateur band plan
    Bands,
    /// Optimize a Yagi at the center of every band
    Sweep {
        #[command(flatten)]
        conductor: ConductorArgs,
        #[arg(short, long, default_value_t = 3)]
        elements: usize,
        #[arg(short, long, default_value_t = 0.005)]
        step: f64,
    },
    /// Validate design file syntax and structure
    Validate {
        /// Path to the design file (YAML or JSON)
        project_path: PathBuf,
    },
    /// List designs in a design file
    Designs {
        project_path: PathBuf,
    },
    /// Evaluate a design (all designs when no ID is given)
    Run {
        project_path: PathBuf,
        design_id: Option<String>,
        /// Skip cache and force re-run
        #[arg(long)]
        no_cache: bool,
    },
    /// List cached runs for a design file
    Runs {
        project_path: PathBuf,
        /// Only runs of this design
        #[arg(long)]
        design: Option<String>,
    },
    /// Show details of a cached run
    ShowRun {
        project_path: PathBuf,
        run_id: String,
    },
}

fn main() -> AppResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let json = cli.json;
    tracing::debug!(json, "antennaflow starting");

    match cli.command {
        Commands::Monopole {
            frequency,
            conductor,
        } => {
            let record =
                calculator(&conductor).monopole(resolve_mhz(&frequency)?, diameter_m(&conductor))?;
            output(json, &record, render::print_record)
        }
        Commands::Dipole {
            frequency,
            conductor,
        } => {
            let record =
                calculator(&conductor).dipole(resolve_mhz(&frequency)?, diameter_m(&conductor))?;
            output(json, &record, render::print_record)
        }
        Commands::Yagi {
            frequency,
            conductor,
            elements,
            active,
            reflector,
            director,
            ref_spacing,
            dir_spacing,
        } => {
            let defaults = YagiFactors::default();
            let factors = YagiFactors {
                active_factor: active.unwrap_or(defaults.active_factor),
                reflector_factor: reflector.unwrap_or(defaults.reflector_factor),
                director_base_factor: director.unwrap_or(defaults.director_base_factor),
                ref_active_spacing_factor: ref_spacing
                    .unwrap_or(defaults.ref_active_spacing_factor),
                active_director_spacing_factor: dir_spacing
                    .unwrap_or(defaults.active_director_spacing_factor),
            };
            let record = calculator(&conductor).yagi(
                resolve_mhz(&frequency)?,
                elements,
                diameter_m(&conductor),
                Some(factors),
            )?;
            output(json, &record, render::print_record)
        }
        Commands::Optimize {
            frequency,
            conductor,
            elements,
            step,
            build,
        } => cmd_optimize(json, &frequency, &conductor, elements, step, build),
        Commands::Bands => cmd_bands(json),
        Commands::Sweep {
            conductor,
            elements,
            step,
        } => {
            let entries = af_app::sweep_bands(
                &calculator(&conductor),
                elements,
                step,
                diameter_m(&conductor),
            )?;
            output(json, &entries, |e| render::print_sweep(e))
        }
        Commands::Validate { project_path } => cmd_validate(&project_path),
        Commands::Designs { project_path } => cmd_designs(json, &project_path),
        Commands::Run {
            project_path,
            design_id,
            no_cache,
        } => cmd_run(json, &project_path, design_id.as_deref(), !no_cache),
        Commands::Runs {
            project_path,
            design,
        } => cmd_runs(json, &project_path, design.as_deref()),
        Commands::ShowRun {
            project_path,
            run_id,
        } => cmd_show_run(json, &project_path, &run_id),
    }
}

fn calculator(conductor: &ConductorArgs) -> Calculator {
    if conductor.thin_wire {
        Calculator::new(CorrectionMode::ThinWire)
    } else {
        Calculator::new(CorrectionMode::DiameterCorrected)
    }
}

fn diameter_m(conductor: &ConductorArgs) -> f64 {
    conductor.diameter_mm / 1000.0
}

/// Explicit frequency, named band, or the default band.
fn resolve_mhz(frequency: &FrequencyArgs) -> AppResult<f64> {
    if let Some(mhz) = frequency.freq {
        return Ok(mhz);
    }
    match &frequency.band {
        Some(name) => af_model::find_band(name)
            .map(|b| b.center_mhz)
            .ok_or_else(|| AppError::InvalidInput(format!("unknown band '{}'", name))),
        None => Ok(af_model::default_band().center_mhz),
    }
}

fn output<T: Serialize + ?Sized>(json: bool, value: &T, text: impl Fn(&T)) -> AppResult<()> {
    if json {
        let content = serde_json::to_string_pretty(value)
            .map_err(|e| AppError::Serialization(e.to_string()))?;
        println!("{}", content);
    } else {
        text(value);
    }
    Ok(())
}

fn cmd_optimize(
    json: bool,
    frequency: &FrequencyArgs,
    conductor: &ConductorArgs,
    elements: usize,
    step: f64,
    build: bool,
) -> AppResult<()> {
    let calc = calculator(conductor);
    let mhz = resolve_mhz(frequency)?;
    let diameter = diameter_m(conductor);

    let Some(optimization) = calc.optimize_yagi(mhz, elements, step, diameter)? else {
        if json {
            println!("null");
        } else {
            println!(
                "No feasible Yagi: the search needs at least 3 elements, got {}",
                elements
            );
        }
        return Ok(());
    };

    let record = if build {
        Some(calc.build_from_optimization(&optimization, diameter)?)
    } else {
        None
    };

    if json {
        #[derive(Serialize)]
        struct Optimized<'a> {
            optimization: &'a af_results::OptimizationRecord,
            #[serde(skip_serializing_if = "Option::is_none")]
            record: Option<&'a af_results::ResultRecord>,
        }
        return output(
            true,
            &Optimized {
                optimization: &optimization,
                record: record.as_ref(),
            },
            |_| {},
        );
    }

    render::print_optimization(&optimization);
    if let Some(record) = &record {
        println!();
        render::print_record(record);
    }
    Ok(())
}

fn cmd_bands(json: bool) -> AppResult<()> {
    #[derive(Serialize)]
    struct BandRow {
        name: &'static str,
        lower_mhz: f64,
        upper_mhz: f64,
        center_mhz: f64,
    }
    let rows: Vec<BandRow> = af_model::BANDS
        .iter()
        .map(|b| BandRow {
            name: b.name,
            lower_mhz: b.lower_mhz,
            upper_mhz: b.upper_mhz,
            center_mhz: b.center_mhz,
        })
        .collect();

    output(json, &rows, |rows| {
        println!("Amateur bands:");
        for row in rows {
            let default_marker = if row.name == af_model::default_band().name {
                "  (default)"
            } else {
                ""
            };
            println!(
                "  {:<5} {:>9.3} - {:>9.3} MHz  center {:>9.3} MHz{}",
                row.name, row.lower_mhz, row.upper_mhz, row.center_mhz, default_marker
            );
        }
    })
}

fn cmd_validate(project_path: &Path) -> AppResult<()> {
    println!("Validating design file: {}", project_path.display());
    let project = project_service::load_project(project_path)?;
    project_service::validate_project(&project)?;
    println!("✓ Design file is valid ({} designs)", project.designs.len());
    Ok(())
}

fn cmd_designs(json: bool, project_path: &Path) -> AppResult<()> {
    let project = project_service::load_project(project_path)?;
    let designs = project_service::list_designs(&project)?;

    output(json, &designs, |designs| {
        if designs.is_empty() {
            println!("No designs found in '{}'", project.name);
            return;
        }
        println!("Designs in '{}':", project.name);
        for d in designs {
            println!(
                "  {} - {} [{} @ {:.3} MHz{}]",
                d.id,
                d.name,
                d.antenna,
                d.frequency_mhz,
                d.band
                    .as_ref()
                    .map(|b| format!(", {}", b))
                    .unwrap_or_default()
            );
        }
    })
}

fn cmd_run(
    json: bool,
    project_path: &Path,
    design_id: Option<&str>,
    use_cache: bool,
) -> AppResult<()> {
    let options = RunOptions {
        use_cache,
        ..RunOptions::default()
    };

    let design_ids: Vec<String> = match design_id {
        Some(id) => vec![id.to_string()],
        None => project_service::load_project(project_path)?
            .designs
            .into_iter()
            .map(|d| d.id)
            .collect(),
    };

    let mut responses = Vec::with_capacity(design_ids.len());
    for id in &design_ids {
        let request = RunRequest {
            project_path,
            design_id: id,
            options: options.clone(),
        };

        let response = if json {
            run_service::ensure_run(&request)?
        } else {
            println!("Evaluating design: {}", id);
            let mut last_emit = Instant::now();
            let mut last_stage = None;
            let response = run_service::ensure_run_with_progress(
                &request,
                Some(&mut |event| {
                    let emit_now =
                        last_stage != Some(event.stage) || last_emit.elapsed().as_millis() >= 100;
                    if emit_now {
                        render_cli_progress(&event);
                        last_stage = Some(event.stage);
                        last_emit = Instant::now();
                    }
                }),
            )?;
            clear_progress_line();

            if response.loaded_from_cache {
                println!("✓ Loaded from cache: {}", response.run_id);
            } else {
                println!("✓ Run completed: {}", response.run_id);
            }
            print_timing_summary(&response.timing);
            println!();
            render::print_output(&response.output);
            println!();
            response
        };
        responses.push(response);
    }

    if json {
        #[derive(Serialize)]
        struct RunRow<'a> {
            run_id: &'a str,
            manifest: &'a af_results::RunManifest,
            loaded_from_cache: bool,
            output: &'a af_results::RunOutput,
        }
        let rows: Vec<RunRow> = responses
            .iter()
            .map(|r| RunRow {
                run_id: &r.run_id,
                manifest: &r.manifest,
                loaded_from_cache: r.loaded_from_cache,
                output: &r.output,
            })
            .collect();
        output(true, &rows, |_| {})?;
    }
    Ok(())
}

fn clear_progress_line() {
    print!("\r{}\r", " ".repeat(100));
    let _ = io::stdout().flush();
}

fn render_cli_progress(event: &RunProgressEvent) {
    match (event.stage, &event.search) {
        (RunStage::Optimizing, Some(search)) => {
            let width = 28usize;
            let fraction = search.fraction_complete();
            let filled = ((fraction * width as f64).round() as usize).min(width);
            let bar = format!(
                "{}{}",
                "#".repeat(filled),
                "-".repeat(width.saturating_sub(filled))
            );
            print!(
                "\r[{}] {:>6.2}%  {}/{} points  best={:.4}  elapsed={:.2}s",
                bar,
                fraction * 100.0,
                search.evaluated,
                search.total,
                search.best_score,
                event.elapsed_wall_s
            );
        }
        _ => {
            let spinner = ['|', '/', '-', '\\'];
            let spin_idx = ((event.elapsed_wall_s * 10.0) as usize) % spinner.len();
            let mut line = format!(
                "\r{} {}  elapsed={:.2}s",
                spinner[spin_idx],
                event.stage.label(),
                event.elapsed_wall_s
            );
            if let Some(msg) = &event.message {
                line.push_str(&format!("  {}", msg));
            }
            print!("{}", line);
        }
    }
    let _ = io::stdout().flush();
}

fn print_timing_summary(timing: &af_app::RunTimingSummary) {
    println!("Timing summary:");
    if timing.load_cache_time_s > 0.0 {
        println!("  Cache load: {:.3}s", timing.load_cache_time_s);
    } else {
        println!("  Compute: {:.3}s", timing.compute_time_s);
        println!("  Save:    {:.3}s", timing.save_time_s);
    }
    if timing.evaluations > 0 {
        println!("  Grid points: {}", timing.evaluations);
    }
    println!("  Total:   {:.3}s", timing.total_time_s);
}

fn cmd_runs(json: bool, project_path: &Path, design_id: Option<&str>) -> AppResult<()> {
    let runs = run_service::list_runs(project_path, design_id)?;

    output(json, &runs, |runs| {
        if runs.is_empty() {
            println!("No cached runs found");
            return;
        }
        println!("Cached runs:");
        for manifest in runs {
            println!(
                "  {}  {} ({}, {:.3} MHz)  {}",
                manifest.run_id,
                manifest.design_id,
                manifest.antenna,
                manifest.frequency_hz / 1e6,
                manifest.timestamp
            );
        }
    })
}

fn cmd_show_run(json: bool, project_path: &Path, run_id: &str) -> AppResult<()> {
    let (manifest, run_output) = run_service::load_run(project_path, run_id)?;

    if json {
        return output(true, &run_output, |_| {});
    }

    println!("Run {}", manifest.run_id);
    println!("  Design:  {} ({})", manifest.design_id, manifest.antenna);
    println!("  Created: {}", manifest.timestamp);
    println!("  Engine:  {}", manifest.engine_version);
    println!();
    render::print_output(&run_output);
    Ok(())
}
