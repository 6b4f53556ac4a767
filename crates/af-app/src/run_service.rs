//! Design evaluation and run caching service.

use std::path::Path;
use std::time::Instant;

use af_optimize::SearchProgress;
use af_project::schema::{AntennaDef, DesignDef, Project};
use af_results::{RunManifest, RunOutput, RunStore};
use tracing::{debug, info};

use crate::error::AppResult;
use crate::progress::{RunProgressEvent, RunStage};
use crate::project_service;

/// Version stamped into run ids; bumping it invalidates every cached run.
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Options for evaluating a design.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub use_cache: bool,
    pub engine_version: String,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            use_cache: true,
            engine_version: ENGINE_VERSION.to_string(),
        }
    }
}

/// Request to evaluate one design of a design file.
pub struct RunRequest<'a> {
    pub project_path: &'a Path,
    pub design_id: &'a str,
    pub options: RunOptions,
}

#[derive(Debug, Clone, Default)]
pub struct RunTimingSummary {
    pub compute_time_s: f64,
    pub save_time_s: f64,
    pub load_cache_time_s: f64,
    pub total_time_s: f64,
    /// Grid points scored; zero for direct calculations and cache hits.
    pub evaluations: usize,
}

#[derive(Debug, Clone)]
pub struct RunResponse {
    pub run_id: String,
    pub manifest: RunManifest,
    pub output: RunOutput,
    pub loaded_from_cache: bool,
    pub timing: RunTimingSummary,
}

fn emit_progress(
    progress_cb: &mut Option<&mut dyn FnMut(RunProgressEvent)>,
    stage: RunStage,
    started: Instant,
    message: Option<String>,
    search: Option<SearchProgress>,
) {
    if let Some(cb) = progress_cb.as_deref_mut() {
        cb(RunProgressEvent {
            stage,
            elapsed_wall_s: started.elapsed().as_secs_f64(),
            message,
            search,
        });
    }
}

/// Evaluate a design, or load it from the run cache.
pub fn ensure_run(request: &RunRequest) -> AppResult<RunResponse> {
    ensure_run_with_progress(request, None)
}

/// Evaluate a design, or load it from the run cache, streaming progress events.
pub fn ensure_run_with_progress(
    request: &RunRequest,
    mut progress_cb: Option<&mut dyn FnMut(RunProgressEvent)>,
) -> AppResult<RunResponse> {
    let started = Instant::now();
    let mut timing = RunTimingSummary::default();

    emit_progress(
        &mut progress_cb,
        RunStage::LoadingProject,
        started,
        Some("Loading design file".to_string()),
        None,
    );

    let project = project_service::load_project(request.project_path)?;
    let design = project_service::get_design(&project, request.design_id)?;

    emit_progress(
        &mut progress_cb,
        RunStage::CheckingCache,
        started,
        Some("Checking run cache".to_string()),
        None,
    );

    let run_id = af_results::compute_run_id(
        design,
        &project.defaults,
        &request.options.engine_version,
    );
    let store = RunStore::for_project(request.project_path)?;

    if request.options.use_cache && store.has_run(&run_id) {
        emit_progress(
            &mut progress_cb,
            RunStage::LoadingCachedResult,
            started,
            Some("Loading cached run".to_string()),
            None,
        );

        let load_started = Instant::now();
        let manifest = store.load_manifest(&run_id)?;
        let output = store.load_output(&run_id)?;
        timing.load_cache_time_s = load_started.elapsed().as_secs_f64();
        timing.total_time_s = started.elapsed().as_secs_f64();
        info!(run_id = %run_id, design = %design.id, "run cache hit");

        emit_progress(&mut progress_cb, RunStage::Completed, started, None, None);
        return Ok(RunResponse {
            run_id,
            manifest,
            output,
            loaded_from_cache: true,
            timing,
        });
    }
    debug!(run_id = %run_id, design = %design.id, "run cache miss");

    let stage = match design.antenna {
        AntennaDef::OptimizeYagi { .. } => RunStage::Optimizing,
        _ => RunStage::Computing,
    };
    emit_progress(
        &mut progress_cb,
        stage,
        started,
        Some(format!("Evaluating {} '{}'", design.antenna.label(), design.id)),
        None,
    );

    let compute_started = Instant::now();
    let output = {
        let mut forward = |p: SearchProgress| {
            emit_progress(&mut progress_cb, RunStage::Optimizing, started, None, Some(p));
        };
        evaluate_design(&project, design, Some(&mut forward))?
    };
    timing.compute_time_s = compute_started.elapsed().as_secs_f64();
    if let RunOutput::Optimization {
        optimization: Some(opt),
        ..
    } = &output
    {
        timing.evaluations = opt.evaluations;
    }

    emit_progress(
        &mut progress_cb,
        RunStage::SavingResults,
        started,
        Some("Saving run".to_string()),
        None,
    );

    let save_started = Instant::now();
    let frequency_mhz = project_service::resolve_frequency_mhz(&design.frequency)?;
    let manifest = RunManifest::now(
        run_id.clone(),
        &design.id,
        design.antenna.label(),
        frequency_mhz * 1e6,
        &request.options.engine_version,
    );
    store.save_run(&manifest, &output)?;
    timing.save_time_s = save_started.elapsed().as_secs_f64();
    timing.total_time_s = started.elapsed().as_secs_f64();
    info!(run_id = %run_id, design = %design.id, "run saved");

    emit_progress(&mut progress_cb, RunStage::Completed, started, None, None);

    Ok(RunResponse {
        run_id,
        manifest,
        output,
        loaded_from_cache: false,
        timing,
    })
}

/// Evaluate every design of a design file in file order.
pub fn ensure_all_runs(project_path: &Path, options: &RunOptions) -> AppResult<Vec<RunResponse>> {
    let project = project_service::load_project(project_path)?;
    project
        .designs
        .iter()
        .map(|design| {
            ensure_run(&RunRequest {
                project_path,
                design_id: &design.id,
                options: options.clone(),
            })
        })
        .collect()
}

/// Evaluate one design without touching the run cache.
pub fn evaluate_design(
    project: &Project,
    design: &DesignDef,
    progress_cb: Option<&mut dyn FnMut(SearchProgress)>,
) -> AppResult<RunOutput> {
    let calculator = project_service::calculator_for(project);
    let frequency_mhz = project_service::resolve_frequency_mhz(&design.frequency)?;
    let diameter_m = project_service::design_diameter_m(project, design);

    let output = match &design.antenna {
        AntennaDef::Monopole => RunOutput::Antenna {
            record: calculator.monopole(frequency_mhz, diameter_m)?,
        },
        AntennaDef::Dipole => RunOutput::Antenna {
            record: calculator.dipole(frequency_mhz, diameter_m)?,
        },
        AntennaDef::Yagi {
            element_count,
            factors,
        } => RunOutput::Antenna {
            record: calculator.yagi(
                frequency_mhz,
                *element_count,
                diameter_m,
                factors.as_ref().map(project_service::yagi_factors),
            )?,
        },
        AntennaDef::OptimizeYagi {
            element_count,
            step,
        } => {
            let optimization = calculator.optimize_yagi_with_progress(
                frequency_mhz,
                *element_count,
                *step,
                diameter_m,
                progress_cb,
            )?;
            let record = match &optimization {
                Some(opt) => Some(calculator.build_from_optimization(opt, diameter_m)?),
                None => None,
            };
            RunOutput::Optimization {
                optimization,
                record,
            }
        }
    };

    Ok(output)
}

/// Stored runs for a design file, oldest first.
pub fn list_runs(project_path: &Path, design_id: Option<&str>) -> AppResult<Vec<RunManifest>> {
    let store = RunStore::for_project(project_path)?;
    Ok(store.list_runs(design_id)?)
}

pub fn load_run(project_path: &Path, run_id: &str) -> AppResult<(RunManifest, RunOutput)> {
    let store = RunStore::for_project(project_path)?;
    let manifest = store.load_manifest(run_id)?;
    let output = store.load_output(run_id)?;
    Ok((manifest, output))
}
