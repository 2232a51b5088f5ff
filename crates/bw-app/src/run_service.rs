//! Run execution and caching service.

use std::path::Path;
use std::time::Instant;

use bw_project::schema::StudyKind;
use bw_results::{
    AirfoilSnapshot, BladeSnapshot, RotorSnapshot, RunManifest, RunStore, RunType,
    TimeseriesRecord,
};
use bw_sim::{
    BemHistory, BemProgress, BemSimulator, SimOptions, SimProgress, SimRecord, SpringAirfoil,
    SpringState, run_sim_with_progress,
};
use tracing::info;

use crate::compile;
use crate::error::AppResult;
use crate::progress::{RunProgressEvent, RunStage, TransientProgress};
use crate::project_service;

/// Options for running simulations.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub use_cache: bool,
    pub solver_version: String,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            use_cache: true,
            solver_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Request to execute a run.
pub struct RunRequest<'a> {
    pub project_path: &'a Path,
    pub study_id: &'a str,
    pub options: RunOptions,
}

/// Wall-clock timing of a run.
#[derive(Debug, Clone, Default)]
pub struct RunTimingSummary {
    pub compile_time_s: f64,
    pub solve_time_s: f64,
    pub save_time_s: f64,
    pub load_cache_time_s: f64,
    pub total_time_s: f64,
    pub steps: usize,
}

/// Response from a run execution.
#[derive(Debug, Clone)]
pub struct RunResponse {
    pub run_id: String,
    pub manifest: RunManifest,
    pub loaded_from_cache: bool,
    pub timing: RunTimingSummary,
}

type ProgressCallback<'a> = Option<&'a mut dyn FnMut(RunProgressEvent)>;

fn emit_progress(
    progress_cb: &mut ProgressCallback<'_>,
    stage: RunStage,
    started: Instant,
    message: Option<String>,
    transient: Option<TransientProgress>,
) {
    if let Some(cb) = progress_cb.as_deref_mut() {
        cb(RunProgressEvent {
            stage,
            elapsed_wall_s: started.elapsed().as_secs_f64(),
            message,
            transient,
        });
    }
}

/// Execute or load a run based on request.
pub fn ensure_run(request: &RunRequest) -> AppResult<RunResponse> {
    ensure_run_with_progress(request, None)
}

/// Execute or load a run and stream progress events.
pub fn ensure_run_with_progress(
    request: &RunRequest,
    mut progress_cb: ProgressCallback<'_>,
) -> AppResult<RunResponse> {
    let started = Instant::now();
    let mut timing = RunTimingSummary::default();

    emit_progress(
        &mut progress_cb,
        RunStage::LoadingProject,
        started,
        Some("Loading project".to_string()),
        None,
    );

    let project = project_service::load_project(request.project_path)?;
    let study = project_service::get_study(&project, request.study_id)?;

    emit_progress(
        &mut progress_cb,
        RunStage::CheckingCache,
        started,
        Some("Checking run cache".to_string()),
        None,
    );

    let digest = compile::inputs_digest(request.project_path, &project, study)?;
    let run_id = bw_results::compute_run_id(
        study,
        &project.airfoils,
        &digest,
        &request.options.solver_version,
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
        timing.load_cache_time_s = load_started.elapsed().as_secs_f64();
        timing.total_time_s = started.elapsed().as_secs_f64();
        info!(run_id = %run_id, study = %study.id, "loaded cached run");

        emit_progress(
            &mut progress_cb,
            RunStage::Completed,
            started,
            Some("Loaded cached run".to_string()),
            None,
        );

        return Ok(RunResponse {
            run_id,
            manifest,
            loaded_from_cache: true,
            timing,
        });
    }

    let (run_type, records) = match &study.kind {
        StudyKind::Bem(def) => {
            emit_progress(
                &mut progress_cb,
                RunStage::Compiling,
                started,
                Some("Compiling BEM study".to_string()),
                None,
            );
            let compile_started = Instant::now();
            let compiled = compile::compile_bem(request.project_path, &project, def)?;
            timing.compile_time_s = compile_started.elapsed().as_secs_f64();
            execute_bem(compiled, &mut progress_cb, started, &mut timing)?
        }
        StudyKind::SpringAirfoil(def) => {
            emit_progress(
                &mut progress_cb,
                RunStage::Compiling,
                started,
                Some("Compiling spring airfoil study".to_string()),
                None,
            );
            let compile_started = Instant::now();
            let compiled = compile::compile_spring(request.project_path, &project, def)?;
            timing.compile_time_s = compile_started.elapsed().as_secs_f64();
            execute_spring(compiled, &mut progress_cb, started, &mut timing)?
        }
    };

    let manifest = RunManifest {
        run_id: run_id.clone(),
        study_id: study.id.clone(),
        timestamp: bw_results::now_timestamp(),
        run_type,
        solver_version: request.options.solver_version.clone(),
    };

    emit_progress(
        &mut progress_cb,
        RunStage::SavingResults,
        started,
        Some("Saving run output".to_string()),
        None,
    );

    let save_started = Instant::now();
    store.save_run(&manifest, &records)?;
    timing.save_time_s = save_started.elapsed().as_secs_f64();
    timing.total_time_s = started.elapsed().as_secs_f64();
    info!(
        run_id = %run_id,
        study = %study.id,
        records = records.len(),
        total_s = timing.total_time_s,
        "run saved"
    );

    emit_progress(
        &mut progress_cb,
        RunStage::Completed,
        started,
        Some("Run completed".to_string()),
        None,
    );

    Ok(RunResponse {
        run_id,
        manifest,
        loaded_from_cache: false,
        timing,
    })
}

fn execute_bem(
    compiled: compile::CompiledBem,
    progress_cb: &mut ProgressCallback<'_>,
    started: Instant,
    timing: &mut RunTimingSummary,
) -> AppResult<(RunType, Vec<TimeseriesRecord>)> {
    let dt = compiled.config.dt;
    let steps = compiled.config.steps;
    let t_end_s = dt * steps.saturating_sub(1) as f64;
    let mut sim = BemSimulator::new(compiled.config, compiled.geometry, compiled.polars)?;

    emit_progress(
        progress_cb,
        RunStage::RunningBem,
        started,
        Some("Running BEM time march".to_string()),
        None,
    );

    let solve_started = Instant::now();
    let report_every = (steps / 100).max(1);
    sim.run_with_progress(report_every, &mut |p: BemProgress| {
        emit_progress(
            progress_cb,
            RunStage::RunningBem,
            started,
            None,
            Some(TransientProgress {
                sim_time_s: p.time_s,
                t_end_s,
                fraction_complete: (p.step + 1) as f64 / p.total_steps as f64,
                step: p.step,
                total_steps: p.total_steps,
                thrust_n: Some(p.thrust),
                power_w: Some(p.power),
            }),
        );
    })?;
    timing.solve_time_s = solve_started.elapsed().as_secs_f64();
    timing.steps = steps;

    let history = sim.into_history();
    let run_type = RunType::Bem {
        dt_s: dt,
        steps,
        blades: history.blades(),
        radii_m: history.radii.clone(),
    };
    Ok((run_type, bem_records(&history)))
}

fn execute_spring(
    compiled: compile::CompiledSpring,
    progress_cb: &mut ProgressCallback<'_>,
    started: Instant,
    timing: &mut RunTimingSummary,
) -> AppResult<(RunType, Vec<TimeseriesRecord>)> {
    let dynamic_stall = compiled.params.dynamic_stall_enabled;
    let mut model = SpringAirfoil::new(compiled.params, compiled.polars)?;
    let opts = SimOptions::uniform(compiled.t_end_s, compiled.points);
    let t_end_s = compiled.t_end_s;

    emit_progress(
        progress_cb,
        RunStage::RunningSpringAirfoil,
        started,
        Some("Integrating spring airfoil".to_string()),
        None,
    );

    let solve_started = Instant::now();
    let record = run_sim_with_progress(
        &mut model,
        &opts,
        Some(&mut |p: SimProgress| {
            emit_progress(
                progress_cb,
                RunStage::RunningSpringAirfoil,
                started,
                None,
                Some(TransientProgress {
                    sim_time_s: p.t,
                    t_end_s,
                    fraction_complete: p.step as f64 / p.total_steps.max(1) as f64,
                    step: p.step,
                    total_steps: p.total_steps,
                    thrust_n: None,
                    power_w: None,
                }),
            );
        }),
    )?;
    timing.solve_time_s = solve_started.elapsed().as_secs_f64();
    timing.steps = record.t.len().saturating_sub(1);

    let run_type = RunType::SpringAirfoil {
        t_end_s,
        points: compiled.points,
        dynamic_stall,
    };
    Ok((run_type, spring_records(&record)))
}

/// One record per stored step with rotor totals and every blade's element columns.
pub fn bem_records(history: &BemHistory) -> Vec<TimeseriesRecord> {
    (0..history.steps())
        .map(|n| {
            let sample = &history.rotor[n];
            let blades = (0..history.blades())
                .map(|b| {
                    let slab = history.elements.blade(n, b);
                    let column = |f: fn(&bw_sim::ElementState) -> f64| -> Vec<f64> {
                        slab.iter().map(f).collect()
                    };
                    BladeSnapshot {
                        blade: b,
                        azimuth_rad: history.azimuth.get(n, b),
                        thrust_n: history.blade_thrust.get(n, b),
                        pn_n_per_m: column(|e| e.pn),
                        pt_n_per_m: column(|e| e.pt),
                        wy_m_s: column(|e| e.induced[0]),
                        wz_m_s: column(|e| e.induced[1]),
                        fs: column(|e| e.fs),
                        cl: column(|e| e.cl),
                        aoa_deg: column(|e| e.aoa_deg),
                        wind_speed_m_s: column(|e| e.wind_speed),
                        x_m: column(|e| e.position.x),
                        y_m: column(|e| e.position.y),
                        z_m: column(|e| e.position.z),
                    }
                })
                .collect();
            TimeseriesRecord {
                time_s: sample.time_s,
                rotor: Some(RotorSnapshot {
                    pitch_deg: sample.pitch_rad.to_degrees(),
                    thrust_n: sample.thrust,
                    power_w: sample.power,
                    ct: sample.ct,
                    cp: sample.cp,
                }),
                blades,
                airfoil: None,
            }
        })
        .collect()
}

pub fn spring_records(record: &SimRecord<SpringState>) -> Vec<TimeseriesRecord> {
    record
        .t
        .iter()
        .zip(&record.x)
        .map(|(t, s)| TimeseriesRecord {
            time_s: *t,
            rotor: None,
            blades: Vec::new(),
            airfoil: Some(AirfoilSnapshot {
                x_m: s.x,
                v_m_s: s.v,
                fs: s.fs,
            }),
        })
        .collect()
}

/// Runs of a study, most recent first.
pub fn list_runs(project_path: &Path, study_id: &str) -> AppResult<Vec<RunManifest>> {
    let store = RunStore::for_project(project_path)?;

    let mut runs = store.list_runs(study_id)?;
    runs.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    Ok(runs)
}

/// Load a specific run.
pub fn load_run(
    project_path: &Path,
    run_id: &str,
) -> AppResult<(RunManifest, Vec<TimeseriesRecord>)> {
    let store = RunStore::for_project(project_path)?;

    let manifest = store.load_manifest(run_id)?;
    let records = store.load_timeseries(run_id)?;

    Ok((manifest, records))
}
