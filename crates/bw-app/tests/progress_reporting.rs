//! Progress events emitted while runs execute.

mod common;

use std::fs;

use bw_app::{
    RunOptions, RunProgressEvent, RunRequest, RunResponse, RunStage, ensure_run_with_progress,
};

fn collect_events(request: &RunRequest<'_>) -> (RunResponse, Vec<RunProgressEvent>) {
    let mut events = Vec::new();
    let response = ensure_run_with_progress(request, Some(&mut |event| events.push(event)))
        .expect("run with progress should succeed");
    (response, events)
}

#[test]
fn bem_progress_reports_stages_and_fraction() {
    let project_path = common::small_project("bw_app_progress_bem");
    let request = RunRequest {
        project_path: &project_path,
        study_id: "bem-short",
        options: RunOptions {
            use_cache: false,
            ..RunOptions::default()
        },
    };

    let (response, events) = collect_events(&request);
    assert!(!response.loaded_from_cache);
    assert!(events.iter().any(|e| e.stage == RunStage::Compiling));
    assert!(events.iter().any(|e| e.stage == RunStage::SavingResults));
    assert_eq!(events.last().map(|e| e.stage), Some(RunStage::Completed));

    let fractions: Vec<f64> = events
        .iter()
        .filter(|e| e.stage == RunStage::RunningBem)
        .filter_map(|e| e.transient.as_ref())
        .map(|t| t.fraction_complete)
        .collect();
    assert!(!fractions.is_empty());
    assert!(fractions.windows(2).all(|w| w[1] >= w[0]));
    assert_eq!(fractions.last().copied(), Some(1.0));
    assert!(
        events
            .iter()
            .filter_map(|e| e.transient.as_ref())
            .all(|t| t.thrust_n.is_some())
    );
    assert!(response.timing.total_time_s > 0.0);

    let _ = fs::remove_dir_all(project_path.parent().unwrap());
}

#[test]
fn spring_progress_reaches_end_time() {
    let project_path = common::small_project("bw_app_progress_spring");
    let request = RunRequest {
        project_path: &project_path,
        study_id: "spring-short",
        options: RunOptions::default(),
    };

    let (_, events) = collect_events(&request);
    let last = events
        .iter()
        .filter(|e| e.stage == RunStage::RunningSpringAirfoil)
        .filter_map(|e| e.transient.as_ref())
        .last()
        .expect("expected transient progress");
    assert_eq!(last.step, last.total_steps);
    assert!((last.sim_time_s - 20.0).abs() < 1e-9);

    let _ = fs::remove_dir_all(project_path.parent().unwrap());
}
