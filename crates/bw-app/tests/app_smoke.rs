//! Smoke test for the bw-app service layer against the demo project.

mod common;

use bw_app::compile::{compile_bem, compile_spring};
use bw_app::{get_study, list_studies, load_project, validate_project};
use bw_project::schema::StudyKind;

#[test]
fn demo_project_loads_and_compiles() {
    let project_path = common::demo_project();
    let project = load_project(&project_path).expect("Failed to load project");
    validate_project(&project).expect("Validation should succeed");

    let studies = list_studies(&project);
    assert_eq!(studies.len(), 5);
    let baseline = studies.iter().find(|s| s.id == "bem-baseline").unwrap();
    assert_eq!(baseline.kind, "Bem");
    assert!((baseline.duration_s - 1199.0 * 0.15).abs() < 1e-9);

    for summary in &studies {
        let study = get_study(&project, &summary.id).unwrap();
        match &study.kind {
            StudyKind::Bem(def) => {
                let compiled = compile_bem(&project_path, &project, def).unwrap();
                assert!((compiled.config.rotor_speed - 0.757).abs() < 1e-3);
                assert_eq!(compiled.geometry.len(), 18);
            }
            StudyKind::SpringAirfoil(def) => {
                let compiled = compile_spring(&project_path, &project, def).unwrap();
                assert_eq!(compiled.points, 1000);
            }
        }
    }

    assert!(get_study(&project, "missing").is_err());
}

#[test]
fn missing_project_file_is_reported() {
    let err = load_project(std::path::Path::new("does/not/exist.yaml")).unwrap_err();
    assert!(matches!(err, bw_app::AppError::ProjectFileRead { .. }));
}
