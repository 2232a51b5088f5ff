//! Project loading, saving, validation, and introspection.

use std::path::Path;

use bw_project::ProjectError;
use bw_project::schema::{Project, StudyDef, StudyKind};

use crate::error::{AppError, AppResult};

/// Summary of a study for listing.
#[derive(Debug, Clone)]
pub struct StudySummary {
    pub id: String,
    pub name: String,
    pub kind: &'static str,
    /// Simulated span in seconds.
    pub duration_s: f64,
}

/// Load a project file (`.json` as JSON, anything else as YAML) and validate it.
pub fn load_project(path: &Path) -> AppResult<Project> {
    let project = bw_project::load_project_file(path).map_err(|e| match e {
        ProjectError::Io(source) => AppError::ProjectFileRead {
            path: path.to_path_buf(),
            source,
        },
        other => other.into(),
    })?;
    validate_project(&project)?;
    Ok(project)
}

/// Save a project in the format its extension names.
pub fn save_project(path: &Path, project: &Project) -> AppResult<()> {
    validate_project(project)?;
    bw_project::save_project_file(path, project).map_err(|e| match e {
        ProjectError::Io(source) => AppError::ProjectFileWrite {
            path: path.to_path_buf(),
            source,
        },
        other => other.into(),
    })
}

pub fn validate_project(project: &Project) -> AppResult<()> {
    bw_project::validate_project(project)?;
    if project.studies.is_empty() {
        return Err(AppError::Validation(
            "Project must have at least one study".to_string(),
        ));
    }
    Ok(())
}

pub fn list_studies(project: &Project) -> Vec<StudySummary> {
    project
        .studies
        .iter()
        .map(|study| match &study.kind {
            StudyKind::Bem(bem) => StudySummary {
                id: study.id.clone(),
                name: study.name.clone(),
                kind: "Bem",
                duration_s: bem.time.dt_s * bem.time.steps.saturating_sub(1) as f64,
            },
            StudyKind::SpringAirfoil(spring) => StudySummary {
                id: study.id.clone(),
                name: study.name.clone(),
                kind: "SpringAirfoil",
                duration_s: spring.t_end_s,
            },
        })
        .collect()
}

pub fn get_study<'a>(project: &'a Project, study_id: &str) -> AppResult<&'a StudyDef> {
    project
        .studies
        .iter()
        .find(|s| s.id == study_id)
        .ok_or_else(|| AppError::StudyNotFound(study_id.to_string()))
}
