//! bw-project: project file format and validation.
//!
//! A project is one YAML (or JSON) document holding the airfoil polar
//! family and any number of studies. Every load and save validates.

use std::path::Path;

pub mod schema;
pub mod validate;

pub use schema::*;
pub use validate::{LATEST_VERSION, ValidationError, validate_project};

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("invalid project: {0}")]
    Validation(#[from] ValidationError),

    #[error("project file I/O: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// On-disk encoding of a project file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProjectFormat {
    Yaml,
    Json,
}

impl ProjectFormat {
    /// `.json` is JSON, anything else is YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Yaml,
        }
    }

    pub fn parse(self, text: &str) -> ProjectResult<Project> {
        let project: Project = match self {
            Self::Yaml => serde_yaml::from_str(text)?,
            Self::Json => serde_json::from_str(text)?,
        };
        validate_project(&project)?;
        Ok(project)
    }

    pub fn render(self, project: &Project) -> ProjectResult<String> {
        validate_project(project)?;
        Ok(match self {
            Self::Yaml => serde_yaml::to_string(project)?,
            Self::Json => serde_json::to_string_pretty(project)?,
        })
    }
}

fn load_as(format: ProjectFormat, path: &Path) -> ProjectResult<Project> {
    format.parse(&std::fs::read_to_string(path)?)
}

fn save_as(format: ProjectFormat, path: &Path, project: &Project) -> ProjectResult<()> {
    let text = format.render(project)?;
    std::fs::write(path, text)?;
    Ok(())
}

pub fn load_yaml(path: &Path) -> ProjectResult<Project> {
    load_as(ProjectFormat::Yaml, path)
}

pub fn save_yaml(path: &Path, project: &Project) -> ProjectResult<()> {
    save_as(ProjectFormat::Yaml, path, project)
}

pub fn load_json(path: &Path) -> ProjectResult<Project> {
    load_as(ProjectFormat::Json, path)
}

pub fn save_json(path: &Path, project: &Project) -> ProjectResult<()> {
    save_as(ProjectFormat::Json, path, project)
}

/// Load a project, picking the format from the file extension.
pub fn load_project_file(path: &Path) -> ProjectResult<Project> {
    load_as(ProjectFormat::from_path(path), path)
}

/// Save a project, picking the format from the file extension.
pub fn save_project_file(path: &Path, project: &Project) -> ProjectResult<()> {
    save_as(ProjectFormat::from_path(path), path, project)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_follows_extension() {
        assert_eq!(ProjectFormat::from_path(Path::new("a/p.json")), ProjectFormat::Json);
        assert_eq!(ProjectFormat::from_path(Path::new("p.JSON")), ProjectFormat::Json);
        assert_eq!(ProjectFormat::from_path(Path::new("p.yaml")), ProjectFormat::Yaml);
        assert_eq!(ProjectFormat::from_path(Path::new("project")), ProjectFormat::Yaml);
    }

    #[test]
    fn malformed_text_is_a_parse_error() {
        let err = ProjectFormat::Json.parse("{ not json").unwrap_err();
        assert!(matches!(err, ProjectError::Json(_)));
    }
}
