//! Project validation logic.

use crate::schema::{
    BemStudyDef, PitchScheduleDef, Project, SpringAirfoilStudyDef, StudyDef, StudyKind,
};
use std::collections::HashSet;

pub const LATEST_VERSION: u32 = 1;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Missing reference: {id} in {context}")]
    MissingReference { id: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_project(project: &Project) -> Result<(), ValidationError> {
    if project.version == 0 || project.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: project.version,
        });
    }

    let mut thicknesses = HashSet::new();
    for airfoil in &project.airfoils {
        positive("airfoils.thickness_pct", airfoil.thickness_pct)?;
        if !thicknesses.insert(airfoil.thickness_pct.to_bits()) {
            return Err(ValidationError::DuplicateId {
                id: airfoil.thickness_pct.to_string(),
                context: "airfoil thickness".to_string(),
            });
        }
        if airfoil.file.trim().is_empty() {
            return Err(invalid("airfoils.file", "", "path must not be empty"));
        }
    }

    let mut study_ids = HashSet::new();
    for study in &project.studies {
        if !study_ids.insert(&study.id) {
            return Err(ValidationError::DuplicateId {
                id: study.id.clone(),
                context: "studies".to_string(),
            });
        }
        validate_study(project, study)?;
    }

    Ok(())
}

fn validate_study(project: &Project, study: &StudyDef) -> Result<(), ValidationError> {
    match &study.kind {
        StudyKind::Bem(bem) => {
            if project.airfoils.is_empty() {
                return Err(ValidationError::MissingReference {
                    id: study.id.clone(),
                    context: "BEM study needs project airfoils".to_string(),
                });
            }
            validate_bem(bem)
        }
        StudyKind::SpringAirfoil(spring) => {
            if spring.airfoil_file.is_none() && project.airfoils.is_empty() {
                return Err(ValidationError::MissingReference {
                    id: study.id.clone(),
                    context: "spring airfoil study needs airfoil_file or project airfoils"
                        .to_string(),
                });
            }
            validate_spring(spring)
        }
    }
}

fn validate_bem(bem: &BemStudyDef) -> Result<(), ValidationError> {
    if bem.blade_file.trim().is_empty() {
        return Err(invalid("blade_file", "", "path must not be empty"));
    }
    if bem.rotor.blades == 0 {
        return Err(invalid("rotor.blades", "0", "must be at least 1"));
    }
    positive("rotor.radius_m", bem.rotor.radius_m)?;
    positive("rotor.hub_height_m", bem.rotor.hub_height_m)?;
    finite("rotor.shaft_length_m", bem.rotor.shaft_length_m)?;
    finite("rotor.rotor_speed_rpm", bem.rotor.rotor_speed_rpm)?;
    finite("rotor.tilt_deg", bem.rotor.tilt_deg)?;
    finite("rotor.yaw_deg", bem.rotor.yaw_deg)?;
    finite("rotor.cone_deg", bem.rotor.cone_deg)?;

    positive("wind.speed_mps", bem.wind.speed_mps)?;
    positive("wind.air_density_kg_m3", bem.wind.air_density_kg_m3)?;
    finite("wind.shear_exponent", bem.wind.shear_exponent)?;

    positive("time.dt_s", bem.time.dt_s)?;
    if bem.time.steps == 0 {
        return Err(invalid("time.steps", "0", "must be at least 1"));
    }
    finite("models.dynamic_wake_gain", bem.models.dynamic_wake_gain)?;

    match &bem.pitch.schedule {
        PitchScheduleDef::Fixed { pitch_deg } => finite("pitch.schedule.pitch_deg", *pitch_deg),
        PitchScheduleDef::Window {
            start_s,
            end_s,
            pitch_deg,
        } => {
            finite("pitch.schedule.pitch_deg", *pitch_deg)?;
            finite("pitch.schedule.start_s", *start_s)?;
            finite("pitch.schedule.end_s", *end_s)?;
            if start_s > end_s {
                return Err(invalid(
                    "pitch.schedule.end_s",
                    &end_s.to_string(),
                    "must not precede start_s",
                ));
            }
            Ok(())
        }
        PitchScheduleDef::Table { points } => {
            if points.len() < 2 {
                return Err(invalid(
                    "pitch.schedule.points",
                    &points.len().to_string(),
                    "needs at least two points",
                ));
            }
            for p in points {
                finite("pitch.schedule.points.time_s", p.time_s)?;
                finite("pitch.schedule.points.pitch_deg", p.pitch_deg)?;
            }
            if points.windows(2).any(|w| w[1].time_s <= w[0].time_s) {
                return Err(invalid(
                    "pitch.schedule.points",
                    "",
                    "times must be strictly increasing",
                ));
            }
            Ok(())
        }
    }
}

fn validate_spring(spring: &SpringAirfoilStudyDef) -> Result<(), ValidationError> {
    positive("thickness_pct", spring.thickness_pct)?;
    positive("mass_kg", spring.mass_kg)?;
    positive("stiffness_n_per_m", spring.stiffness_n_per_m)?;
    positive("chord_m", spring.chord_m)?;
    positive("span_m", spring.span_m)?;
    positive("wind_speed_mps", spring.wind_speed_mps)?;
    positive("air_density_kg_m3", spring.air_density_kg_m3)?;
    finite("geometric_aoa_deg", spring.geometric_aoa_deg)?;
    finite("initial_displacement_m", spring.initial_displacement_m)?;
    positive("t_end_s", spring.t_end_s)?;
    if spring.points < 2 {
        return Err(invalid(
            "points",
            &spring.points.to_string(),
            "needs at least two output points",
        ));
    }
    Ok(())
}

fn invalid(field: &str, value: &str, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn positive(field: &str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, &value.to_string(), "must be positive"))
    }
}

fn finite(field: &str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, &value.to_string(), "must be finite"))
    }
}
