//! Study compilation: project definitions to simulator inputs.
//!
//! File paths are resolved relative to the project file. Angles and rotor
//! speed pass through `uom` quantities on their way to the bare SI numbers
//! the simulators take.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use bw_airfoil::{PolarModel, PolarSet, PolarTable};
use bw_core::units::{deg, rpm, to_rad, to_rad_per_s};
use bw_project::schema::{
    AirfoilDef, BemStudyDef, PitchScheduleDef, Project, SpringAirfoilStudyDef, StudyDef, StudyKind,
};
use bw_sim::{BemConfig, BladeGeometry, PitchSchedule, SpringAirfoilParams};
use tracing::debug;

use crate::error::{AppError, AppResult};

/// Everything needed to construct a `BemSimulator`.
pub struct CompiledBem {
    pub config: BemConfig,
    pub geometry: BladeGeometry,
    pub polars: Arc<dyn PolarModel>,
}

pub struct CompiledSpring {
    pub params: SpringAirfoilParams,
    pub polars: Arc<dyn PolarModel>,
    pub t_end_s: f64,
    pub points: usize,
}

/// Resolve `file` against the directory holding the project file.
pub fn resolve_path(project_path: &Path, file: &str) -> PathBuf {
    match project_path.parent() {
        Some(dir) => dir.join(file),
        None => PathBuf::from(file),
    }
}

pub fn load_polar_set(project_path: &Path, airfoils: &[AirfoilDef]) -> AppResult<PolarSet> {
    let mut tables = Vec::with_capacity(airfoils.len());
    for airfoil in airfoils {
        let path = resolve_path(project_path, &airfoil.file);
        tables.push((airfoil.thickness_pct, PolarTable::load(&path)?));
    }
    let set = PolarSet::new(tables)?;
    debug!(tables = set.len(), "loaded polar set");
    Ok(set)
}

pub fn pitch_schedule(def: &PitchScheduleDef) -> PitchSchedule {
    match def {
        PitchScheduleDef::Fixed { pitch_deg } => PitchSchedule::Fixed {
            pitch_rad: to_rad(deg(*pitch_deg)),
        },
        PitchScheduleDef::Window {
            start_s,
            end_s,
            pitch_deg,
        } => PitchSchedule::Window {
            start_s: *start_s,
            end_s: *end_s,
            pitch_rad: to_rad(deg(*pitch_deg)),
        },
        PitchScheduleDef::Table { points } => PitchSchedule::Table {
            times_s: points.iter().map(|p| p.time_s).collect(),
            pitch_rad: points.iter().map(|p| to_rad(deg(p.pitch_deg))).collect(),
        },
    }
}

/// Convert a BEM study definition into a validated `BemConfig`.
pub fn bem_config(def: &BemStudyDef) -> AppResult<BemConfig> {
    let config = BemConfig {
        blades: def.rotor.blades,
        rotor_radius: def.rotor.radius_m,
        hub_height: def.rotor.hub_height_m,
        shaft_length: def.rotor.shaft_length_m,
        rotor_speed: to_rad_per_s(rpm(def.rotor.rotor_speed_rpm)),
        tilt_rad: to_rad(deg(def.rotor.tilt_deg)),
        yaw_rad: to_rad(deg(def.rotor.yaw_deg)),
        cone_rad: to_rad(deg(def.rotor.cone_deg)),
        wind_speed: def.wind.speed_mps,
        air_density: def.wind.air_density_kg_m3,
        wind_shear_enabled: def.wind.wind_shear_enabled,
        shear_exponent: def.wind.shear_exponent,
        dt: def.time.dt_s,
        steps: def.time.steps,
        dynamic_stall_enabled: def.models.dynamic_stall_enabled,
        dynamic_wake_filter_enabled: def.models.dynamic_wake_filter_enabled,
        dynamic_wake_gain: def.models.dynamic_wake_gain,
        pitch_control_enabled: def.pitch.pitch_control_enabled,
        pitch: pitch_schedule(&def.pitch.schedule),
    };
    config.validate()?;
    Ok(config)
}

pub fn spring_params(def: &SpringAirfoilStudyDef) -> AppResult<SpringAirfoilParams> {
    let params = SpringAirfoilParams {
        mass: def.mass_kg,
        stiffness: def.stiffness_n_per_m,
        chord: def.chord_m,
        span: def.span_m,
        wind_speed: def.wind_speed_mps,
        air_density: def.air_density_kg_m3,
        geometric_aoa_rad: to_rad(deg(def.geometric_aoa_deg)),
        dynamic_stall_enabled: def.dynamic_stall_enabled,
        initial_displacement: def.initial_displacement_m,
        thickness_pct: def.thickness_pct,
    };
    params.validate()?;
    Ok(params)
}

pub fn compile_bem(
    project_path: &Path,
    project: &Project,
    def: &BemStudyDef,
) -> AppResult<CompiledBem> {
    let config = bem_config(def)?;
    let geometry = BladeGeometry::load(resolve_path(project_path, &def.blade_file))?;
    if geometry.tip_radius() > config.rotor_radius + 1e-9 {
        return Err(AppError::Compile(format!(
            "blade table reaches {} m but rotor radius is {} m",
            geometry.tip_radius(),
            config.rotor_radius
        )));
    }
    let polars = load_polar_set(project_path, &project.airfoils)?;
    Ok(CompiledBem {
        config,
        geometry,
        polars: Arc::new(polars),
    })
}

pub fn compile_spring(
    project_path: &Path,
    project: &Project,
    def: &SpringAirfoilStudyDef,
) -> AppResult<CompiledSpring> {
    let params = spring_params(def)?;
    let polars: Arc<dyn PolarModel> = match &def.airfoil_file {
        Some(file) => Arc::new(PolarTable::load(resolve_path(project_path, file))?),
        None => Arc::new(load_polar_set(project_path, &project.airfoils)?),
    };
    Ok(CompiledSpring {
        params,
        polars,
        t_end_s: def.t_end_s,
        points: def.points,
    })
}

/// Files a study reads, in a fixed order.
pub fn input_files(project_path: &Path, project: &Project, study: &StudyDef) -> Vec<PathBuf> {
    let airfoils = project
        .airfoils
        .iter()
        .map(|a| resolve_path(project_path, &a.file));
    match &study.kind {
        StudyKind::Bem(bem) => std::iter::once(resolve_path(project_path, &bem.blade_file))
            .chain(airfoils)
            .collect(),
        StudyKind::SpringAirfoil(spring) => match &spring.airfoil_file {
            Some(file) => vec![resolve_path(project_path, file)],
            None => airfoils.collect(),
        },
    }
}

/// Digest of the contents of every file the study reads.
pub fn inputs_digest(project_path: &Path, project: &Project, study: &StudyDef) -> AppResult<String> {
    let mut contents = Vec::new();
    for path in input_files(project_path, project, study) {
        let bytes = std::fs::read(&path).map_err(|e| {
            AppError::Compile(format!("failed to read {}: {}", path.display(), e))
        })?;
        contents.push(bytes);
    }
    Ok(bw_results::digest_bytes(contents.iter().map(Vec::as_slice)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bw_project::schema::*;

    fn bem_def() -> BemStudyDef {
        BemStudyDef {
            blade_file: "bladedat.txt".to_string(),
            rotor: RotorDef {
                blades: 3,
                radius_m: 89.17,
                hub_height_m: 119.0,
                shaft_length_m: 7.1,
                rotor_speed_rpm: 7.229,
                tilt_deg: -5.0,
                yaw_deg: 0.0,
                cone_deg: 0.0,
            },
            wind: WindDef {
                speed_mps: 9.0,
                air_density_kg_m3: 1.225,
                wind_shear_enabled: true,
                shear_exponent: 0.2,
            },
            time: TimeDef {
                dt_s: 0.15,
                steps: 1200,
            },
            models: ModelsDef::default(),
            pitch: PitchDef {
                pitch_control_enabled: true,
                schedule: PitchScheduleDef::Window {
                    start_s: 100.0,
                    end_s: 150.0,
                    pitch_deg: 2.0,
                },
            },
        }
    }

    #[test]
    fn bem_config_converts_units() {
        let config = bem_config(&bem_def()).unwrap();
        assert!((config.rotor_speed - 7.229 * std::f64::consts::TAU / 60.0).abs() < 1e-12);
        assert!((config.tilt_rad + 5f64.to_radians()).abs() < 1e-12);
        assert_eq!(
            config.pitch,
            PitchSchedule::Window {
                start_s: 100.0,
                end_s: 150.0,
                pitch_rad: to_rad(deg(2.0)),
            }
        );
        assert!((config.pitch_at(120.0) - 2f64.to_radians()).abs() < 1e-15);
        assert_eq!(config.pitch_at(99.0), 0.0);
    }

    #[test]
    fn bem_config_rejects_zero_dt() {
        let mut def = bem_def();
        def.time.dt_s = 0.0;
        assert!(matches!(bem_config(&def), Err(AppError::Simulation(_))));
    }

    #[test]
    fn table_schedule_keeps_points() {
        let schedule = pitch_schedule(&PitchScheduleDef::Table {
            points: vec![
                PitchPointDef {
                    time_s: 0.0,
                    pitch_deg: 0.0,
                },
                PitchPointDef {
                    time_s: 10.0,
                    pitch_deg: 4.0,
                },
            ],
        });
        assert!((schedule.pitch_at(5.0) - 2f64.to_radians()).abs() < 1e-12);
    }

    #[test]
    fn paths_resolve_next_to_project() {
        let p = resolve_path(Path::new("/data/wind/project.yaml"), "polars/a.txt");
        assert_eq!(p, PathBuf::from("/data/wind/polars/a.txt"));
    }
}
