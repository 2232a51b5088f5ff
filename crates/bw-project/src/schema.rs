//! Project schema definitions.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    pub version: u32,
    pub name: String,
    /// Polar tables tagged by relative thickness. Paths are relative to the project file.
    #[serde(default)]
    pub airfoils: Vec<AirfoilDef>,
    #[serde(default)]
    pub studies: Vec<StudyDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AirfoilDef {
    pub thickness_pct: f64,
    pub file: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StudyDef {
    pub id: String,
    pub name: String,
    pub kind: StudyKind,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum StudyKind {
    Bem(BemStudyDef),
    SpringAirfoil(SpringAirfoilStudyDef),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BemStudyDef {
    /// Blade table (`r twist_deg chord thickness_pct`), relative to the project file.
    pub blade_file: String,
    pub rotor: RotorDef,
    pub wind: WindDef,
    pub time: TimeDef,
    #[serde(default)]
    pub models: ModelsDef,
    #[serde(default)]
    pub pitch: PitchDef,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RotorDef {
    #[serde(default = "default_blades")]
    pub blades: usize,
    pub radius_m: f64,
    pub hub_height_m: f64,
    #[serde(default)]
    pub shaft_length_m: f64,
    pub rotor_speed_rpm: f64,
    #[serde(default)]
    pub tilt_deg: f64,
    #[serde(default)]
    pub yaw_deg: f64,
    #[serde(default)]
    pub cone_deg: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WindDef {
    pub speed_mps: f64,
    #[serde(default = "default_air_density")]
    pub air_density_kg_m3: f64,
    #[serde(default)]
    pub wind_shear_enabled: bool,
    #[serde(default = "default_shear_exponent")]
    pub shear_exponent: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimeDef {
    pub dt_s: f64,
    /// Stored steps including the initial condition.
    pub steps: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelsDef {
    #[serde(default = "default_true")]
    pub dynamic_stall_enabled: bool,
    #[serde(default = "default_true")]
    pub dynamic_wake_filter_enabled: bool,
    #[serde(default = "default_wake_gain")]
    pub dynamic_wake_gain: f64,
}

impl Default for ModelsDef {
    fn default() -> Self {
        Self {
            dynamic_stall_enabled: true,
            dynamic_wake_filter_enabled: true,
            dynamic_wake_gain: default_wake_gain(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PitchDef {
    #[serde(default)]
    pub pitch_control_enabled: bool,
    #[serde(default)]
    pub schedule: PitchScheduleDef,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum PitchScheduleDef {
    Fixed {
        pitch_deg: f64,
    },
    Window {
        start_s: f64,
        end_s: f64,
        pitch_deg: f64,
    },
    Table {
        points: Vec<PitchPointDef>,
    },
}

impl Default for PitchScheduleDef {
    fn default() -> Self {
        PitchScheduleDef::Fixed { pitch_deg: 0.0 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PitchPointDef {
    pub time_s: f64,
    pub pitch_deg: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SpringAirfoilStudyDef {
    /// Single polar file. When absent the project airfoil set is used at `thickness_pct`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub airfoil_file: Option<String>,
    #[serde(default = "default_thickness")]
    pub thickness_pct: f64,
    pub mass_kg: f64,
    pub stiffness_n_per_m: f64,
    pub chord_m: f64,
    #[serde(default = "default_span")]
    pub span_m: f64,
    pub wind_speed_mps: f64,
    #[serde(default = "default_air_density")]
    pub air_density_kg_m3: f64,
    #[serde(default)]
    pub geometric_aoa_deg: f64,
    #[serde(default)]
    pub dynamic_stall_enabled: bool,
    #[serde(default = "default_initial_displacement")]
    pub initial_displacement_m: f64,
    #[serde(default = "default_t_end")]
    pub t_end_s: f64,
    #[serde(default = "default_points")]
    pub points: usize,
}

fn default_true() -> bool {
    true
}

fn default_blades() -> usize {
    3
}

fn default_air_density() -> f64 {
    1.225
}

fn default_shear_exponent() -> f64 {
    0.2
}

fn default_wake_gain() -> f64 {
    0.6
}

fn default_thickness() -> f64 {
    24.1
}

fn default_span() -> f64 {
    1.0
}

fn default_initial_displacement() -> f64 {
    0.02
}

fn default_t_end() -> f64 {
    40.0
}

fn default_points() -> usize {
    1000
}
