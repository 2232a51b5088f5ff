//! Result data types.

use serde::{Deserialize, Serialize};

pub type RunId = String;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunManifest {
    pub run_id: RunId,
    pub study_id: String,
    pub timestamp: String,
    pub run_type: RunType,
    pub solver_version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum RunType {
    Bem {
        dt_s: f64,
        steps: usize,
        blades: usize,
        /// Radial stations of the blade table (m).
        radii_m: Vec<f64>,
    },
    SpringAirfoil {
        t_end_s: f64,
        points: usize,
        dynamic_stall: bool,
    },
}

/// One stored time sample. BEM runs fill `rotor` and `blades`, spring
/// airfoil runs fill `airfoil`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimeseriesRecord {
    pub time_s: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotor: Option<RotorSnapshot>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub blades: Vec<BladeSnapshot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub airfoil: Option<AirfoilSnapshot>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RotorSnapshot {
    pub pitch_deg: f64,
    pub thrust_n: f64,
    pub power_w: f64,
    pub ct: f64,
    pub cp: f64,
}

/// Per-blade values with element distributions stored column-wise, one entry per station.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BladeSnapshot {
    pub blade: usize,
    pub azimuth_rad: f64,
    pub thrust_n: f64,
    pub pn_n_per_m: Vec<f64>,
    pub pt_n_per_m: Vec<f64>,
    pub wy_m_s: Vec<f64>,
    pub wz_m_s: Vec<f64>,
    pub fs: Vec<f64>,
    pub cl: Vec<f64>,
    pub aoa_deg: Vec<f64>,
    pub wind_speed_m_s: Vec<f64>,
    pub x_m: Vec<f64>,
    pub y_m: Vec<f64>,
    pub z_m: Vec<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AirfoilSnapshot {
    pub x_m: f64,
    pub v_m_s: f64,
    pub fs: f64,
}
