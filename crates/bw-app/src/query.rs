//! Query helpers for extracting data from loaded runs.

use bw_results::{BladeSnapshot, TimeseriesRecord};

use crate::error::{AppError, AppResult};

/// Summary of a run's time range and content.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub time_range: (f64, f64),
    pub record_count: usize,
    pub blade_count: usize,
    pub element_count: usize,
    pub has_rotor: bool,
    pub has_airfoil: bool,
}

pub const ROTOR_VARIABLES: &[&str] = &["thrust", "power", "ct", "cp", "pitch", "blade_thrust:<b>"];
pub const ELEMENT_VARIABLES: &[&str] = &[
    "pn", "pt", "wy", "wz", "fs", "cl", "aoa", "wind", "x", "y", "z", "azimuth",
];
pub const AIRFOIL_VARIABLES: &[&str] = &["x", "v", "fs"];

pub fn get_run_summary(records: &[TimeseriesRecord]) -> AppResult<RunSummary> {
    let (Some(first), Some(last)) = (records.first(), records.last()) else {
        return Err(AppError::InvalidInput("No records in run".to_string()));
    };

    Ok(RunSummary {
        time_range: (first.time_s, last.time_s),
        record_count: records.len(),
        blade_count: first.blades.len(),
        element_count: first
            .blades
            .first()
            .map(|b| b.pn_n_per_m.len())
            .unwrap_or(0),
        has_rotor: first.rotor.is_some(),
        has_airfoil: first.airfoil.is_some(),
    })
}

/// Rotor-level time series. `blade_thrust:<b>` selects one blade's thrust.
pub fn extract_rotor_series(
    records: &[TimeseriesRecord],
    variable: &str,
) -> AppResult<Vec<(f64, f64)>> {
    if let Some(index) = variable.strip_prefix("blade_thrust:") {
        let blade: usize = index.parse().map_err(|_| {
            AppError::InvalidInput(format!("Invalid blade index in {}", variable))
        })?;
        return records
            .iter()
            .map(|r| {
                r.blades
                    .get(blade)
                    .map(|b| (r.time_s, b.thrust_n))
                    .ok_or_else(|| AppError::InvalidInput(format!("No blade {} in run", blade)))
            })
            .collect();
    }

    let mut series = Vec::with_capacity(records.len());
    for record in records {
        let Some(rotor) = &record.rotor else {
            return Err(AppError::InvalidInput("Run has no rotor data".to_string()));
        };
        let value = match variable {
            "thrust" | "thrust_n" => rotor.thrust_n,
            "power" | "power_w" => rotor.power_w,
            "ct" => rotor.ct,
            "cp" => rotor.cp,
            "pitch" | "pitch_deg" => rotor.pitch_deg,
            _ => {
                return Err(AppError::InvalidInput(format!(
                    "Unknown rotor variable: {}",
                    variable
                )));
            }
        };
        series.push((record.time_s, value));
    }

    Ok(series)
}

/// Time series of one quantity at one blade element.
pub fn extract_element_series(
    records: &[TimeseriesRecord],
    blade: usize,
    element: usize,
    variable: &str,
) -> AppResult<Vec<(f64, f64)>> {
    let select: fn(&BladeSnapshot) -> &[f64] = match variable {
        "pn" => |b| b.pn_n_per_m.as_slice(),
        "pt" => |b| b.pt_n_per_m.as_slice(),
        "wy" => |b| b.wy_m_s.as_slice(),
        "wz" => |b| b.wz_m_s.as_slice(),
        "fs" => |b| b.fs.as_slice(),
        "cl" => |b| b.cl.as_slice(),
        "aoa" | "aoa_deg" => |b| b.aoa_deg.as_slice(),
        "wind" | "wind_speed" => |b| b.wind_speed_m_s.as_slice(),
        "x" => |b| b.x_m.as_slice(),
        "y" => |b| b.y_m.as_slice(),
        "z" => |b| b.z_m.as_slice(),
        "azimuth" => {
            return records
                .iter()
                .map(|r| blade_of(r, blade).map(|b| (r.time_s, b.azimuth_rad)))
                .collect();
        }
        _ => {
            return Err(AppError::InvalidInput(format!(
                "Unknown element variable: {}",
                variable
            )));
        }
    };

    records
        .iter()
        .map(|r| {
            let b = blade_of(r, blade)?;
            select(b)
                .get(element)
                .map(|v| (r.time_s, *v))
                .ok_or_else(|| AppError::InvalidInput(format!("No element {} on blade", element)))
        })
        .collect()
}

fn blade_of(record: &TimeseriesRecord, blade: usize) -> AppResult<&BladeSnapshot> {
    record
        .blades
        .get(blade)
        .ok_or_else(|| AppError::InvalidInput(format!("No blade {} in run", blade)))
}

/// Spring airfoil time series: displacement `x`, velocity `v` or separation `fs`.
pub fn extract_airfoil_series(
    records: &[TimeseriesRecord],
    variable: &str,
) -> AppResult<Vec<(f64, f64)>> {
    let mut series = Vec::with_capacity(records.len());
    for record in records {
        let Some(airfoil) = &record.airfoil else {
            return Err(AppError::InvalidInput("Run has no airfoil data".to_string()));
        };
        let value = match variable {
            "x" | "x_m" => airfoil.x_m,
            "v" | "v_m_s" => airfoil.v_m_s,
            "fs" => airfoil.fs,
            _ => {
                return Err(AppError::InvalidInput(format!(
                    "Unknown airfoil variable: {}",
                    variable
                )));
            }
        };
        series.push((record.time_s, value));
    }
    Ok(series)
}
