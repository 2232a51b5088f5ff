#![allow(dead_code)]

use std::f64::consts::PI;
use std::sync::Arc;

use bw_airfoil::{PolarCoefficients, PolarModel, PolarSet, PolarTable};
use bw_sim::{BladeElement, BladeGeometry};

/// Smooth synthetic polar for relative thickness `tc` (%), tabulated every degree.
/// Thickness 100 is a cylinder with pure drag.
pub fn synthetic_polar(tc: f64) -> PolarTable {
    let aoa: Vec<f64> = (-180..=180).map(f64::from).collect();
    let rows = aoa
        .iter()
        .map(|&deg| {
            if tc >= 100.0 {
                return PolarCoefficients {
                    cd: 0.6,
                    ..Default::default()
                };
            }
            let a = (deg + 2.0).to_radians();
            let k = 1.0 - (tc - 24.1) / 150.0;
            let d = (deg + 2.0).abs();
            let d = d.min(360.0 - d);
            let stall = 14.0 - (tc - 24.1) / 10.0;
            let f_stat = 1.0 / (1.0 + ((d - stall) / 2.0).exp());
            let cl_inv = 2.0 * PI * k * a.sin();
            let cl_fs = 0.5 * k * (2.0 * a).sin();
            PolarCoefficients {
                cl: f_stat * cl_inv + (1.0 - f_stat) * cl_fs,
                cd: 0.006 + 0.0004 * (tc - 24.1) + (1.0 - f_stat) * 1.3 * a.sin().powi(2),
                cm: -0.05 * k * f_stat - 0.1 * (1.0 - f_stat) * a.sin(),
                f_stat,
                cl_inv,
                cl_fs,
            }
        })
        .collect();
    PolarTable::new(aoa, rows).unwrap()
}

pub fn synthetic_polar_set() -> Arc<PolarSet> {
    let tables = [24.1, 30.1, 36.0, 48.0, 60.0, 100.0]
        .into_iter()
        .map(|tc| (tc, synthetic_polar(tc)))
        .collect();
    Arc::new(PolarSet::new(tables).unwrap())
}

pub fn as_model(set: &Arc<PolarSet>) -> Arc<dyn PolarModel> {
    set.clone()
}

/// 10 MW class blade: (r, twist_deg, chord, thickness_pct).
pub const DTU_10MW_BLADE: [(f64, f64, f64, f64); 18] = [
    (2.8, 14.5, 5.38, 100.0),
    (11.0, 14.432, 5.45, 86.05),
    (16.87, 12.55, 5.866, 61.095),
    (22.96, 8.89, 6.187, 48.28),
    (32.31, 6.382, 6.021, 40.45),
    (41.57, 4.671, 5.427, 35.98),
    (50.41, 2.885, 4.702, 32.38),
    (58.53, 1.215, 4.002, 29.38),
    (65.75, -0.132, 3.397, 27.38),
    (71.97, -1.117, 2.904, 26.02),
    (77.19, -1.842, 2.536, 25.11),
    (78.33, -2.026, 2.458, 24.98),
    (80.37, -2.322, 2.314, 24.8),
    (82.37, -2.619, 2.165, 24.67),
    (84.04, -2.841, 2.034, 24.56),
    (85.4, -3.027, 1.914, 24.49),
    (86.47, -3.179, 1.795, 24.44),
    (89.166, -3.592, 0.1, 24.1),
];

pub fn dtu_blade() -> BladeGeometry {
    BladeGeometry::new(
        DTU_10MW_BLADE
            .iter()
            .map(|&(r, twist_deg, chord, thickness_pct)| BladeElement {
                r,
                twist_deg,
                chord,
                thickness_pct,
            })
            .collect(),
    )
    .unwrap()
}
