//! Polar family tagged by relative thickness.

use bw_core::bracket;

use crate::error::{AirfoilError, AirfoilResult};
use crate::model::{PolarCoefficients, PolarModel};
use crate::table::PolarTable;

/// Polar tables sorted by relative thickness (%).
///
/// A lookup interpolates every table at the requested angle of attack, then
/// interpolates across thickness. Thickness outside the tagged range clamps
/// to the thinnest or thickest table.
#[derive(Clone, Debug)]
pub struct PolarSet {
    thickness_pct: Vec<f64>,
    tables: Vec<PolarTable>,
}

impl PolarSet {
    pub fn new(mut tables: Vec<(f64, PolarTable)>) -> AirfoilResult<Self> {
        if tables.is_empty() {
            return Err(AirfoilError::InvalidSet {
                what: "at least one polar table is required",
            });
        }
        if tables.iter().any(|(tc, _)| !tc.is_finite() || *tc <= 0.0) {
            return Err(AirfoilError::InvalidSet {
                what: "thickness ratio must be positive",
            });
        }
        tables.sort_by(|a, b| a.0.total_cmp(&b.0));
        if tables.windows(2).any(|w| w[0].0 == w[1].0) {
            return Err(AirfoilError::InvalidSet {
                what: "duplicate thickness ratio",
            });
        }
        let (thickness_pct, tables) = tables.into_iter().unzip();
        Ok(Self {
            thickness_pct,
            tables,
        })
    }

    pub fn thicknesses(&self) -> &[f64] {
        &self.thickness_pct
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn lookup(&self, aoa_deg: f64, thickness_pct: f64) -> PolarCoefficients {
        let b = bracket(&self.thickness_pct, thickness_pct);
        let lo = self.tables[b.lo].lookup(aoa_deg);
        if b.lo == b.hi {
            return lo;
        }
        lo.lerp(&self.tables[b.hi].lookup(aoa_deg), b.weight)
    }
}

impl PolarModel for PolarSet {
    fn coefficients(&self, aoa_deg: f64, thickness_pct: f64) -> PolarCoefficients {
        self.lookup(aoa_deg, thickness_pct)
    }
}
