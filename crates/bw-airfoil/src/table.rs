//! Single airfoil polar tabulated against angle of attack.

use std::path::Path;

use bw_core::{bracket, ensure_strictly_increasing};

use crate::error::{AirfoilError, AirfoilResult};
use crate::model::{PolarCoefficients, PolarModel};

/// Number of whitespace-separated columns in a polar file:
/// `aoa_deg cl cd cm f_stat cl_inv cl_fs`.
pub const POLAR_COLUMNS: usize = 7;

/// Polar table with strictly increasing angle of attack (degrees).
#[derive(Clone, Debug)]
pub struct PolarTable {
    aoa_deg: Vec<f64>,
    rows: Vec<[f64; 6]>,
}

impl PolarTable {
    /// Build a table from an angle grid and matching coefficient rows.
    pub fn new(aoa_deg: Vec<f64>, rows: Vec<PolarCoefficients>) -> AirfoilResult<Self> {
        if aoa_deg.len() != rows.len() {
            return Err(AirfoilError::InvalidTable {
                what: "angle grid and coefficient rows differ in length",
            });
        }
        ensure_strictly_increasing(&aoa_deg, "polar angle of attack")?;
        let rows: Vec<[f64; 6]> = rows
            .iter()
            .map(|c| [c.cl, c.cd, c.cm, c.f_stat, c.cl_inv, c.cl_fs])
            .collect();
        if rows.iter().flatten().any(|v| !v.is_finite()) {
            return Err(AirfoilError::InvalidTable {
                what: "non-finite coefficient",
            });
        }
        Ok(Self { aoa_deg, rows })
    }

    /// Parse whitespace-separated text. Blank lines and `#` comments are skipped.
    pub fn from_text(text: &str) -> AirfoilResult<Self> {
        let mut aoa = Vec::new();
        let mut rows = Vec::new();
        for (idx, raw) in text.lines().enumerate() {
            let line = raw.split('#').next().unwrap_or("").trim();
            if line.is_empty() {
                continue;
            }
            let values = parse_row(line, idx + 1)?;
            aoa.push(values[0]);
            rows.push(PolarCoefficients::from_row(&[
                values[1], values[2], values[3], values[4], values[5], values[6],
            ]));
        }
        Self::new(aoa, rows)
    }

    pub fn load(path: impl AsRef<Path>) -> AirfoilResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| AirfoilError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let table = Self::from_text(&text)?;
        tracing::debug!(path = %path.display(), rows = table.len(), "loaded polar table");
        Ok(table)
    }

    pub fn len(&self) -> usize {
        self.aoa_deg.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aoa_deg.is_empty()
    }

    /// Tabulated angle range in degrees.
    pub fn aoa_range(&self) -> (f64, f64) {
        (self.aoa_deg[0], self.aoa_deg[self.aoa_deg.len() - 1])
    }

    /// Interpolated coefficients, clamped to the end rows outside the table.
    pub fn lookup(&self, aoa_deg: f64) -> PolarCoefficients {
        let b = bracket(&self.aoa_deg, aoa_deg);
        let lo = PolarCoefficients::from_row(&self.rows[b.lo]);
        if b.lo == b.hi {
            return lo;
        }
        lo.lerp(&PolarCoefficients::from_row(&self.rows[b.hi]), b.weight)
    }
}

impl PolarModel for PolarTable {
    fn coefficients(&self, aoa_deg: f64, _thickness_pct: f64) -> PolarCoefficients {
        self.lookup(aoa_deg)
    }
}

fn parse_row(line: &str, line_no: usize) -> AirfoilResult<[f64; POLAR_COLUMNS]> {
    let mut out = [0.0; POLAR_COLUMNS];
    let mut count = 0;
    for token in line.split_whitespace() {
        if count == POLAR_COLUMNS {
            count += 1;
            break;
        }
        out[count] = token.parse::<f64>().map_err(|e| AirfoilError::Parse {
            line: line_no,
            message: format!("'{token}': {e}"),
        })?;
        count += 1;
    }
    if count != POLAR_COLUMNS {
        return Err(AirfoilError::Parse {
            line: line_no,
            message: format!("expected {POLAR_COLUMNS} columns"),
        });
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
# aoa cl cd cm f_stat cl_inv cl_fs
-10.0  -0.80  0.020  0.00  1.0  -0.90  -0.40
  0.0   0.20  0.008 -0.05  1.0   0.20   0.10

 10.0   1.20  0.015 -0.08  0.8   1.30   0.60
";

    #[test]
    fn parses_and_skips_comments() {
        let t = PolarTable::from_text(SAMPLE).unwrap();
        assert_eq!(t.len(), 3);
        assert_eq!(t.aoa_range(), (-10.0, 10.0));
    }

    #[test]
    fn lookup_interpolates_linearly() {
        let t = PolarTable::from_text(SAMPLE).unwrap();
        let c = t.lookup(5.0);
        assert!((c.cl - 0.7).abs() < 1e-12);
        assert!((c.f_stat - 0.9).abs() < 1e-12);
        assert!((c.cd - 0.0115).abs() < 1e-12);
    }

    #[test]
    fn lookup_clamps_outside_range() {
        let t = PolarTable::from_text(SAMPLE).unwrap();
        assert_eq!(t.lookup(-90.0).cl, -0.8);
        assert_eq!(t.lookup(45.0).cl, 1.2);
    }

    #[test]
    fn rejects_wrong_column_count() {
        let err = PolarTable::from_text("0.0 0.1 0.01\n").unwrap_err();
        assert!(matches!(err, AirfoilError::Parse { line: 1, .. }));

        let err = PolarTable::from_text("0 1 2 3 4 5 6 7\n1 1 2 3 4 5 6\n").unwrap_err();
        assert!(matches!(err, AirfoilError::Parse { line: 1, .. }));
    }

    #[test]
    fn rejects_bad_number() {
        let err = PolarTable::from_text("0 1 2 x 4 5 6\n1 1 2 3 4 5 6\n").unwrap_err();
        assert!(err.to_string().contains("'x'"));
    }

    #[test]
    fn rejects_non_monotonic_angles() {
        let text = "0 1 2 3 4 5 6\n0 1 2 3 4 5 6\n";
        assert!(PolarTable::from_text(text).is_err());
    }

    #[test]
    fn rejects_single_row() {
        assert!(PolarTable::from_text("0 1 2 3 4 5 6\n").is_err());
    }
}
