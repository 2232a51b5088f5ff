//! Blade station table.

use std::path::Path;

use bw_core::ensure_strictly_increasing;

use crate::error::{SimError, SimResult};

/// One tabulated blade station.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BladeElement {
    /// Radial position (m)
    pub r: f64,
    /// Local twist (degrees)
    pub twist_deg: f64,
    /// Chord (m)
    pub chord: f64,
    /// Relative thickness (%)
    pub thickness_pct: f64,
}

/// Stations ordered by strictly increasing radius. The last station is the
/// tip, which carries no load.
#[derive(Clone, Debug)]
pub struct BladeGeometry {
    elements: Vec<BladeElement>,
    radii: Vec<f64>,
}

impl BladeGeometry {
    pub fn new(elements: Vec<BladeElement>) -> SimResult<Self> {
        let radii: Vec<f64> = elements.iter().map(|e| e.r).collect();
        if radii.len() < 2 {
            return Err(SimError::InvalidArg {
                what: "blade table needs at least two stations",
            });
        }
        ensure_strictly_increasing(&radii, "blade radial stations")
            .map_err(|source| SimError::Geometry { source })?;
        if radii[0] <= 0.0 {
            return Err(SimError::InvalidArg {
                what: "blade radii must be positive",
            });
        }
        for e in &elements {
            if !(e.chord.is_finite() && e.chord >= 0.0) {
                return Err(SimError::InvalidArg {
                    what: "chord must be finite and non-negative",
                });
            }
            if !e.twist_deg.is_finite() || !e.thickness_pct.is_finite() {
                return Err(SimError::InvalidArg {
                    what: "twist and thickness must be finite",
                });
            }
        }
        Ok(Self { elements, radii })
    }

    /// Parse `r twist_deg chord thickness_pct` rows. Blank lines and `#` comments are skipped.
    pub fn from_text(text: &str) -> SimResult<Self> {
        let mut elements = Vec::new();
        for (index, raw) in text.lines().enumerate() {
            let line_no = index + 1;
            let line = raw.split('#').next().unwrap_or("").trim();
            if line.is_empty() {
                continue;
            }
            let values: Vec<f64> = line
                .split_whitespace()
                .map(str::parse::<f64>)
                .collect::<Result<_, _>>()
                .map_err(|e| SimError::Parse {
                    line: line_no,
                    message: format!("'{line}': {e}"),
                })?;
            let [r, twist_deg, chord, thickness_pct] = values[..] else {
                return Err(SimError::Parse {
                    line: line_no,
                    message: format!("expected 4 columns, found {}", values.len()),
                });
            };
            elements.push(BladeElement {
                r,
                twist_deg,
                chord,
                thickness_pct,
            });
        }
        Self::new(elements)
    }

    pub fn load(path: impl AsRef<Path>) -> SimResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| SimError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_text(&text)
    }

    pub fn elements(&self) -> &[BladeElement] {
        &self.elements
    }

    pub fn radii(&self) -> &[f64] {
        &self.radii
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn tip_index(&self) -> usize {
        self.elements.len() - 1
    }

    pub fn tip_radius(&self) -> f64 {
        self.radii[self.tip_index()]
    }
}
