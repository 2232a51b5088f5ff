//! Collective pitch as a pure function of simulated time.

use bw_core::{ensure_strictly_increasing, interp1};

use crate::error::{SimError, SimResult};

/// Pitch schedule. Angles in radians, times in seconds.
#[derive(Clone, Debug, PartialEq)]
pub enum PitchSchedule {
    Fixed {
        pitch_rad: f64,
    },
    /// `pitch_rad` inside `[start_s, end_s]`, zero elsewhere.
    Window {
        start_s: f64,
        end_s: f64,
        pitch_rad: f64,
    },
    /// Piecewise linear through `(t, pitch)` points, held at the ends.
    Table {
        times_s: Vec<f64>,
        pitch_rad: Vec<f64>,
    },
}

impl Default for PitchSchedule {
    fn default() -> Self {
        PitchSchedule::Fixed { pitch_rad: 0.0 }
    }
}

impl PitchSchedule {
    pub fn validate(&self) -> SimResult<()> {
        match self {
            PitchSchedule::Fixed { pitch_rad } => finite(*pitch_rad),
            PitchSchedule::Window {
                start_s,
                end_s,
                pitch_rad,
            } => {
                finite(*pitch_rad)?;
                if !(start_s.is_finite() && end_s.is_finite() && start_s <= end_s) {
                    return Err(SimError::InvalidArg {
                        what: "pitch window must satisfy start <= end",
                    });
                }
                Ok(())
            }
            PitchSchedule::Table { times_s, pitch_rad } => {
                if times_s.len() != pitch_rad.len() {
                    return Err(SimError::InvalidArg {
                        what: "pitch table times and angles differ in length",
                    });
                }
                ensure_strictly_increasing(times_s, "pitch table times").map_err(|_| {
                    SimError::InvalidArg {
                        what: "pitch table needs two or more strictly increasing times",
                    }
                })?;
                pitch_rad.iter().try_for_each(|p| finite(*p))
            }
        }
    }

    pub fn pitch_at(&self, t: f64) -> f64 {
        match self {
            PitchSchedule::Fixed { pitch_rad } => *pitch_rad,
            PitchSchedule::Window {
                start_s,
                end_s,
                pitch_rad,
            } => {
                if (*start_s..=*end_s).contains(&t) {
                    *pitch_rad
                } else {
                    0.0
                }
            }
            PitchSchedule::Table { times_s, pitch_rad } => interp1(times_s, pitch_rad, t),
        }
    }
}

fn finite(v: f64) -> SimResult<()> {
    if v.is_finite() {
        Ok(())
    } else {
        Err(SimError::InvalidArg {
            what: "pitch angle must be finite",
        })
    }
}
