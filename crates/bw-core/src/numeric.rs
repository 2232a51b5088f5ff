use crate::BwError;

/// Floating point type used throughout system
pub type Real = f64;

/// One tolerance for everything
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, BwError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(BwError::NonFinite { what, value: v })
    }
}

/// Check that a sample grid is finite and strictly increasing with at least two points.
pub fn ensure_strictly_increasing(xs: &[Real], what: &'static str) -> Result<(), BwError> {
    if xs.len() < 2 {
        return Err(BwError::InvalidArg { what });
    }
    for x in xs {
        ensure_finite(*x, what)?;
    }
    if xs.windows(2).any(|w| w[1] <= w[0]) {
        return Err(BwError::Invariant { what });
    }
    Ok(())
}

/// Position of `x` inside a sorted grid: blend `weight` of `hi` with `1 - weight` of `lo`.
///
/// Outside the grid the bracket collapses onto the nearest end point, so
/// interpolation through it clamps instead of extrapolating.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bracket {
    pub lo: usize,
    pub hi: usize,
    pub weight: Real,
}

impl Bracket {
    pub fn blend(&self, ys: &[Real]) -> Real {
        ys[self.lo] + self.weight * (ys[self.hi] - ys[self.lo])
    }
}

/// Locate `x` in a strictly increasing, non-empty grid.
pub fn bracket(xs: &[Real], x: Real) -> Bracket {
    let last = xs.len().saturating_sub(1);
    if xs.is_empty() || x <= xs[0] {
        return Bracket {
            lo: 0,
            hi: 0,
            weight: 0.0,
        };
    }
    if x >= xs[last] {
        return Bracket {
            lo: last,
            hi: last,
            weight: 0.0,
        };
    }
    // partition_point gives the first index with xs[i] > x, which is >= 1 here
    let hi = xs.partition_point(|v| *v <= x);
    let lo = hi - 1;
    let weight = (x - xs[lo]) / (xs[hi] - xs[lo]);
    Bracket { lo, hi, weight }
}

/// Piecewise-linear interpolation, clamped to the end values outside the grid.
pub fn interp1(xs: &[Real], ys: &[Real], x: Real) -> Real {
    bracket(xs, x).blend(ys)
}

/// Composite trapezoidal rule over tabulated samples.
pub fn trapezoid(xs: &[Real], ys: &[Real]) -> Result<Real, BwError> {
    if xs.len() != ys.len() {
        return Err(BwError::LengthMismatch {
            what: "trapezoid samples",
            left: xs.len(),
            right: ys.len(),
        });
    }
    Ok(xs
        .windows(2)
        .zip(ys.windows(2))
        .map(|(x, y)| 0.5 * (x[1] - x[0]) * (y[0] + y[1]))
        .sum())
}
