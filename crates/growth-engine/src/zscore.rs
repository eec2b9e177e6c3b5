//! Z-score transforms.
//!
//! Two strategies, chosen by the shape of the reference table:
//!
//! - **LMS**: the WHO Box-Cox transform of a measurement given the row's
//!   L, M and S parameters.
//! - **Boundary interpolation**: piecewise-linear interpolation across the
//!   seven `(height, Z)` control points at Z = -3..+3.
//!
//! Both run in either direction (height to Z and Z to height). Outside the
//! outermost control points the interpolation extrapolates linearly using
//! the slope of the nearest segment; nothing is clamped.

use growth_model::{BoundaryRow, LmsRow};

/// |L| below this is treated as the L = 0 (log) case.
pub const SKEWNESS_EPSILON: f64 = 1e-12;

/// Z-score of `height` against an LMS row.
///
/// `L != 0`: `((X / M)^L - 1) / (L * S)`; `L == 0`: `ln(X / M) / S`.
pub fn lms_z(row: &LmsRow, height: f64) -> f64 {
    let ratio = height / row.m;
    if row.l.abs() < SKEWNESS_EPSILON {
        ratio.ln() / row.s
    } else {
        (ratio.powf(row.l) - 1.0) / (row.l * row.s)
    }
}

/// Height at score `z` for an LMS row.
///
/// `L != 0`: `M * (1 + L * S * z)^(1 / L)`; `L == 0`: `M * exp(S * z)`.
/// Returns `None` when `1 + L * S * z` is not positive (the Box-Cox curve
/// has no height for that score).
pub fn lms_height(row: &LmsRow, z: f64) -> Option<f64> {
    if row.l.abs() < SKEWNESS_EPSILON {
        return Some(row.m * (row.s * z).exp());
    }
    let base = 1.0 + row.l * row.s * z;
    if base <= 0.0 {
        return None;
    }
    Some(row.m * base.powf(1.0 / row.l))
}

/// Evaluates the polyline through `points` (ascending, strictly increasing
/// in x) at `x`, extending the first and last segments beyond the ends.
///
/// Needs at least two points; fewer returns NaN.
pub fn piecewise_linear(points: &[(f64, f64)], x: f64) -> f64 {
    if points.len() < 2 {
        return f64::NAN;
    }
    let last_segment = points.len() - 2;
    let segment = (0..=last_segment)
        .find(|&idx| x <= points[idx + 1].0)
        .unwrap_or(last_segment);
    let (x0, y0) = points[segment];
    let (x1, y1) = points[segment + 1];
    y0 + (x - x0) * (y1 - y0) / (x1 - x0)
}

/// Z-score of `height` by interpolating the row's boundary heights.
pub fn boundary_z(row: &BoundaryRow, height: f64) -> f64 {
    piecewise_linear(&row.control_points(), height)
}

/// Height at score `z` by interpolating the row's boundary heights.
pub fn boundary_height(row: &BoundaryRow, z: f64) -> f64 {
    let points = row.control_points().map(|(height, level)| (level, height));
    piecewise_linear(&points, z)
}
