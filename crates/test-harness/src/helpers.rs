//! Helper functions: error type, profile builders, path and fragment builders.

use molding::TopoPather;
use sweep_kernel::{OperationError, PathSegment, Point3d, Profile, TrimmedCurve};

// ── Error Type ──────────────────────────────────────────────────────────────

/// Unified error type for the test harness.
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    #[error("sweep failed: {0}")]
    Sweep(#[from] OperationError),

    #[error("degenerate segment from {from:?} to {to:?}")]
    DegenerateSegment { from: (f64, f64, f64), to: (f64, f64, f64) },

    #[error("assertion failed: {detail}")]
    AssertionFailed { detail: String },

    #[error("oracle failure ({oracle}): {detail}")]
    OracleFailure { oracle: String, detail: String },

    #[error("format error: {0}")]
    Format(String),
}

// ── Profile Builders ────────────────────────────────────────────────────────

/// Six-curve cornice profile with a light slot: curve 4 is the slot's
/// closing wall and point 5 sits where it meets the top curve 5.
pub fn light_slot_profile() -> Profile {
    Profile::polygon(&[
        (0.0, 0.0),
        (10.0, 0.0),
        (10.0, 5.0),
        (6.0, 5.0),
        (6.0, 8.0),
        (0.0, 8.0),
    ])
}

/// Plain rectangular profile with curves 1..=4.
pub fn rect_profile(w: f64, h: f64) -> Profile {
    Profile::polygon(&[(0.0, 0.0), (w, 0.0), (w, h), (0.0, h)])
}

// ── Path Builders ───────────────────────────────────────────────────────────

pub fn line(a: (f64, f64, f64), b: (f64, f64, f64)) -> Result<TrimmedCurve, HarnessError> {
    TrimmedCurve::line(Point3d::new(a.0, a.1, a.2), Point3d::new(b.0, b.1, b.2))
        .ok_or(HarnessError::DegenerateSegment { from: a, to: b })
}

/// Open polyline through `points` at height `z`.
pub fn polyline(points: &[(f64, f64)], z: f64) -> Result<Vec<TrimmedCurve>, HarnessError> {
    points
        .windows(2)
        .map(|w| line((w[0].0, w[0].1, z), (w[1].0, w[1].1, z)))
        .collect()
}

/// Polyline sweep path whose segments are tagged `s0`, `s1`, ...
pub fn tagged_path(points: &[(f64, f64)]) -> Result<Vec<PathSegment>, HarnessError> {
    Ok(polyline(points, 0.0)?
        .into_iter()
        .enumerate()
        .map(|(i, c)| PathSegment::tagged(c, format!("s{i}")))
        .collect())
}

/// Straight path along +X made of `segments` segments of length `len`.
pub fn straight_points(segments: usize, len: f64) -> Vec<(f64, f64)> {
    (0..=segments).map(|i| (len * i as f64, 0.0)).collect()
}

/// L-shaped corner: along +X then +Y.
pub fn l_points(a: f64, b: f64) -> Vec<(f64, f64)> {
    vec![(0.0, 0.0), (a, 0.0), (a, b)]
}

/// One whole-curve fragment per polyline segment, indexed in order.
pub fn pathers_along(points: &[(f64, f64)], z: f64) -> Result<Vec<TopoPather>, HarnessError> {
    Ok(polyline(points, z)?
        .into_iter()
        .enumerate()
        .map(|(i, c)| TopoPather::new(c, i, false))
        .collect())
}
