/// Tolerances used by path reconciliation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoldingConfig {
    /// Endpoints closer than this are connected; also the maximum distance
    /// of a split point from the curve it splits.
    pub point_tolerance: f64,
    /// Margin a split parameter must keep from the ends of a curve.
    pub param_epsilon: f64,
    /// Offsets at or below this magnitude are treated as zero.
    pub offset_epsilon: f64,
}

impl Default for MoldingConfig {
    fn default() -> Self {
        Self {
            point_tolerance: 1e-6,
            param_epsilon: 1e-6,
            offset_epsilon: 1e-6,
        }
    }
}

impl MoldingConfig {
    pub fn strict() -> Self {
        Self {
            point_tolerance: 1e-9,
            param_epsilon: 1e-9,
            offset_epsilon: 1e-9,
        }
    }

    /// For paths digitized from drawings with millimetre-level drift.
    pub fn loose() -> Self {
        Self {
            point_tolerance: 1e-3,
            param_epsilon: 1e-4,
            offset_epsilon: 1e-4,
        }
    }
}
