use serde::{Deserialize, Serialize};
use sweep_kernel::{Point3d, TrimmedCurve};

/// Smallest fraction of the base curve a split fragment may span.
const MIN_FRACTION: f64 = 1e-6;

/// A fragment of a molding path: the part of a base curve between the
/// fractions `from` and `to` of its parameter domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopoPather {
    /// Position of the fragment along its host outline.
    pub index: usize,
    /// Auxiliary fragments patch gaps, such as door reveals.
    pub is_aux: bool,
    pub from: f64,
    pub to: f64,
    /// Base curve, in un-offset space.
    pub curve: TrimmedCurve,
}

impl TopoPather {
    /// A fragment covering the whole of `curve`.
    pub fn new(curve: TrimmedCurve, index: usize, is_aux: bool) -> Self {
        Self {
            index,
            is_aux,
            from: 0.0,
            to: 1.0,
            curve,
        }
    }

    pub fn with_range(mut self, from: f64, to: f64) -> Self {
        self.from = from;
        self.to = to;
        self
    }

    /// The realized sweep curve, a fresh value on every call. `None` when
    /// the fragment spans nothing.
    pub fn sweep_path(&self) -> Option<TrimmedCurve> {
        if self.from >= self.to {
            return None;
        }
        Some(
            self.curve
                .with_range(self.param_at_fraction(self.from), self.param_at_fraction(self.to)),
        )
    }

    /// Fraction of the base curve's domain at the point's closest parameter.
    /// NaN for a base curve with an empty domain.
    pub fn fraction_at(&self, p: &Point3d) -> f64 {
        let (t0, t1) = (self.curve.start_param(), self.curve.end_param());
        (self.curve.param_at(p) - t0) / (t1 - t0)
    }

    fn param_at_fraction(&self, f: f64) -> f64 {
        let (t0, t1) = (self.curve.start_param(), self.curve.end_param());
        t0 + f * (t1 - t0)
    }

    /// Cut the fragment at the given points. Points that fall outside the
    /// open range `(from, to)` are ignored, so one interior point yields two
    /// fragments and no interior point yields a copy of `self`.
    pub fn split_by_points(&self, points: &[Point3d]) -> Vec<TopoPather> {
        let mut cuts: Vec<f64> = points
            .iter()
            .map(|p| self.fraction_at(p))
            .filter(|&f| f - self.from > MIN_FRACTION && self.to - f > MIN_FRACTION)
            .collect();
        cuts.sort_by(f64::total_cmp);
        cuts.dedup_by(|a, b| (*a - *b).abs() <= MIN_FRACTION);

        let mut bounds = Vec::with_capacity(cuts.len() + 2);
        bounds.push(self.from);
        bounds.extend(cuts);
        bounds.push(self.to);
        bounds
            .windows(2)
            .map(|w| self.clone().with_range(w[0], w[1]))
            .collect()
    }
}
