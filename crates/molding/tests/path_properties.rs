//! Property tests for path sorting and offset handling.

use proptest::prelude::*;

use molding::{sort_paths, Molding, MoldingConfig, MoldingParams, TopoPather};
use sweep_kernel::{Point3d, TrimmedCurve, Vec3};
use topo_types::{Diagnostics, MoldingKind};

/// An open polyline with `n` segments that never revisits a point: x grows
/// strictly, y wanders.
fn polyline(start: (f64, f64), steps: &[(f64, f64)]) -> Vec<TrimmedCurve> {
    let mut at = Point3d::new(start.0, start.1, 0.0);
    steps
        .iter()
        .map(|&(dx, dy)| {
            let next = Point3d::new(at.x + dx, at.y + dy, 0.0);
            let c = TrimmedCurve::line(at, next).unwrap();
            at = next;
            c
        })
        .collect()
}

fn arb_steps() -> impl Strategy<Value = Vec<(f64, f64)>> {
    prop::collection::vec((1.0f64..50.0, -50.0f64..50.0), 1..6)
}

/// Chains as endpoint lists, ordered so that comparison ignores group order.
fn canonical(groups: &[Vec<TrimmedCurve>]) -> Vec<Vec<(i64, i64, i64, i64)>> {
    let key = |c: &TrimmedCurve| {
        let (s, e) = (c.start_point(), c.end_point());
        let r = |v: f64| (v * 1e6).round() as i64;
        (r(s.x), r(s.y), r(e.x), r(e.y))
    };
    let mut out: Vec<Vec<_>> = groups.iter().map(|g| g.iter().map(key).collect()).collect();
    out.sort();
    out
}

proptest! {
    #[test]
    fn sort_paths_ignores_input_order(
        a in arb_steps(),
        b in arb_steps(),
        shuffle in any::<prop::sample::Index>(),
        seed in any::<u64>(),
    ) {
        // Two chains far apart in y so they can never touch.
        let mut curves = polyline((0.0, 0.0), &a);
        curves.extend(polyline((0.0, 10_000.0), &b));
        let ordered = sort_paths(&curves, 1e-6);
        prop_assert_eq!(ordered.len(), 2);

        // Deterministic permutation derived from the seed.
        let mut permuted = curves.clone();
        let n = permuted.len();
        let mut state = seed | 1;
        for i in (1..n).rev() {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            permuted.swap(i, (state % (i as u64 + 1)) as usize);
        }
        permuted.rotate_left(shuffle.index(n));

        let sorted = sort_paths(&permuted, 1e-6);
        prop_assert_eq!(canonical(&sorted), canonical(&ordered));
        for group in &sorted {
            for w in group.windows(2) {
                prop_assert!(w[0].end_point().distance_to(&w[1].start_point()) < 1e-6);
            }
        }
    }

    #[test]
    fn offset_translates_sweep_path(
        steps in arb_steps(),
        d in -5.0f64..5.0,
    ) {
        let pathers: Vec<TopoPather> = polyline((0.0, 0.0), &steps)
            .into_iter()
            .enumerate()
            .map(|(i, c)| TopoPather::new(c, i, false))
            .collect();
        let mut m = Molding::new(MoldingKind::Baseboard, MoldingParams::default(), MoldingConfig::default());
        m.set_topo_pathers(pathers);

        let mut diags = Diagnostics::new();
        let flat = m.calc_sweep_path(true, &mut diags);
        m.set_offset(d);
        let offset = m.calc_sweep_path(true, &mut diags);
        prop_assert!(diags.is_empty());
        prop_assert_eq!(flat.len(), offset.len());

        let shift = Vec3::new(0.0, 0.0, -d);
        for (f, o) in flat.iter().zip(&offset) {
            prop_assert!(f.translated(shift).endpoints_match(o, 2e-6));
        }
        // The cached path agrees with a fresh computation.
        prop_assert_eq!(m.sweep_path(), offset.as_slice());
    }
}
