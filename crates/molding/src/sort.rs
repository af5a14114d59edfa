use std::collections::VecDeque;

use sweep_kernel::TrimmedCurve;

/// Group curves into maximal chains connected end to start.
///
/// Connectivity is judged on the XY projection of the endpoints; heights
/// are ignored. See [`sort_path_indices`].
pub fn sort_paths(curves: &[TrimmedCurve], tol: f64) -> Vec<Vec<TrimmedCurve>> {
    sort_path_indices(curves, tol)
        .into_iter()
        .map(|group| group.into_iter().map(|i| curves[i]).collect())
        .collect()
}

/// Chains of indices into `curves`.
///
/// Each not-yet-grouped curve seeds a chain. The chain grows at its head by
/// a curve ending where it starts and at its tail by a curve starting where
/// it ends; among candidates the first in input order wins. Growth stops
/// when nothing matches or the chain closes on itself. Every index appears
/// in exactly one chain, so duplicated geometry is never merged away.
pub fn sort_path_indices(curves: &[TrimmedCurve], tol: f64) -> Vec<Vec<usize>> {
    let n = curves.len();
    let mut assigned = vec![false; n];
    let mut groups = Vec::new();

    for seed in 0..n {
        if assigned[seed] {
            continue;
        }
        assigned[seed] = true;
        let mut chain = VecDeque::from([seed]);

        loop {
            let head = curves[chain[0]].start_point().to_xy();
            let tail = curves[chain[chain.len() - 1]].end_point().to_xy();
            if chain.len() > 1 && head.distance_to(&tail) < tol {
                break;
            }
            let next = (0..n).filter(|&i| !assigned[i]).find_map(|i| {
                if curves[i].end_point().to_xy().distance_to(&head) < tol {
                    Some((i, true))
                } else if curves[i].start_point().to_xy().distance_to(&tail) < tol {
                    Some((i, false))
                } else {
                    None
                }
            });
            let Some((i, at_head)) = next else {
                break;
            };
            assigned[i] = true;
            if at_head {
                chain.push_front(i);
            } else {
                chain.push_back(i);
            }
        }
        groups.push(chain.into());
    }
    groups
}
