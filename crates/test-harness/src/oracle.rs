//! Verification oracles: pure functions returning pass/fail verdicts.
//!
//! Each oracle returns an `OracleVerdict` with diagnostic detail, not panics.
//! This lets a test collect all failures in one pass.

use std::collections::HashMap;

use sweep_kernel::{audit_brep, TrimmedCurve};
use topo_naming::NamingReport;
use topo_types::{wrap_edge_tag, ProfileEdgeRole};

use crate::workflow::NamedSweep;

/// The result of a single oracle check.
#[derive(Debug, Clone)]
pub struct OracleVerdict {
    pub oracle_name: String,
    pub passed: bool,
    pub detail: String,
}

impl OracleVerdict {
    fn pass(name: &str, detail: String) -> Self {
        Self {
            oracle_name: name.to_string(),
            passed: true,
            detail,
        }
    }

    fn fail(name: &str, detail: String) -> Self {
        Self {
            oracle_name: name.to_string(),
            passed: false,
            detail,
        }
    }

    fn from_check(name: &str, ok: bool, detail: String) -> Self {
        if ok {
            Self::pass(name, detail)
        } else {
            Self::fail(name, detail)
        }
    }
}

// ── Topology Oracles ────────────────────────────────────────────────────────

/// Check Euler's formula: V - E + F = 2 (for genus-0 solids).
pub fn check_euler_formula(sweep: &NamedSweep) -> OracleVerdict {
    let brep = &sweep.store.breps[sweep.brep()];
    let v = brep.vertices.len() as i64;
    let e = brep.edges.len() as i64;
    let f = brep.faces.len() as i64;
    let euler = v - e + f;
    OracleVerdict::from_check(
        "euler_formula",
        euler == 2,
        format!("V({v}) - E({e}) + F({f}) = {euler}"),
    )
}

/// Check closed wires, two faces per edge and consistent back references.
pub fn check_topology(sweep: &NamedSweep) -> OracleVerdict {
    let audit = audit_brep(&sweep.store, sweep.brep());
    if audit.all_valid() {
        OracleVerdict::pass("topology", "brep is closed and consistent".to_string())
    } else {
        OracleVerdict::fail(
            "topology",
            format!(
                "{} errors: {:?}",
                audit.errors.len(),
                &audit.errors[..audit.errors.len().min(5)]
            ),
        )
    }
}

// ── Naming Oracles ──────────────────────────────────────────────────────────

/// Check that the naming pass raised no diagnostics.
pub fn check_naming_clean(report: &NamingReport) -> OracleVerdict {
    OracleVerdict::from_check(
        "naming_clean",
        report.is_clean(),
        format!("{} diagnostics: {:?}", report.diagnostics.len(), report.diagnostics),
    )
}

/// Check that no two edges of the brep share a tag.
pub fn check_unique_edge_tags(sweep: &NamedSweep) -> OracleVerdict {
    let mut seen: HashMap<&str, usize> = HashMap::new();
    for &e in sweep.edges() {
        *seen.entry(sweep.edge_tag(e)).or_default() += 1;
    }
    let mut repeated: Vec<(&str, usize)> = seen.into_iter().filter(|&(_, n)| n > 1).collect();
    repeated.sort_unstable();
    if repeated.is_empty() {
        OracleVerdict::pass(
            "unique_edge_tags",
            format!("all {} edge tags are distinct", sweep.edges().len()),
        )
    } else {
        OracleVerdict::fail("unique_edge_tags", format!("repeated tags: {repeated:?}"))
    }
}

/// Check that every edge between the slot's closing wall and the top curve
/// is flagged as part of the light-slot path, and no other edge is.
pub fn check_light_slot_flags(sweep: &NamedSweep) -> OracleVerdict {
    let closing = ProfileEdgeRole::ClosingOuter.profile_id();
    let anchor = ProfileEdgeRole::WrapAnchor.profile_id();
    let slot = sweep.edges_between(closing, anchor);
    let unflagged = slot
        .iter()
        .filter(|&&e| !sweep.store.edges[e].user_data.light_slot_path)
        .count();
    let stray = sweep
        .edges()
        .iter()
        .filter(|&&e| sweep.store.edges[e].user_data.light_slot_path && !slot.contains(&e))
        .count();
    OracleVerdict::from_check(
        "light_slot_flags",
        !slot.is_empty() && unflagged == 0 && stray == 0,
        format!(
            "{} slot edges, {unflagged} unflagged, {stray} flagged outside the slot",
            slot.len()
        ),
    )
}

/// Check that the wrap-around names `4>5-1` ..= `4>5-n` all exist.
pub fn check_wrap_chain(sweep: &NamedSweep, n: usize) -> OracleVerdict {
    let missing: Vec<String> = (1..=n)
        .map(wrap_edge_tag)
        .filter(|tag| sweep.store.edge_by_tag(sweep.brep(), tag).is_none())
        .collect();
    OracleVerdict::from_check(
        "wrap_chain",
        missing.is_empty() && sweep.report.wrap_edges_named == n,
        format!(
            "{} wrap edges named, missing {missing:?}",
            sweep.report.wrap_edges_named
        ),
    )
}

// ── Path Oracles ────────────────────────────────────────────────────────────

/// Check that consecutive curves meet end to start.
pub fn check_path_continuity(path: &[TrimmedCurve], tol: f64) -> OracleVerdict {
    let gaps: Vec<usize> = path
        .windows(2)
        .enumerate()
        .filter(|(_, w)| w[0].end_point().distance_to(&w[1].start_point()) >= tol)
        .map(|(i, _)| i)
        .collect();
    OracleVerdict::from_check(
        "path_continuity",
        gaps.is_empty(),
        format!("{} curves, gaps after {gaps:?}", path.len()),
    )
}

/// Run every check that applies to any named sweep.
pub fn run_sweep_checks(sweep: &NamedSweep) -> Vec<OracleVerdict> {
    vec![
        check_euler_formula(sweep),
        check_topology(sweep),
        check_naming_clean(&sweep.report),
        check_unique_edge_tags(sweep),
    ]
}
