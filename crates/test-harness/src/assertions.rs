//! Assertion helpers with diagnostic output.
//!
//! Every failure says what was expected, what was found, and where.

use sweep_kernel::TrimmedCurve;

use crate::helpers::HarnessError;
use crate::oracle::OracleVerdict;
use crate::workflow::NameSnapshot;

/// Fail with the first failing verdict.
pub fn assert_oracles_pass(verdicts: &[OracleVerdict], ctx: &str) -> Result<(), HarnessError> {
    match verdicts.iter().find(|v| !v.passed) {
        None => Ok(()),
        Some(v) => Err(HarnessError::OracleFailure {
            oracle: v.oracle_name.clone(),
            detail: format!("[{ctx}] {}", v.detail),
        }),
    }
}

/// Assert two naming passes issued exactly the same names.
pub fn assert_same_names(a: &NameSnapshot, b: &NameSnapshot, ctx: &str) -> Result<(), HarnessError> {
    if a == b {
        return Ok(());
    }
    let first_diff = |x: &[String], y: &[String]| {
        x.iter()
            .zip(y)
            .position(|(p, q)| p != q)
            .or((x.len() != y.len()).then(|| x.len().min(y.len())))
    };
    Err(HarnessError::AssertionFailed {
        detail: format!(
            "[{ctx}] names differ: brep {:?} vs {:?}, first face diff at {:?}, \
             first edge diff at {:?}, first co-edge diff at {:?}",
            a.brep,
            b.brep,
            first_diff(&a.faces, &b.faces),
            first_diff(&a.edges, &b.edges),
            first_diff(&a.coedges, &b.coedges),
        ),
    })
}

/// Assert two paths match curve by curve, endpoints within `tol`.
pub fn assert_path_matches(
    actual: &[TrimmedCurve],
    expected: &[TrimmedCurve],
    tol: f64,
    ctx: &str,
) -> Result<(), HarnessError> {
    if actual.len() != expected.len() {
        return Err(HarnessError::AssertionFailed {
            detail: format!(
                "[{ctx}] expected {} curves, got {}",
                expected.len(),
                actual.len()
            ),
        });
    }
    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        if !a.endpoints_match(e, tol) {
            return Err(HarnessError::AssertionFailed {
                detail: format!(
                    "[{ctx}] curve {i}: expected {:?} -> {:?}, got {:?} -> {:?} (tol={tol})",
                    e.start_point(),
                    e.end_point(),
                    a.start_point(),
                    a.end_point(),
                ),
            });
        }
    }
    Ok(())
}
