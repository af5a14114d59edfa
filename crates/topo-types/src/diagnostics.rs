use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// The operation skipped one item and carried on.
    Warning,
    /// A consistency violation; results are usable but incomplete.
    Error,
}

/// Anomalies reported by best-effort naming and path operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiagnosticCode {
    // Naming
    DuplicateTopoName,
    MissingProfileCurve,
    MissingWrapAnchor,
    OpenEdge,
    UnmatchedFacePair,
    UnchainedLightSlotEdges,
    // Sweep paths
    EmptySweepPath,
    DisjointSweepPath,
    UnrealizablePather,
    NonContiguousPather,
    InvalidSplitResult,
    NothingToSplit,
    // Persistence
    UnresolvedLegacyPather,
    MissingPatherCurve,
}

impl DiagnosticCode {
    pub fn severity(self) -> Severity {
        match self {
            DiagnosticCode::DuplicateTopoName
            | DiagnosticCode::InvalidSplitResult
            | DiagnosticCode::EmptySweepPath => Severity::Error,
            _ => Severity::Warning,
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub code: DiagnosticCode,
    pub severity: Severity,
    pub message: String,
}

/// Collects diagnostics for the caller. Every push is also logged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, code: DiagnosticCode, message: impl Into<String>) {
        let message = message.into();
        let severity = code.severity();
        warn!(%code, ?severity, "{message}");
        self.items.push(Diagnostic {
            code,
            severity,
            message,
        });
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.items.extend(other.items);
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter()
    }

    pub fn count(&self, code: DiagnosticCode) -> usize {
        self.items.iter().filter(|d| d.code == code).count()
    }

    pub fn contains(&self, code: DiagnosticCode) -> bool {
        self.count(code) > 0
    }

    pub fn has_errors(&self) -> bool {
        self.items.iter().any(|d| d.severity == Severity::Error)
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.items
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_records_severity_from_code() {
        let mut diags = Diagnostics::new();
        diags.push(DiagnosticCode::OpenEdge, "edge e3 has one face");
        diags.push(DiagnosticCode::DuplicateTopoName, "1-s0");
        assert_eq!(diags.len(), 2);
        assert_eq!(diags.count(DiagnosticCode::OpenEdge), 1);
        assert!(diags.has_errors());
        let severities: Vec<Severity> = diags.iter().map(|d| d.severity).collect();
        assert_eq!(severities, vec![Severity::Warning, Severity::Error]);
    }

    #[test]
    fn test_extend_keeps_order() {
        let mut a = Diagnostics::new();
        a.push(DiagnosticCode::EmptySweepPath, "empty");
        let mut b = Diagnostics::new();
        b.push(DiagnosticCode::NothingToSplit, "nothing");
        a.extend(b);
        let codes: Vec<DiagnosticCode> = (&a).into_iter().map(|d| d.code).collect();
        assert_eq!(
            codes,
            vec![DiagnosticCode::EmptySweepPath, DiagnosticCode::NothingToSplit]
        );
    }

    #[test]
    fn test_diagnostics_serialize() {
        let mut diags = Diagnostics::new();
        diags.push(DiagnosticCode::MissingWrapAnchor, "no curve 5");
        let json = serde_json::to_string(&diags).unwrap();
        assert!(json.contains("MissingWrapAnchor"));
        let back: Diagnostics = serde_json::from_str(&json).unwrap();
        assert_eq!(back, diags);
    }
}
