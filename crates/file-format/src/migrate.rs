use std::collections::HashMap;

use molding::TopoPather;
use sweep_kernel::TrimmedCurve;
use topo_types::{DiagnosticCode, Diagnostics};
use tracing::debug;

use crate::dump::{LegacyIndex, LegacyOpening};
use crate::errors::LoadError;
use crate::version::{is_earlier_than, FORMAT_VERSION, OLDEST_SUPPORTED};

/// Index given to legacy fragments whose stored index does not parse.
pub const DEFAULT_INDEX: usize = 10_000;

/// Supplies the base curve that a legacy fragment referred to by host face.
pub trait HostFaceResolver {
    /// The `index`-th curve of the host face's molding outline, or of its
    /// auxiliary outline when `is_aux` is set.
    fn resolve(&self, host_face_id: &str, index: usize, is_aux: bool) -> Option<TrimmedCurve>;
}

impl<F> HostFaceResolver for F
where
    F: Fn(&str, usize, bool) -> Option<TrimmedCurve>,
{
    fn resolve(&self, host_face_id: &str, index: usize, is_aux: bool) -> Option<TrimmedCurve> {
        self(host_face_id, index, is_aux)
    }
}

/// Outlines keyed by host face id.
#[derive(Debug, Clone, Default)]
pub struct HostFaceTable {
    outlines: HashMap<String, Vec<TrimmedCurve>>,
    aux: HashMap<String, Vec<TrimmedCurve>>,
}

impl HostFaceTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_outline(mut self, face_id: impl Into<String>, curves: Vec<TrimmedCurve>) -> Self {
        self.outlines.insert(face_id.into(), curves);
        self
    }

    pub fn with_aux(mut self, face_id: impl Into<String>, curves: Vec<TrimmedCurve>) -> Self {
        self.aux.insert(face_id.into(), curves);
        self
    }
}

impl HostFaceResolver for HostFaceTable {
    fn resolve(&self, host_face_id: &str, index: usize, is_aux: bool) -> Option<TrimmedCurve> {
        let table = if is_aux { &self.aux } else { &self.outlines };
        table.get(host_face_id)?.get(index).copied()
    }
}

/// Reject versions that predate every known migration.
pub fn check_migration(version: &str) -> Result<(), LoadError> {
    if is_earlier_than(version, OLDEST_SUPPORTED) {
        return Err(LoadError::MigrationFailed {
            from: version.to_string(),
            to: FORMAT_VERSION.to_string(),
            reason: format!("no migration path from v{version}"),
        });
    }
    Ok(())
}

pub fn parse_legacy_index(index: &LegacyIndex) -> usize {
    index.value().unwrap_or(DEFAULT_INDEX)
}

/// A stored legacy fragment.
#[derive(Debug, Clone, Copy)]
pub struct LegacyPather<'a> {
    pub host_face_id: &'a str,
    pub opening: Option<&'a LegacyOpening>,
    pub index: &'a LegacyIndex,
    pub is_aux: bool,
    pub from: f64,
    pub to: f64,
}

/// Rebuild a fragment from its host face reference. Unresolvable records
/// are reported and dropped.
pub fn migrate_legacy_pather(
    record: LegacyPather<'_>,
    resolver: &dyn HostFaceResolver,
    diags: &mut Diagnostics,
) -> Option<TopoPather> {
    let index = parse_legacy_index(record.index);
    let Some(curve) = resolver.resolve(record.host_face_id, index, record.is_aux) else {
        let opening = record
            .opening
            .map(|o| format!(" (opening {})", o.id))
            .unwrap_or_default();
        diags.push(
            DiagnosticCode::UnresolvedLegacyPather,
            format!(
                "host face {} has no {}curve at index {}{opening}",
                record.host_face_id,
                if record.is_aux { "auxiliary " } else { "" },
                record.index,
            ),
        );
        return None;
    };
    debug!(host_face = record.host_face_id, index, "migrated legacy fragment");
    Some(TopoPather::new(curve, index, record.is_aux).with_range(record.from, record.to))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sweep_kernel::Point3d;
    use topo_types::OpeningKind;

    fn outline() -> Vec<TrimmedCurve> {
        vec![
            TrimmedCurve::line(Point3d::ORIGIN, Point3d::new(4.0, 0.0, 0.0)).unwrap(),
            TrimmedCurve::line(Point3d::new(4.0, 0.0, 0.0), Point3d::new(4.0, 3.0, 0.0)).unwrap(),
        ]
    }

    fn record<'a>(index: &'a LegacyIndex, opening: Option<&'a LegacyOpening>) -> LegacyPather<'a> {
        LegacyPather {
            host_face_id: "wall-a",
            opening,
            index,
            is_aux: false,
            from: 0.25,
            to: 1.0,
        }
    }

    #[test]
    fn test_resolved_record_keeps_range() {
        let table = HostFaceTable::new().with_outline("wall-a", outline());
        let mut diags = Diagnostics::new();
        let index = LegacyIndex::Text("1".into());
        let p = migrate_legacy_pather(record(&index, None), &table, &mut diags).unwrap();
        assert!(diags.is_empty());
        assert_eq!(p.index, 1);
        assert_eq!((p.from, p.to), (0.25, 1.0));
        assert_eq!(p.curve, outline()[1]);
    }

    #[test]
    fn test_aux_uses_aux_outline() {
        let table = HostFaceTable::new().with_outline("wall-a", outline());
        let mut diags = Diagnostics::new();
        let index = LegacyIndex::Number(0);
        let mut rec = record(&index, None);
        rec.is_aux = true;
        assert!(migrate_legacy_pather(rec, &table, &mut diags).is_none());
        assert!(diags.contains(DiagnosticCode::UnresolvedLegacyPather));
    }

    #[test]
    fn test_bad_index_is_unresolved() {
        let table = HostFaceTable::new().with_outline("wall-a", outline());
        let opening = LegacyOpening {
            id: "door-3".into(),
            kind: OpeningKind::Door,
        };
        let mut diags = Diagnostics::new();
        let index = LegacyIndex::Text("x".into());
        assert_eq!(parse_legacy_index(&index), DEFAULT_INDEX);
        assert!(migrate_legacy_pather(record(&index, Some(&opening)), &table, &mut diags).is_none());
        let message = &diags.iter().next().unwrap().message;
        assert!(message.contains("door-3"), "{message}");
    }

    #[test]
    fn test_closure_resolver() {
        let resolver = |face: &str, index: usize, _aux: bool| {
            (face == "wall-a").then(|| outline()[index % 2])
        };
        let mut diags = Diagnostics::new();
        let index = LegacyIndex::Number(0);
        assert!(migrate_legacy_pather(record(&index, None), &resolver, &mut diags).is_some());
    }

    #[test]
    fn test_check_migration() {
        assert!(check_migration("1.0").is_ok());
        assert!(check_migration("1.2.0").is_ok());
        assert!(matches!(
            check_migration("0.9"),
            Err(LoadError::MigrationFailed { .. })
        ));
    }
}
