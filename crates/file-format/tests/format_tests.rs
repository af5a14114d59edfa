use molding::{Molding, MoldingConfig, MoldingParams, TopoPather};
use molding_format::{
    load_document, save_document, DocumentMetadata, HostFaceTable, LoadError, FORMAT_VERSION,
};
use sweep_kernel::{Point3d, TrimmedCurve};
use topo_types::{DiagnosticCode, MoldingKind};

// ── Helper Functions ─────────────────────────────────────────────────────

fn line(a: (f64, f64), b: (f64, f64)) -> TrimmedCurve {
    TrimmedCurve::line(Point3d::new(a.0, a.1, 0.0), Point3d::new(b.0, b.1, 0.0)).unwrap()
}

fn wall_outline() -> Vec<TrimmedCurve> {
    vec![
        line((0.0, 0.0), (4.0, 0.0)),
        line((4.0, 0.0), (4.0, 3.0)),
        line((4.0, 3.0), (0.0, 3.0)),
    ]
}

fn sample_molding() -> Molding {
    let mut m = Molding::new(
        MoldingKind::Baseboard,
        MoldingParams {
            profile_id: Some("bb-classic".into()),
            ..MoldingParams::default()
        },
        MoldingConfig::default(),
    );
    m.set_offset(0.05);
    m.auto_fit = false;
    m.set_topo_pathers(
        wall_outline()
            .into_iter()
            .enumerate()
            .map(|(i, c)| TopoPather::new(c, i, false))
            .collect(),
    );
    m
}

fn document(version: &str, moldings: &str) -> String {
    format!(
        r#"{{
            "format": "molding-document",
            "version": "{version}",
            "metadata": {{
                "name": "hall",
                "created": "2024-03-01T10:00:00Z",
                "modified": "2024-03-02T10:00:00Z"
            }},
            "moldings": {moldings}
        }}"#
    )
}

const LEGACY_MOLDING: &str = r#"[{
    "id": "7d0c6f5e-8a55-4a4e-9c57-3a1f7f1e2b10",
    "kind": { "type": "Baseboard" },
    "params": { "profile_id": null, "width": 0.01, "height": 0.08 },
    "offset": 0.0,
    "topoPathers": [
        { "hostFaceId": "wall-a", "index": "0", "from": 0.0, "to": 1.0 },
        { "hostFaceId": "wall-a", "index": "2", "isAux": false, "from": 0.0, "to": 0.5 },
        { "hostFaceId": "wall-b", "index": "0",
          "opening": { "id": "door-1", "kind": { "type": "Door" } },
          "from": 0.0, "to": 1.0 }
    ]
}]"#;

// ── Save / Load ──────────────────────────────────────────────────────────

#[test]
fn test_save_then_load_preserves_moldings() {
    let original = sample_molding();
    let json = save_document(&[original.clone()], &DocumentMetadata::new("hall")).unwrap();
    let doc = load_document(&json, &HostFaceTable::new()).unwrap();

    assert_eq!(doc.version, FORMAT_VERSION);
    assert_eq!(doc.metadata.name, "hall");
    assert!(doc.diagnostics.is_empty());
    assert_eq!(doc.moldings.len(), 1);

    let loaded = &doc.moldings[0];
    assert_eq!(loaded.id(), original.id());
    assert_eq!(loaded.kind(), MoldingKind::Baseboard);
    assert_eq!(loaded.params, original.params);
    assert_eq!(loaded.offset(), 0.05);
    assert!(!loaded.auto_fit);
    assert_eq!(loaded.topo_pathers(), original.topo_pathers());
    assert_eq!(loaded.sweep_path(), original.sweep_path());
}

#[test]
fn test_saved_document_is_tagged() {
    let json = save_document(&[], &DocumentMetadata::new("empty")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["format"], "molding-document");
    assert_eq!(value["version"], FORMAT_VERSION);
    assert!(value["moldings"].as_array().unwrap().is_empty());
}

// ── Validation ───────────────────────────────────────────────────────────

#[test]
fn test_unknown_format_rejected() {
    let json = document("1.3", "[]").replace("molding-document", "something-else");
    assert!(matches!(
        load_document(&json, &HostFaceTable::new()),
        Err(LoadError::UnknownFormat(f)) if f == "something-else"
    ));
}

#[test]
fn test_future_version_rejected() {
    let err = load_document(&document("1.10", "[]"), &HostFaceTable::new()).unwrap_err();
    match err {
        LoadError::FutureVersion {
            file_version,
            supported_version,
        } => {
            assert_eq!(file_version, "1.10");
            assert_eq!(supported_version, FORMAT_VERSION);
        }
        other => panic!("expected FutureVersion, got {other:?}"),
    }
}

#[test]
fn test_invalid_and_unmigratable_versions() {
    assert!(matches!(
        load_document(&document("one", "[]"), &HostFaceTable::new()),
        Err(LoadError::InvalidVersion(_))
    ));
    assert!(matches!(
        load_document(&document("0.9", "[]"), &HostFaceTable::new()),
        Err(LoadError::MigrationFailed { .. })
    ));
}

#[test]
fn test_malformed_json() {
    assert!(matches!(
        load_document("{ not json", &HostFaceTable::new()),
        Err(LoadError::ParseError(_))
    ));
}

// ── Legacy migration ─────────────────────────────────────────────────────

#[test]
fn test_legacy_fragments_migrate_through_host_faces() {
    let table = HostFaceTable::new().with_outline("wall-a", wall_outline());
    let doc = load_document(&document("1.2", LEGACY_MOLDING), &table).unwrap();

    let m = &doc.moldings[0];
    let pathers = m.topo_pathers();
    assert_eq!(pathers.len(), 2);
    assert_eq!(pathers[0].curve, wall_outline()[0]);
    assert_eq!(pathers[1].index, 2);
    assert_eq!(pathers[1].to, 0.5);
    assert!(m.auto_fit);

    // wall-b is unknown, so the door fragment is dropped.
    assert_eq!(doc.diagnostics.len(), 1);
    assert!(doc.diagnostics.contains(DiagnosticCode::UnresolvedLegacyPather));
}

#[test]
fn test_legacy_fragment_with_numeric_index_migrates() {
    let moldings = r#"[{
        "id": "5e9a7c21-3d4b-4f8e-9a6c-0b1d2e3f4a5b",
        "kind": { "type": "Baseboard" },
        "params": { "profile_id": null, "width": 0.01, "height": 0.08 },
        "topoPathers": [
            { "hostFaceId": "wall", "index": 0, "from": 0.0, "to": 1.0 }
        ]
    }]"#;
    let table = HostFaceTable::new().with_outline("wall", wall_outline());
    let doc = load_document(&document("1.2", moldings), &table).unwrap();

    assert!(doc.diagnostics.is_empty(), "{:?}", doc.diagnostics);
    let pathers = doc.moldings[0].topo_pathers();
    assert_eq!(pathers.len(), 1);
    assert_eq!(pathers[0].index, 0);
    assert_eq!(pathers[0].curve, wall_outline()[0]);
}

#[test]
fn test_legacy_fragments_in_current_version_are_dropped() {
    let table = HostFaceTable::new().with_outline("wall-a", wall_outline());
    let doc = load_document(&document("1.3", LEGACY_MOLDING), &table).unwrap();

    assert!(doc.moldings[0].topo_pathers().is_empty());
    assert!(!doc.moldings[0].exists());
    assert_eq!(doc.diagnostics.count(DiagnosticCode::MissingPatherCurve), 3);
}

#[test]
fn test_current_fragment_without_curve_is_dropped() {
    let curve = serde_json::to_string(&line((0.0, 0.0), (2.0, 0.0))).unwrap();
    let moldings = format!(
        r#"[{{
            "id": "2b4ef3a6-1f0c-4a5e-8a0e-4f3f0d7c1a22",
            "kind": {{ "type": "Cornice" }},
            "params": {{ "profile_id": null, "width": 0.02, "height": 0.1 }},
            "topoPathers": [
                {{ "index": 0, "from": 0.0, "to": 1.0 }},
                {{ "index": 1, "from": 0.0, "to": 1.0, "curve": {curve} }}
            ]
        }}]"#
    );
    let doc = load_document(&document("1.3", &moldings), &HostFaceTable::new()).unwrap();
    assert_eq!(doc.diagnostics.count(DiagnosticCode::MissingPatherCurve), 1);
    let pathers = doc.moldings[0].topo_pathers();
    assert_eq!(pathers.len(), 1);
    assert_eq!(pathers[0].index, 1);
    assert_eq!(doc.moldings[0].kind(), MoldingKind::Cornice);
}
