use std::fmt;

use molding::{Molding, MoldingParams, TopoPather};
use serde::{Deserialize, Serialize};
use sweep_kernel::TrimmedCurve;
use topo_types::{MoldingKind, OpeningKind};
use tracing::debug;
use uuid::Uuid;

use crate::errors::DumpError;
use crate::metadata::DocumentMetadata;
use crate::version::FORMAT_VERSION;

/// Format identifier written at the top of every document.
pub const FORMAT_NAME: &str = "molding-document";

/// The opening a legacy fragment was cut against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacyOpening {
    pub id: String,
    pub kind: OpeningKind,
}

/// A legacy fragment index. Older writers stored it as a string, some as a
/// number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LegacyIndex {
    Number(u64),
    Text(String),
}

impl LegacyIndex {
    /// The index as stored, or `None` when the text is not a number.
    pub fn value(&self) -> Option<usize> {
        match self {
            LegacyIndex::Number(n) => usize::try_from(*n).ok(),
            LegacyIndex::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl fmt::Display for LegacyIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LegacyIndex::Number(n) => write!(f, "{n}"),
            LegacyIndex::Text(s) => write!(f, "{s}"),
        }
    }
}

/// One stored fragment.
///
/// Current records carry their base curve. Legacy records only name the
/// host face whose outline supplied it. A record with a `hostFaceId` is
/// always legacy, whatever shape its index has.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TopoPatherDump {
    #[serde(rename_all = "camelCase")]
    Legacy {
        host_face_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        opening: Option<LegacyOpening>,
        index: LegacyIndex,
        #[serde(default)]
        is_aux: bool,
        from: f64,
        to: f64,
    },
    #[serde(rename_all = "camelCase")]
    Current {
        index: usize,
        #[serde(default)]
        is_aux: bool,
        from: f64,
        to: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        curve: Option<TrimmedCurve>,
    },
}

impl From<&TopoPather> for TopoPatherDump {
    fn from(p: &TopoPather) -> Self {
        TopoPatherDump::Current {
            index: p.index,
            is_aux: p.is_aux,
            from: p.from,
            to: p.to,
            curve: Some(p.curve),
        }
    }
}

fn default_auto_fit() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoldingDump {
    pub id: Uuid,
    pub kind: MoldingKind,
    pub params: MoldingParams,
    #[serde(default)]
    pub offset: f64,
    #[serde(default = "default_auto_fit")]
    pub auto_fit: bool,
    #[serde(default)]
    pub topo_pathers: Vec<TopoPatherDump>,
}

pub fn dump_molding(molding: &Molding) -> MoldingDump {
    MoldingDump {
        id: molding.id(),
        kind: molding.kind(),
        params: molding.params.clone(),
        offset: molding.offset(),
        auto_fit: molding.auto_fit,
        topo_pathers: molding.topo_pathers().iter().map(TopoPatherDump::from).collect(),
    }
}

/// The top-level file structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentFile {
    pub format: String,
    pub version: String,
    pub metadata: DocumentMetadata,
    #[serde(default)]
    pub moldings: Vec<MoldingDump>,
}

/// Serialize moldings to a JSON document at [`FORMAT_VERSION`].
pub fn save_document(
    moldings: &[Molding],
    metadata: &DocumentMetadata,
) -> Result<String, DumpError> {
    let file = DocumentFile {
        format: FORMAT_NAME.to_string(),
        version: FORMAT_VERSION.to_string(),
        metadata: metadata.clone(),
        moldings: moldings.iter().map(dump_molding).collect(),
    };
    debug!(moldings = file.moldings.len(), "saving document");
    serde_json::to_string_pretty(&file).map_err(|e| DumpError::SerializeError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use molding::MoldingConfig;
    use sweep_kernel::Point3d;

    #[test]
    fn test_legacy_record_shape() {
        let json = r#"{
            "hostFaceId": "face-12",
            "opening": { "id": "door-1", "kind": { "type": "Door" } },
            "index": "2",
            "isAux": true,
            "from": 0.0,
            "to": 0.5
        }"#;
        let dump: TopoPatherDump = serde_json::from_str(json).unwrap();
        match dump {
            TopoPatherDump::Legacy {
                host_face_id,
                opening,
                index,
                is_aux,
                ..
            } => {
                assert_eq!(host_face_id, "face-12");
                assert_eq!(opening.unwrap().kind, OpeningKind::Door);
                assert_eq!(index, LegacyIndex::Text("2".into()));
                assert_eq!(index.value(), Some(2));
                assert!(is_aux);
            }
            other => panic!("expected legacy record, got {other:?}"),
        }
    }

    #[test]
    fn test_legacy_record_with_numeric_index() {
        let json = r#"{ "hostFaceId": "wall", "index": 0, "from": 0.0, "to": 1.0 }"#;
        let dump: TopoPatherDump = serde_json::from_str(json).unwrap();
        match dump {
            TopoPatherDump::Legacy {
                host_face_id, index, ..
            } => {
                assert_eq!(host_face_id, "wall");
                assert_eq!(index, LegacyIndex::Number(0));
                assert_eq!(index.value(), Some(0));
            }
            other => panic!("expected legacy record, got {other:?}"),
        }
    }

    #[test]
    fn test_legacy_index_text_that_is_not_a_number() {
        let index = LegacyIndex::Text("x".into());
        assert_eq!(index.value(), None);
        assert_eq!(index.to_string(), "x");
    }

    #[test]
    fn test_current_record_without_curve() {
        let dump: TopoPatherDump =
            serde_json::from_str(r#"{ "index": 4, "from": 0.0, "to": 1.0 }"#).unwrap();
        assert_eq!(
            dump,
            TopoPatherDump::Current {
                index: 4,
                is_aux: false,
                from: 0.0,
                to: 1.0,
                curve: None,
            }
        );
    }

    #[test]
    fn test_dump_keeps_fragment_fields() {
        let line = TrimmedCurve::line(Point3d::ORIGIN, Point3d::new(3.0, 0.0, 0.0)).unwrap();
        let mut m = Molding::new(
            MoldingKind::Cornice,
            MoldingParams::default(),
            MoldingConfig::default(),
        );
        m.set_offset(0.25);
        m.set_topo_pathers(vec![TopoPather::new(line, 7, true).with_range(0.1, 0.9)]);

        let dump = dump_molding(&m);
        assert_eq!(dump.id, m.id());
        assert_eq!(dump.offset, 0.25);
        assert_eq!(
            dump.topo_pathers,
            vec![TopoPatherDump::Current {
                index: 7,
                is_aux: true,
                from: 0.1,
                to: 0.9,
                curve: Some(line),
            }]
        );
    }
}
