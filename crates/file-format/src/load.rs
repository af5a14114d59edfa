use molding::{Molding, MoldingConfig, TopoPather};
use topo_types::{DiagnosticCode, Diagnostics};
use tracing::{debug, instrument};

use crate::dump::{DocumentFile, MoldingDump, TopoPatherDump, FORMAT_NAME};
use crate::errors::LoadError;
use crate::metadata::DocumentMetadata;
use crate::migrate::{check_migration, migrate_legacy_pather, HostFaceResolver, LegacyPather};
use crate::version::{self, is_earlier_than, FORMAT_VERSION, SELF_CONTAINED_SINCE};

/// A parsed document. Dropped fragments are listed in `diagnostics`.
#[derive(Debug)]
pub struct LoadedDocument {
    /// Version the file was written at.
    pub version: String,
    pub metadata: DocumentMetadata,
    pub moldings: Vec<Molding>,
    pub diagnostics: Diagnostics,
}

/// Rebuild a molding from its stored form.
///
/// Files older than version 1.3 store legacy fragments that name a host
/// face; those are migrated through `resolver`. From 1.3 on a legacy-shaped
/// record has no usable curve and is dropped, as is a current record that
/// lacks one. Current records are accepted at any version.
#[instrument(skip(dump, resolver, diags), fields(molding = %dump.id))]
pub fn load_molding(
    dump: MoldingDump,
    version: &str,
    resolver: &dyn HostFaceResolver,
    diags: &mut Diagnostics,
) -> Molding {
    let legacy = is_earlier_than(version, SELF_CONTAINED_SINCE);
    let mut pathers = Vec::with_capacity(dump.topo_pathers.len());

    for record in &dump.topo_pathers {
        match record {
            TopoPatherDump::Current {
                index,
                is_aux,
                from,
                to,
                curve: Some(curve),
            } => pathers.push(TopoPather::new(*curve, *index, *is_aux).with_range(*from, *to)),
            TopoPatherDump::Current { index, .. } => diags.push(
                DiagnosticCode::MissingPatherCurve,
                format!("molding {}: fragment {index} has no curve", dump.id),
            ),
            TopoPatherDump::Legacy {
                host_face_id,
                opening,
                index,
                is_aux,
                from,
                to,
            } if legacy => {
                let record = LegacyPather {
                    host_face_id,
                    opening: opening.as_ref(),
                    index,
                    is_aux: *is_aux,
                    from: *from,
                    to: *to,
                };
                pathers.extend(migrate_legacy_pather(record, resolver, diags));
            }
            TopoPatherDump::Legacy {
                host_face_id, index, ..
            } => diags.push(
                DiagnosticCode::MissingPatherCurve,
                format!(
                    "molding {}: fragment {index} on host face {host_face_id} has no curve \
                     and version {version} does not migrate host faces",
                    dump.id
                ),
            ),
        }
    }

    debug!(
        stored = dump.topo_pathers.len(),
        loaded = pathers.len(),
        "loaded molding"
    );
    let mut molding = Molding::new(dump.kind, dump.params, MoldingConfig::default()).with_id(dump.id);
    molding.auto_fit = dump.auto_fit;
    molding.set_offset(dump.offset);
    molding.set_topo_pathers(pathers);
    molding
}

/// Deserialize a document from a JSON string.
///
/// Validates the format identifier and version, then loads every molding.
pub fn load_document(
    json: &str,
    resolver: &dyn HostFaceResolver,
) -> Result<LoadedDocument, LoadError> {
    let raw: DocumentFile =
        serde_json::from_str(json).map_err(|e| LoadError::ParseError(e.to_string()))?;

    if raw.format != FORMAT_NAME {
        return Err(LoadError::UnknownFormat(raw.format));
    }
    if version::parse(&raw.version).is_none() {
        return Err(LoadError::InvalidVersion(raw.version));
    }
    if is_earlier_than(FORMAT_VERSION, &raw.version) {
        return Err(LoadError::FutureVersion {
            file_version: raw.version,
            supported_version: FORMAT_VERSION.to_string(),
        });
    }
    check_migration(&raw.version)?;

    let mut diagnostics = Diagnostics::new();
    let moldings = raw
        .moldings
        .into_iter()
        .map(|dump| load_molding(dump, &raw.version, resolver, &mut diagnostics))
        .collect();

    Ok(LoadedDocument {
        version: raw.version,
        metadata: raw.metadata,
        moldings,
        diagnostics,
    })
}
