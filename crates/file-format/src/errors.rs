/// Errors during document loading.
#[derive(Debug, Clone, thiserror::Error)]
pub enum LoadError {
    #[error("failed to parse file: {0}")]
    ParseError(String),

    #[error("unknown file format: {0}")]
    UnknownFormat(String),

    #[error("invalid version string: {0}")]
    InvalidVersion(String),

    #[error("file version {file_version} is newer than supported version {supported_version}")]
    FutureVersion {
        file_version: String,
        supported_version: String,
    },

    #[error("migration failed from version {from} to {to}: {reason}")]
    MigrationFailed {
        from: String,
        to: String,
        reason: String,
    },
}

/// Errors during document saving.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DumpError {
    #[error("failed to serialize document: {0}")]
    SerializeError(String),
}
