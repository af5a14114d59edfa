pub mod sweep;

use thiserror::Error;

/// Structured error type for constructive operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OperationError {
    /// Profile has too few curves to bound an area.
    #[error("profile has {provided} curves, need at least {required}")]
    InsufficientProfile { required: usize, provided: usize },
    /// Path has too few distinct points for a sweep.
    #[error("path has {provided} distinct points, need at least {required}")]
    InsufficientPath { required: usize, provided: usize },
    /// A profile curve does not end where the next one starts.
    #[error("profile is not closed after curve {curve_id}")]
    OpenProfile { curve_id: String },
    /// A path segment does not start where the previous one ended.
    #[error("path segment {segment} does not continue the previous segment")]
    DisconnectedPath { segment: usize },
    #[error("edge endpoints coincide")]
    DegenerateEdge,
    /// A face loop collapsed below three distinct vertices.
    #[error("face loop has {provided} distinct vertices, need at least 3")]
    InsufficientLoop { provided: usize },
    #[error("vertex does not exist in the entity store")]
    UnknownVertex,
    #[error("no profile curve with id {id}")]
    UnknownProfileCurve { id: String },
    #[error("merge run {start}..{end} of curve {curve_id} is outside 0..{segments}")]
    MergeRunOutOfRange {
        curve_id: String,
        start: usize,
        end: usize,
        segments: usize,
    },
}
