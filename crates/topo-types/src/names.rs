//! Topological name formats.
//!
//! | entity          | format                      | example            |
//! |-----------------|-----------------------------|--------------------|
//! | face            | `{profileId}-{pathTag}`     | `2-top`, `2-`      |
//! | edge            | `{faceA}>{faceB}>{index}`   | `1-s0>2-s0>0`      |
//! | co-edge         | `{face}>{edge}`             | `4-s0>4>5-1`       |
//! | wrap-around edge| `4>5-{n}` (1-based)         | `4>5-3`            |

use crate::roles::ProfileEdgeRole;

pub const ROOT_SEPARATOR: char = '-';
pub const PAIR_SEPARATOR: char = '>';

/// Name of the face swept by profile curve `profile_id` along a path segment.
pub fn face_tag(profile_id: &str, path_tag: Option<&str>) -> String {
    format!("{profile_id}{ROOT_SEPARATOR}{}", path_tag.unwrap_or(""))
}

/// Name of the `index`-th edge shared by two faces. Callers pass the faces
/// already in sorted order.
pub fn edge_tag(face_a: &str, face_b: &str, index: usize) -> String {
    format!("{face_a}{PAIR_SEPARATOR}{face_b}{PAIR_SEPARATOR}{index}")
}

pub fn coedge_tag(face: &str, edge: &str) -> String {
    format!("{face}{PAIR_SEPARATOR}{edge}")
}

/// Name of the `ordinal`-th (1-based) edge of the wrap-around chain.
pub fn wrap_edge_tag(ordinal: usize) -> String {
    format!(
        "{}{PAIR_SEPARATOR}{}{ROOT_SEPARATOR}{ordinal}",
        ProfileEdgeRole::ClosingOuter.profile_id(),
        ProfileEdgeRole::WrapAnchor.profile_id()
    )
}

/// Profile curve id a face tag was derived from: the text before the first
/// separator, or the whole tag when it has none.
pub fn tag_root(tag: &str) -> &str {
    tag.split(ROOT_SEPARATOR).next().unwrap_or(tag)
}
