use serde::{Deserialize, Serialize};

/// Conventional roles of light-slot profile curves, keyed by the profile
/// curve id they are declared with. The discriminant is that id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProfileEdgeRole {
    /// Outer face of the molding.
    Outer = 1,
    /// Return side that closes the light-slot channel.
    ClosingOuter = 4,
    /// Channel floor; its start point anchors the wrap-around edge chain.
    WrapAnchor = 5,
    /// Inner face meeting the outer face.
    InnerToOuter = 7,
}

impl ProfileEdgeRole {
    pub const ALL: [ProfileEdgeRole; 4] = [
        ProfileEdgeRole::Outer,
        ProfileEdgeRole::ClosingOuter,
        ProfileEdgeRole::WrapAnchor,
        ProfileEdgeRole::InnerToOuter,
    ];

    /// Profile curve id this role is declared with.
    pub fn profile_id(self) -> &'static str {
        match self {
            ProfileEdgeRole::Outer => "1",
            ProfileEdgeRole::ClosingOuter => "4",
            ProfileEdgeRole::WrapAnchor => "5",
            ProfileEdgeRole::InnerToOuter => "7",
        }
    }

    /// Profile point id at which curves of this role start.
    pub fn point_id(self) -> u32 {
        self as u32
    }

    pub fn from_profile_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.profile_id() == id)
    }

    /// True when the unordered pair of tag roots `(a, b)` is exactly `{x, y}`.
    pub fn is_pair(a: &str, b: &str, x: ProfileEdgeRole, y: ProfileEdgeRole) -> bool {
        let (x, y) = (x.profile_id(), y.profile_id());
        (a == x && b == y) || (a == y && b == x)
    }
}
