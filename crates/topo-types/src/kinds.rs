use serde::{Deserialize, Serialize};

/// Wall openings a molding path can be interrupted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum OpeningKind {
    Door,
    Window,
    WallHole,
}

impl OpeningKind {
    /// Openings that reach the floor and therefore cut a baseboard.
    pub fn reaches_floor(self) -> bool {
        matches!(self, OpeningKind::Door | OpeningKind::WallHole)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum MoldingKind {
    /// Runs along the bottom of a wall face.
    Baseboard,
    /// Runs along the top of a wall face.
    Cornice,
}
