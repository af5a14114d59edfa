pub mod geometry;
pub mod operations;
pub mod topology;

// Re-export the types most callers touch at crate root for convenience.
pub use geometry::curves::{Curve, Curve2d, TrimmedCurve};
pub use geometry::plane::Plane;
pub use geometry::point::{Point2d, Point3d};
pub use geometry::transform::Transform;
pub use geometry::vector::Vec3;
pub use operations::sweep::{
    sweep_profile, PathSegment, Profile, ProfileCurve, SweepOptions, SweptFaceMap, SweptSolid,
};
pub use operations::OperationError;
pub use topology::audit::{audit_brep, TopologyAudit, TopologyError};
pub use topology::builder::BrepBuilder;
pub use topology::brep::{
    Brep, BrepId, CoEdge, CoEdgeId, Edge, EdgeId, EntityStore, Face, FaceId, Taggable, Vertex,
    VertexId, Wire, WireId,
};

/// Global tolerance configuration for geometric comparisons.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance {
    /// Points closer than this are considered coincident (model units).
    pub coincidence: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self { coincidence: 1e-6 }
    }
}

impl Tolerance {
    pub fn points_coincident(&self, a: &Point3d, b: &Point3d) -> bool {
        a.distance_to(b) < self.coincidence
    }
}

/// Default tolerance used when a caller does not supply one.
pub fn default_tolerance() -> Tolerance {
    Tolerance::default()
}
