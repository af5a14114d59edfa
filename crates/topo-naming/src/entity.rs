use sweep_kernel::{BrepId, PathSegment, Plane, ProfileCurve, SweptSolid};

/// What the naming pass needs to know about a swept entity.
pub trait SweepEntity {
    fn id(&self) -> &str;
    /// Breps of the entity; only the first one has its edges named.
    fn breps(&self) -> &[BrepId];
    fn sweep_path_3d(&self) -> &[PathSegment];
    fn profile_curves(&self) -> &[ProfileCurve];
    /// Frame that lifts profile coordinates into model space.
    fn local_coordinate(&self) -> Plane;
}

impl SweepEntity for SweptSolid {
    fn id(&self) -> &str {
        &self.id
    }

    fn breps(&self) -> &[BrepId] {
        &self.breps
    }

    fn sweep_path_3d(&self) -> &[PathSegment] {
        &self.path
    }

    fn profile_curves(&self) -> &[ProfileCurve] {
        self.profile.all_curves()
    }

    fn local_coordinate(&self) -> Plane {
        self.local_coordinate
    }
}
