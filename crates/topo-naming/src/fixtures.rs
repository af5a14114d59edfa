use sweep_kernel::{
    sweep_profile, EntityStore, PathSegment, Point3d, Profile, SweepOptions, SweptFaceMap,
    SweptSolid, TrimmedCurve,
};

/// Seven-curve light-slot profile: curve 7 meets curve 1 at the origin and
/// curves 4/5 bound the channel.
pub fn light_slot_profile() -> Profile {
    Profile::polygon(&[
        (0.0, 0.0),
        (10.0, 0.0),
        (10.0, 5.0),
        (6.0, 5.0),
        (6.0, 8.0),
        (2.0, 8.0),
        (0.0, 8.0),
    ])
}

pub fn box_profile() -> Profile {
    Profile::polygon(&[(0.0, 0.0), (4.0, 0.0), (4.0, 3.0), (0.0, 3.0)])
}

/// Straight path along +X with `segments` segments tagged by `tag(i)`.
pub fn straight_path(segments: usize, tag: impl Fn(usize) -> Option<String>) -> Vec<PathSegment> {
    (0..segments)
        .map(|i| {
            let a = Point3d::new(100.0 * i as f64, 0.0, 0.0);
            let b = Point3d::new(100.0 * (i + 1) as f64, 0.0, 0.0);
            PathSegment {
                curve: TrimmedCurve::line(a, b).unwrap(),
                tag: tag(i),
            }
        })
        .collect()
}

pub fn s_tags(i: usize) -> Option<String> {
    Some(format!("s{i}"))
}

pub fn sweep(
    store: &mut EntityStore,
    profile: &Profile,
    path: &[PathSegment],
    options: &SweepOptions,
) -> (SweptSolid, SweptFaceMap) {
    sweep_profile(store, "molding-1", profile, path, options).unwrap()
}

/// Light-slot solid whose curve 4 sweeps one face over all four segments.
pub fn short_path_slot(store: &mut EntityStore) -> (SweptSolid, SweptFaceMap) {
    sweep(
        store,
        &light_slot_profile(),
        &straight_path(4, s_tags),
        &SweepOptions::default().merge("4", 0..4),
    )
}
