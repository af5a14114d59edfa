use std::collections::HashMap;
use std::ops::Range;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::geometry::curves::{Curve2d, TrimmedCurve};
use crate::geometry::plane::Plane;
use crate::geometry::point::{Point2d, Point3d};
use crate::geometry::vector::Vec3;
use crate::operations::OperationError;
use crate::topology::brep::*;
use crate::topology::builder::BrepBuilder;
use crate::Tolerance;

/// One curve of a sweep cross-section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileCurve {
    /// Stable identity, conventionally "1".."N". Faces swept from this curve
    /// are named after it.
    pub id: String,
    /// Identity of the profile point this curve starts at.
    pub start_point_id: Option<u32>,
    pub curve: Curve2d,
}

impl ProfileCurve {
    pub fn new(id: impl Into<String>, start_point_id: Option<u32>, curve: Curve2d) -> Self {
        Self {
            id: id.into(),
            start_point_id,
            curve,
        }
    }
}

/// A closed cross-section: each curve ends where the next one starts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub curves: Vec<ProfileCurve>,
}

impl Profile {
    pub fn new(curves: Vec<ProfileCurve>) -> Self {
        Self { curves }
    }

    /// Closed polygon through `points`. Curve `k` runs from point `k` to
    /// point `k + 1` and carries id and start point id `k + 1`.
    pub fn polygon(points: &[(f64, f64)]) -> Self {
        let n = points.len();
        Self::new(
            (0..n)
                .map(|k| {
                    let (x0, y0) = points[k];
                    let (x1, y1) = points[(k + 1) % n];
                    ProfileCurve::new(
                        (k + 1).to_string(),
                        Some(k as u32 + 1),
                        Curve2d::Line2d {
                            start: Point2d::new(x0, y0),
                            end: Point2d::new(x1, y1),
                        },
                    )
                })
                .collect(),
        )
    }

    pub fn all_curves(&self) -> &[ProfileCurve] {
        &self.curves
    }

    pub fn curve(&self, id: &str) -> Option<&ProfileCurve> {
        self.curves.iter().find(|c| c.id == id)
    }

    fn check_closed(&self, tol: &Tolerance) -> Result<(), OperationError> {
        for (i, c) in self.curves.iter().enumerate() {
            let next = &self.curves[(i + 1) % self.curves.len()];
            if c.curve.end_point().distance_to(&next.curve.start_point()) >= tol.coincidence {
                return Err(OperationError::OpenProfile {
                    curve_id: c.id.clone(),
                });
            }
        }
        Ok(())
    }
}

/// A segment of the sweep path, optionally tagged as a named stop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathSegment {
    pub curve: TrimmedCurve,
    pub tag: Option<String>,
}

impl PathSegment {
    pub fn tagged(curve: TrimmedCurve, tag: impl Into<String>) -> Self {
        Self {
            curve,
            tag: Some(tag.into()),
        }
    }

    pub fn untagged(curve: TrimmedCurve) -> Self {
        Self { curve, tag: None }
    }
}

/// Faces generated by each profile curve, one slot per path segment.
///
/// A slot is `None` where the curve produced no face for that segment: the
/// segment was degenerate, or the face of a merged run sits in the run's
/// first slot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SweptFaceMap {
    faces: HashMap<String, Vec<Option<FaceId>>>,
}

impl SweptFaceMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, curve_id: impl Into<String>, faces: Vec<Option<FaceId>>) {
        self.faces.insert(curve_id.into(), faces);
    }

    pub fn curve_faces(&self, curve_id: &str) -> Option<&[Option<FaceId>]> {
        self.faces.get(curve_id).map(Vec::as_slice)
    }

    /// Number of slots that hold a face.
    pub fn present_count(&self, curve_id: &str) -> usize {
        self.curve_faces(curve_id)
            .map_or(0, |faces| faces.iter().flatten().count())
    }

    pub fn first_face(&self, curve_id: &str) -> Option<FaceId> {
        self.curve_faces(curve_id)?.iter().flatten().next().copied()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SweepOptions {
    /// Runs of path segments over which a profile curve sweeps a single
    /// face, keyed by profile curve id.
    pub merged_runs: HashMap<String, Vec<Range<usize>>>,
}

impl SweepOptions {
    pub fn merge(mut self, curve_id: impl Into<String>, run: Range<usize>) -> Self {
        self.merged_runs.entry(curve_id.into()).or_default().push(run);
        self
    }
}

/// A solid produced by sweeping a profile along a path.
#[derive(Debug, Clone)]
pub struct SweptSolid {
    pub id: String,
    pub breps: Vec<BrepId>,
    pub path: Vec<PathSegment>,
    pub profile: Profile,
    /// Frame of the profile at the start of the path.
    pub local_coordinate: Plane,
}

/// Sweep a closed profile along a polyline path to create a capped solid.
///
/// The profile is placed at every distinct path point using a
/// rotation-minimizing frame whose binormal starts as close to +Z as the
/// first segment allows, so profile `y` reads as height for horizontal
/// paths. Each profile curve sweeps one quadrilateral face per path
/// segment, in profile order, followed by the start and end caps.
/// Longitudinal edges always run from a path point to the next one.
///
/// Path segments are chord-approximated and profile arcs contribute only
/// their endpoints.
#[instrument(skip(store, profile, path, options))]
pub fn sweep_profile(
    store: &mut EntityStore,
    id: &str,
    profile: &Profile,
    path: &[PathSegment],
    options: &SweepOptions,
) -> Result<(SweptSolid, SweptFaceMap), OperationError> {
    let tol = crate::default_tolerance();
    let n_prof = profile.curves.len();
    if n_prof < 3 {
        return Err(OperationError::InsufficientProfile {
            required: 3,
            provided: n_prof,
        });
    }
    profile.check_closed(&tol)?;

    let Some(first) = path.first() else {
        return Err(OperationError::InsufficientPath {
            required: 2,
            provided: 0,
        });
    };
    for i in 1..path.len() {
        if !tol.points_coincident(&path[i - 1].curve.end_point(), &path[i].curve.start_point()) {
            return Err(OperationError::DisconnectedPath { segment: i });
        }
    }

    // Distinct path points; `station_of[k]` is the station of path point k.
    let mut stations = vec![first.curve.start_point()];
    let mut station_of = vec![0usize];
    for seg in path {
        let p = seg.curve.end_point();
        if !tol.points_coincident(&stations[stations.len() - 1], &p) {
            stations.push(p);
        }
        station_of.push(stations.len() - 1);
    }
    if stations.len() < 2 {
        return Err(OperationError::InsufficientPath {
            required: 2,
            provided: stations.len(),
        });
    }

    let runs = resolve_runs(profile, path.len(), options)?;
    let frames = compute_frames(&stations);
    let local_coordinate = Plane {
        origin: stations[0],
        x_axis: frames[0].normal,
        y_axis: frames[0].binormal,
    };
    let profile_points: Vec<Point2d> = profile
        .curves
        .iter()
        .map(|c| c.curve.start_point())
        .collect();

    let mut builder = BrepBuilder::new(store);

    let mut rings: Vec<Vec<VertexId>> = Vec::with_capacity(stations.len());
    for (origin, frame) in stations.iter().zip(&frames) {
        let mut ring = Vec::with_capacity(n_prof);
        for p in &profile_points {
            ring.push(builder.add_vertex(*origin + frame.normal * p.x + frame.binormal * p.y));
        }
        rings.push(ring);
    }

    for s in 0..stations.len() - 1 {
        for j in 0..n_prof {
            builder.add_edge(rings[s][j], rings[s + 1][j])?;
        }
    }

    let mut face_map = SweptFaceMap::new();
    for (k, pc) in profile.curves.iter().enumerate() {
        let (a, b) = (k, (k + 1) % n_prof);
        let mut slots = vec![None; path.len()];
        let mut seg = 0;
        while seg < path.len() {
            let run = runs
                .get(&k)
                .and_then(|rs| rs.iter().find(|r| r.start == seg))
                .cloned()
                .unwrap_or(seg..seg + 1);
            let (s, e) = (station_of[run.start], station_of[run.end]);
            if s != e {
                let mut face_loop = vec![rings[s][a]];
                face_loop.extend((s..=e).map(|t| rings[t][b]));
                face_loop.extend((s + 1..=e).rev().map(|t| rings[t][a]));
                slots[run.start] = Some(builder.add_face(&[face_loop])?);
            }
            seg = run.end;
        }
        face_map.insert(pc.id.clone(), slots);
    }

    let last = stations.len() - 1;
    let start_cap: Vec<VertexId> = rings[0].iter().rev().copied().collect();
    builder.add_face(&[start_cap])?;
    builder.add_face(&[rings[last].clone()])?;

    let brep = builder.finish();
    debug!(
        id,
        segments = path.len(),
        stations = stations.len(),
        "profile swept"
    );

    Ok((
        SweptSolid {
            id: id.to_string(),
            breps: vec![brep],
            path: path.to_vec(),
            profile: profile.clone(),
            local_coordinate,
        },
        face_map,
    ))
}

/// Validate merge runs and key them by profile curve position. Runs must be
/// non-empty, inside the path and must not overlap.
fn resolve_runs(
    profile: &Profile,
    segments: usize,
    options: &SweepOptions,
) -> Result<HashMap<usize, Vec<Range<usize>>>, OperationError> {
    let mut runs = HashMap::new();
    for (curve_id, ranges) in &options.merged_runs {
        let k = profile
            .curves
            .iter()
            .position(|c| &c.id == curve_id)
            .ok_or_else(|| OperationError::UnknownProfileCurve { id: curve_id.clone() })?;
        let mut sorted = ranges.clone();
        sorted.sort_by_key(|r| r.start);
        let mut covered = 0;
        for r in &sorted {
            if r.start >= r.end || r.end > segments || r.start < covered {
                return Err(OperationError::MergeRunOutOfRange {
                    curve_id: curve_id.clone(),
                    start: r.start,
                    end: r.end,
                    segments,
                });
            }
            covered = r.end;
        }
        runs.insert(k, sorted);
    }
    Ok(runs)
}

/// A local coordinate frame at a path point.
struct Frame {
    tangent: Vec3,
    normal: Vec3,
    binormal: Vec3,
}

/// Rotation-minimizing frames (double reflection) along distinct points.
fn compute_frames(points: &[Point3d]) -> Vec<Frame> {
    let n = points.len();
    let dir = |i: usize| (points[i + 1] - points[i]).normalized().unwrap_or(Vec3::X);
    let mut frames: Vec<Frame> = Vec::with_capacity(n);

    let t0 = dir(0);
    let n0 = Vec3::Z.cross(&t0).normalized().unwrap_or(Vec3::X);
    frames.push(Frame {
        tangent: t0,
        normal: n0,
        binormal: t0.cross(&n0),
    });

    for i in 1..n {
        let prev = &frames[i - 1];
        let ti = if i < n - 1 {
            (dir(i - 1) + dir(i)).normalized().unwrap_or(dir(i - 1))
        } else {
            dir(i - 1)
        };

        let v1 = points[i] - points[i - 1];
        let c1 = v1.dot(&v1);
        let r_l = prev.normal - v1 * (2.0 * v1.dot(&prev.normal) / c1);
        let t_l = prev.tangent - v1 * (2.0 * v1.dot(&prev.tangent) / c1);

        let v2 = ti - t_l;
        let c2 = v2.dot(&v2);
        let ni = if c2 < 1e-30 {
            r_l
        } else {
            r_l - v2 * (2.0 * v2.dot(&r_l) / c2)
        };

        frames.push(Frame {
            tangent: ti,
            normal: ni,
            binormal: ti.cross(&ni),
        });
    }

    frames
}
