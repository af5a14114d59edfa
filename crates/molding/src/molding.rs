use std::cell::OnceCell;

use serde::{Deserialize, Serialize};
use sweep_kernel::{Point3d, TrimmedCurve, Vec3};
use topo_types::{DiagnosticCode, Diagnostics, MoldingKind};
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::config::MoldingConfig;
use crate::pather::TopoPather;
use crate::sort::sort_paths;

/// Catalog parameters carried unchanged through splits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoldingParams {
    pub profile_id: Option<String>,
    pub width: f64,
    pub height: f64,
}

impl Default for MoldingParams {
    fn default() -> Self {
        Self {
            profile_id: None,
            width: 0.01,
            height: 0.08,
        }
    }
}

/// A baseboard or cornice swept along a path assembled from fragments.
///
/// Fragments are stored un-offset. The molding's own sweep path sits
/// `offset` below them along Z, so every comparison between the two first
/// moves a copy of the fragment curve into molding space.
#[derive(Debug, Clone)]
pub struct Molding {
    id: Uuid,
    kind: MoldingKind,
    pub params: MoldingParams,
    offset: f64,
    pub auto_fit: bool,
    topo_pathers: Vec<TopoPather>,
    config: MoldingConfig,
    revision: u64,
    sweep_path: OnceCell<Vec<TrimmedCurve>>,
}

impl Molding {
    pub fn new(kind: MoldingKind, params: MoldingParams, config: MoldingConfig) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            params,
            offset: 0.0,
            auto_fit: true,
            topo_pathers: Vec::new(),
            config,
            revision: 0,
            sweep_path: OnceCell::new(),
        }
    }

    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn kind(&self) -> MoldingKind {
        self.kind
    }

    pub fn config(&self) -> &MoldingConfig {
        &self.config
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn set_offset(&mut self, offset: f64) {
        if offset != self.offset {
            self.offset = offset;
            self.dirty_geometry();
        }
    }

    pub fn topo_pathers(&self) -> &[TopoPather] {
        &self.topo_pathers
    }

    /// Replace the fragment list. Bumps [`Self::revision`].
    pub fn set_topo_pathers(&mut self, pathers: Vec<TopoPather>) {
        self.topo_pathers = pathers;
        self.revision += 1;
        self.dirty_geometry();
    }

    /// Counter bumped whenever the fragment list is reassigned.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Drop the cached sweep path.
    pub fn dirty_geometry(&mut self) {
        self.sweep_path = OnceCell::new();
    }

    fn has_offset(&self) -> bool {
        self.offset.abs() > self.config.offset_epsilon
    }

    /// Copy of a fragment curve moved into molding space.
    fn to_molding_space(&self, curve: &TrimmedCurve) -> TrimmedCurve {
        if self.has_offset() {
            curve.translated(Vec3::new(0.0, 0.0, -self.offset))
        } else {
            *curve
        }
    }

    /// Chain the fragments' curves into one path.
    ///
    /// Empty when there are no fragments, or (with a diagnostic) when none
    /// of them is realizable. Disjoint chains are reported and concatenated
    /// in the order they were found. With `apply_offset` the result is in
    /// molding space.
    pub fn calc_sweep_path(&self, apply_offset: bool, diags: &mut Diagnostics) -> Vec<TrimmedCurve> {
        if self.topo_pathers.is_empty() {
            return Vec::new();
        }
        let curves: Vec<TrimmedCurve> = self
            .topo_pathers
            .iter()
            .filter_map(TopoPather::sweep_path)
            .collect();
        if curves.is_empty() {
            diags.push(
                DiagnosticCode::EmptySweepPath,
                format!("molding {} has no realizable sweep path", self.id),
            );
            return Vec::new();
        }

        let groups = sort_paths(&curves, self.config.point_tolerance);
        if groups.len() > 1 {
            diags.push(
                DiagnosticCode::DisjointSweepPath,
                format!("sweep path of molding {} falls into {} chains", self.id, groups.len()),
            );
        }
        let path = groups.into_iter().flatten();
        if apply_offset {
            path.map(|c| self.to_molding_space(&c)).collect()
        } else {
            path.collect()
        }
    }

    /// Cached molding-space sweep path. Diagnostics raised while computing
    /// it are only logged; use [`Self::calc_sweep_path`] to collect them.
    pub fn sweep_path(&self) -> &[TrimmedCurve] {
        self.sweep_path
            .get_or_init(|| self.calc_sweep_path(true, &mut Diagnostics::new()))
    }

    /// Fragment whose curve is the first curve of the sweep path.
    pub fn get_start_topo_pather(&self) -> Option<&TopoPather> {
        let first = *self.sweep_path().first()?;
        self.find_pather_in_molding_space(&first)
    }

    /// Fragment whose curve is the last curve of the sweep path.
    pub fn get_end_topo_pather(&self) -> Option<&TopoPather> {
        let last = *self.sweep_path().last()?;
        self.find_pather_in_molding_space(&last)
    }

    fn find_pather_in_molding_space(&self, curve: &TrimmedCurve) -> Option<&TopoPather> {
        self.topo_pathers.iter().find(|p| {
            p.sweep_path().is_some_and(|c| {
                self.to_molding_space(&c)
                    .endpoints_match(curve, self.config.point_tolerance)
            })
        })
    }

    /// The molding sits inside a wall rather than on its face.
    pub fn is_in_wall(&self) -> bool {
        self.has_offset()
    }

    /// The fragments realize a non-empty path.
    pub fn exists(&self) -> bool {
        !self.calc_sweep_path(false, &mut Diagnostics::new()).is_empty()
    }

    /// Copy of this molding with a new id and the given fragments.
    pub fn clone_with_pathers(&self, pathers: Vec<TopoPather>) -> Molding {
        Molding {
            id: Uuid::new_v4(),
            kind: self.kind,
            params: self.params.clone(),
            offset: self.offset,
            auto_fit: self.auto_fit,
            topo_pathers: pathers,
            config: self.config,
            revision: 0,
            sweep_path: OnceCell::new(),
        }
    }

    /// Split at a molding-space point.
    ///
    /// Walks the path in order; the fragment under each curve whose interior
    /// contains the point is cut in two and a new group starts after it.
    /// Each group becomes a new molding, so `n` successful cuts produce
    /// `n + 1` moldings. A cut that does not yield exactly two fragments is
    /// reported and the fragment kept whole. When no fragment realizes a
    /// curve the single group is empty and one molding without fragments
    /// comes back. Returns nothing, with a diagnostic, when the molding has
    /// no fragments.
    #[instrument(skip(self, diags), fields(molding = %self.id))]
    pub fn split(&self, point: &Point3d, diags: &mut Diagnostics) -> Vec<Molding> {
        if self.topo_pathers.is_empty() {
            diags.push(
                DiagnosticCode::NothingToSplit,
                format!("molding {} has no sweep path to split", self.id),
            );
            return Vec::new();
        }

        let point = if self.has_offset() {
            *point + Vec3::new(0.0, 0.0, self.offset)
        } else {
            *point
        };
        let tol = self.config.point_tolerance;
        let eps = self.config.param_epsilon;

        let mut groups: Vec<Vec<TopoPather>> = vec![Vec::new()];
        for curve in self.calc_sweep_path(false, diags) {
            let Some(pather) = self
                .topo_pathers
                .iter()
                .find(|p| p.sweep_path().is_some_and(|c| c.endpoints_match(&curve, tol)))
            else {
                continue;
            };

            let t = curve.param_at(&point);
            let interior = curve.start_param() - t < eps && curve.end_param() - t > eps;
            if interior && curve.distance_to_point(&point) <= tol {
                let parts = pather.split_by_points(&[point]);
                if let [head, tail] = parts.as_slice() {
                    if let Some(current) = groups.last_mut() {
                        current.push(head.clone());
                    }
                    groups.push(vec![tail.clone()]);
                    continue;
                }
                diags.push(
                    DiagnosticCode::InvalidSplitResult,
                    format!("cutting fragment {} produced {} pieces", pather.index, parts.len()),
                );
            }
            if let Some(current) = groups.last_mut() {
                current.push(pather.clone());
            }
        }

        let moldings: Vec<Molding> = groups
            .into_iter()
            .map(|g| self.clone_with_pathers(g))
            .collect();
        debug!(pieces = moldings.len(), "molding split");
        moldings
    }

    /// Append a fragment if the result is still one connected chain.
    ///
    /// A fragment without a realizable curve is refused. The first fragment
    /// of an empty molding is always accepted.
    pub fn add_topo_pather(&mut self, pather: TopoPather, diags: &mut Diagnostics) -> bool {
        let Some(curve) = pather.sweep_path() else {
            diags.push(
                DiagnosticCode::UnrealizablePather,
                format!("fragment {} has no sweep path", pather.index),
            );
            return false;
        };
        if self.topo_pathers.is_empty() {
            self.set_topo_pathers(vec![pather]);
            return true;
        }

        let mut curves: Vec<TrimmedCurve> = self
            .topo_pathers
            .iter()
            .filter_map(TopoPather::sweep_path)
            .collect();
        curves.push(curve);
        if sort_paths(&curves, self.config.point_tolerance).len() != 1 {
            diags.push(
                DiagnosticCode::NonContiguousPather,
                format!("fragment {} does not continue the path", pather.index),
            );
            return false;
        }

        let mut pathers = self.topo_pathers.clone();
        pathers.push(pather);
        self.set_topo_pathers(pathers);
        true
    }
}
