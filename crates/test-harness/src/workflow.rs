//! SweepBuilder: fluent API for sweeping a profile and naming the result.
//!
//! Runs the real sweep and the real naming pass; nothing is simulated.

use std::ops::Range;

use serde::Serialize;
use sweep_kernel::{
    sweep_profile, BrepId, EdgeId, EntityStore, PathSegment, Profile, SweepOptions, SweptFaceMap,
    SweptSolid,
};
use topo_naming::{reconstruct_brep_names, NamingConfig, NamingReport};
use topo_types::tag_root;
use tracing::debug;

use crate::helpers::*;

/// A fluent builder for swept, named solids.
pub struct SweepBuilder {
    id: String,
    profile: Profile,
    path: Vec<PathSegment>,
    options: SweepOptions,
    config: NamingConfig,
}

impl SweepBuilder {
    pub fn new(id: impl Into<String>, profile: Profile) -> Self {
        Self {
            id: id.into(),
            profile,
            path: Vec::new(),
            options: SweepOptions::default(),
            config: NamingConfig::default(),
        }
    }

    /// The light-slot cornice profile, unswept.
    pub fn light_slot(id: impl Into<String>) -> Self {
        Self::new(id, light_slot_profile())
    }

    pub fn path(mut self, path: Vec<PathSegment>) -> Self {
        self.path = path;
        self
    }

    /// Tagged polyline path through `points`.
    pub fn through(self, points: &[(f64, f64)]) -> Result<Self, HarnessError> {
        let path = tagged_path(points)?;
        Ok(self.path(path))
    }

    /// Sweep profile curve `curve_id` as one face over the segments in `run`.
    pub fn merge(mut self, curve_id: &str, run: Range<usize>) -> Self {
        self.options = self.options.merge(curve_id, run);
        self
    }

    pub fn naming_config(mut self, config: NamingConfig) -> Self {
        self.config = config;
        self
    }

    /// Sweep into a fresh store and run the naming pass.
    pub fn build(&self) -> Result<NamedSweep, HarnessError> {
        let mut store = EntityStore::new();
        let (solid, map) = sweep_profile(&mut store, &self.id, &self.profile, &self.path, &self.options)?;
        let report = reconstruct_brep_names(&mut store, &solid, &map, self.config);
        debug!(
            id = %self.id,
            faces = report.faces_named,
            edges = report.edges_named,
            wrap = report.wrap_edges_named,
            "built named sweep"
        );
        Ok(NamedSweep {
            store,
            solid,
            map,
            report,
        })
    }
}

/// A swept solid after naming, with the store that owns its topology.
pub struct NamedSweep {
    pub store: EntityStore,
    pub solid: SweptSolid,
    pub map: SweptFaceMap,
    pub report: NamingReport,
}

/// Every name a naming pass issued, in brep order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NameSnapshot {
    pub brep: String,
    pub faces: Vec<String>,
    pub edges: Vec<String>,
    pub coedges: Vec<String>,
}

impl NamedSweep {
    pub fn brep(&self) -> BrepId {
        self.solid.breps[0]
    }

    pub fn edges(&self) -> &[EdgeId] {
        &self.store.breps[self.brep()].edges
    }

    /// Sorted profile curve ids of the faces on either side of `edge`.
    pub fn edge_roots(&self, edge: EdgeId) -> Vec<String> {
        let mut roots: Vec<String> = self
            .store
            .edge_faces(edge)
            .iter()
            .map(|&f| tag_root(&self.store.faces[f].tag).to_string())
            .collect();
        roots.sort();
        roots
    }

    /// Edges separating a face of curve `a` from a face of curve `b`.
    pub fn edges_between(&self, a: &str, b: &str) -> Vec<EdgeId> {
        let mut want = vec![a.to_string(), b.to_string()];
        want.sort();
        self.edges()
            .iter()
            .copied()
            .filter(|&e| self.edge_roots(e) == want)
            .collect()
    }

    pub fn edge_tag(&self, edge: EdgeId) -> &str {
        &self.store.edges[edge].tag
    }

    pub fn snapshot(&self) -> NameSnapshot {
        let brep = &self.store.breps[self.brep()];
        NameSnapshot {
            brep: brep.tag.clone(),
            faces: brep.faces.iter().map(|&f| self.store.faces[f].tag.clone()).collect(),
            edges: brep.edges.iter().map(|&e| self.store.edges[e].tag.clone()).collect(),
            coedges: brep
                .faces
                .iter()
                .flat_map(|&f| self.store.face_coedges(f))
                .map(|c| self.store.coedges[c].tag.clone())
                .collect(),
        }
    }
}
