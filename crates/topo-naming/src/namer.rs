use std::collections::HashSet;

use serde::Serialize;
use sweep_kernel::{BrepId, EdgeId, EntityStore, FaceId, SweptFaceMap, Taggable};
use topo_types::{
    coedge_tag, edge_tag, face_tag, tag_root, wrap_edge_tag, DiagnosticCode, Diagnostics,
    ProfileEdgeRole,
};
use tracing::{debug, info, instrument};

use crate::config::NamingConfig;
use crate::entity::SweepEntity;
use crate::wrap::{chain_from_anchor, wrap_anchor_point};

/// Outcome of one naming pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NamingReport {
    pub diagnostics: Diagnostics,
    pub faces_named: usize,
    pub edges_named: usize,
    pub coedges_named: usize,
    /// Edges renamed by the wrap-around pass of a short light-slot path.
    pub wrap_edges_named: usize,
}

impl NamingReport {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Name every face, edge and co-edge of a swept entity's brep.
///
/// Builds a fresh [`TopoNamer`], so issued names never leak between calls.
pub fn reconstruct_brep_names<E: SweepEntity + ?Sized>(
    store: &mut EntityStore,
    entity: &E,
    map: &SweptFaceMap,
    config: NamingConfig,
) -> NamingReport {
    TopoNamer::new(config).reconstruct_brep_names(store, entity, map)
}

/// Stateful naming engine. The only state is the set of names issued during
/// the current pass, cleared when a pass starts.
#[derive(Debug, Clone, Default)]
pub struct TopoNamer {
    config: NamingConfig,
    issued: HashSet<String>,
}

impl TopoNamer {
    pub fn new(config: NamingConfig) -> Self {
        Self {
            config,
            issued: HashSet::new(),
        }
    }

    pub fn config(&self) -> &NamingConfig {
        &self.config
    }

    /// Record `name` as issued. Returns false, with a diagnostic, when it was
    /// already issued in this pass.
    pub fn check_topo_name(&mut self, name: &str, diags: &mut Diagnostics) -> bool {
        if self.issued.insert(name.to_string()) {
            return true;
        }
        diags.push(
            DiagnosticCode::DuplicateTopoName,
            format!("topological name {name} is issued twice"),
        );
        false
    }

    #[instrument(skip_all, fields(entity = entity.id()))]
    pub fn reconstruct_brep_names<E: SweepEntity + ?Sized>(
        &mut self,
        store: &mut EntityStore,
        entity: &E,
        map: &SweptFaceMap,
    ) -> NamingReport {
        self.issued.clear();
        let mut report = NamingReport::default();

        let Some(&brep) = entity.breps().first() else {
            debug!("entity has no brep to name");
            return report;
        };
        if let Some(b) = store.breps.get_mut(brep) {
            b.set_tag(entity.id().to_string());
        }

        self.name_faces(store, entity, map, &mut report);
        self.name_edges(store, entity, map, brep, &mut report);
        self.name_coedges(store, brep, &mut report);

        info!(
            faces = report.faces_named,
            edges = report.edges_named,
            coedges = report.coedges_named,
            wrap_edges = report.wrap_edges_named,
            diagnostics = report.diagnostics.len(),
            "brep names rebuilt"
        );
        report
    }

    fn name_faces<E: SweepEntity + ?Sized>(
        &mut self,
        store: &mut EntityStore,
        entity: &E,
        map: &SweptFaceMap,
        report: &mut NamingReport,
    ) {
        let path = entity.sweep_path_3d();
        for curve in entity.profile_curves() {
            let Some(faces) = map.curve_faces(&curve.id) else {
                continue;
            };
            for (i, slot) in faces.iter().enumerate() {
                let Some(face_id) = *slot else {
                    continue;
                };
                if !store.faces.contains_key(face_id) {
                    continue;
                }
                let path_tag = path.get(i).and_then(|seg| seg.tag.as_deref());
                let name = face_tag(&curve.id, path_tag);
                if !self.check_topo_name(&name, &mut report.diagnostics) {
                    continue;
                }
                let face = &mut store.faces[face_id];
                face.set_tag(name);
                face.user_data.face_index = Some(i);
                report.faces_named += 1;
            }
        }
    }

    fn name_edges<E: SweepEntity + ?Sized>(
        &mut self,
        store: &mut EntityStore,
        entity: &E,
        map: &SweptFaceMap,
        brep: BrepId,
        report: &mut NamingReport,
    ) {
        use ProfileEdgeRole::*;

        for role in [Outer, ClosingOuter] {
            let id = role.profile_id();
            let declared = entity.profile_curves().iter().any(|c| c.id == id);
            if !declared || map.curve_faces(id).is_none() {
                report.diagnostics.push(
                    DiagnosticCode::MissingProfileCurve,
                    format!("profile curve {id} has no swept faces; edges keep their names"),
                );
                return;
            }
        }
        let is_short_path =
            map.present_count(ClosingOuter.profile_id()) < map.present_count(Outer.profile_id());

        let Some(edges) = store.breps.get(brep).map(|b| b.edges.clone()) else {
            return;
        };
        for edge in edges {
            let faces = store.edge_faces(edge);
            if faces.len() < 2 {
                report.diagnostics.push(
                    DiagnosticCode::OpenEdge,
                    format!(
                        "edge {} has {} incident faces",
                        store.edges[edge].tag,
                        faces.len()
                    ),
                );
                continue;
            }
            let (f0, f1) = (faces[0], faces[1]);
            let id0 = tag_root(&store.faces[f0].tag).to_string();
            let id1 = tag_root(&store.faces[f1].tag).to_string();
            let light_slot = ProfileEdgeRole::is_pair(&id0, &id1, ClosingOuter, WrapAnchor);
            if is_short_path && light_slot {
                continue;
            }

            let Some(name) = calc_edge_topo_name(store, f0, f1, edge) else {
                report.diagnostics.push(
                    DiagnosticCode::UnmatchedFacePair,
                    format!(
                        "edge {} is not among the edges shared by {} and {}",
                        store.edges[edge].tag, store.faces[f0].tag, store.faces[f1].tag
                    ),
                );
                continue;
            };
            if self.check_topo_name(&name, &mut report.diagnostics) {
                store.replace_edge_tag(edge, name);
                report.edges_named += 1;
            }

            let user_data = &mut store.edges[edge].user_data;
            user_data.topoed = true;
            if ProfileEdgeRole::is_pair(&id0, &id1, Outer, InnerToOuter) {
                user_data.edge_to_curve = true;
            } else if !is_short_path && light_slot {
                user_data.light_slot_path = true;
            }
        }

        if is_short_path {
            self.name_wrap_edges(store, entity, map, report);
        }
    }

    /// Name the light-slot edges of a short path by walking them from the
    /// wrap anchor: `4>5-1`, `4>5-2`, and so on.
    fn name_wrap_edges<E: SweepEntity + ?Sized>(
        &mut self,
        store: &mut EntityStore,
        entity: &E,
        map: &SweptFaceMap,
        report: &mut NamingReport,
    ) {
        let closing = ProfileEdgeRole::ClosingOuter.profile_id();
        let Some(first_face) = map.first_face(closing) else {
            return;
        };
        if !store.faces.contains_key(first_face) {
            report.diagnostics.push(
                DiagnosticCode::MissingProfileCurve,
                format!("first face of profile curve {closing} is not in the store"),
            );
            return;
        }
        let pending: Vec<EdgeId> = store
            .face_edges(first_face)
            .into_iter()
            .filter(|&e| !store.edges[e].user_data.topoed)
            .collect();
        for &e in &pending {
            let user_data = &mut store.edges[e].user_data;
            user_data.topoed = true;
            user_data.light_slot_path = true;
        }

        let Some(anchor) = wrap_anchor_point(store, entity, &self.config, &mut report.diagnostics)
        else {
            return;
        };
        let (chain, unchained) = chain_from_anchor(store, pending, &anchor, &self.config.tolerance);

        for (i, &edge) in chain.iter().enumerate() {
            let name = wrap_edge_tag(i + 1);
            if self.check_topo_name(&name, &mut report.diagnostics) {
                store.replace_edge_tag(edge, name);
                report.wrap_edges_named += 1;
            }
        }
        if !unchained.is_empty() {
            report.diagnostics.push(
                DiagnosticCode::UnchainedLightSlotEdges,
                format!(
                    "{} light-slot edges are not reachable from the wrap anchor",
                    unchained.len()
                ),
            );
        }
    }

    fn name_coedges(&mut self, store: &mut EntityStore, brep: BrepId, report: &mut NamingReport) {
        let closing_root = ProfileEdgeRole::ClosingOuter.profile_id();
        let Some(faces) = store.breps.get(brep).map(|b| b.faces.clone()) else {
            return;
        };
        for face in faces {
            let face_name = store.faces[face].tag.clone();
            let on_closing_side = tag_root(&face_name) == closing_root;
            for ce in store.face_coedges(face) {
                let edge = &store.edges[store.coedges[ce].edge];
                let name = coedge_tag(&face_name, &edge.tag);
                let light_slot = edge.user_data.light_slot_path && on_closing_side;
                if !self.check_topo_name(&name, &mut report.diagnostics) {
                    continue;
                }
                let coedge = &mut store.coedges[ce];
                coedge.set_tag(name);
                if light_slot {
                    coedge.user_data.light_slot_path = true;
                }
                report.coedges_named += 1;
            }
        }
    }
}

/// Name of `edge` as seen from the two faces it separates.
///
/// The faces are ordered by tag (then by key when tags tie), so the result
/// does not depend on argument order. The index is the position of `edge`
/// among the edges of the first wire of the lower face that touches the
/// higher face. `None` when `edge` is not in that set.
pub fn calc_edge_topo_name(
    store: &EntityStore,
    face_a: FaceId,
    face_b: FaceId,
    edge: EdgeId,
) -> Option<String> {
    let mut faces = [face_a, face_b];
    faces.sort_by(|&x, &y| {
        store.faces[x]
            .tag
            .cmp(&store.faces[y].tag)
            .then_with(|| x.cmp(&y))
    });
    let [lo, hi] = faces;

    for &wire in &store.faces[lo].wires {
        let mut shared: Vec<EdgeId> = Vec::new();
        for &ce in &store.wires[wire].coedges {
            let e = store.coedges[ce].edge;
            if !shared.contains(&e) && store.edge_faces(e).contains(&hi) {
                shared.push(e);
            }
        }
        if shared.is_empty() {
            continue;
        }
        let index = shared.iter().position(|&e| e == edge)?;
        return Some(edge_tag(&store.faces[lo].tag, &store.faces[hi].tag, index));
    }
    None
}
