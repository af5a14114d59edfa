use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use slotmap::{new_key_type, SlotMap};

use crate::geometry::curves::TrimmedCurve;
use crate::geometry::point::Point3d;

// ─── Entity Keys ─────────────────────────────────────────────────────────────

new_key_type! {
    pub struct VertexId;
    pub struct EdgeId;
    pub struct CoEdgeId;
    pub struct WireId;
    pub struct FaceId;
    pub struct BrepId;
}

// ─── Annotations ─────────────────────────────────────────────────────────────

/// Entities that carry a mutable topological name.
pub trait Taggable {
    fn tag(&self) -> &str;
    fn set_tag(&mut self, tag: String);
}

macro_rules! impl_taggable {
    ($($ty:ty),*) => {
        $(impl Taggable for $ty {
            fn tag(&self) -> &str {
                &self.tag
            }

            fn set_tag(&mut self, tag: String) {
                self.tag = tag;
            }
        })*
    };
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaceUserData {
    /// Index of the path segment the face was swept along.
    pub face_index: Option<usize>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeUserData {
    /// The naming pass has visited this edge.
    pub topoed: bool,
    /// Edge between the outer profile curve and its inner return curve.
    pub edge_to_curve: bool,
    /// Edge bounds a light-slot channel.
    pub light_slot_path: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoEdgeUserData {
    pub light_slot_path: bool,
}

// ─── Topological Entities ───────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vertex {
    pub point: Point3d,
    /// Incident edges, in creation order.
    pub edges: Vec<EdgeId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    pub curve: TrimmedCurve,
    pub start_vertex: VertexId,
    pub end_vertex: VertexId,
    /// One co-edge per incident face use.
    pub coedges: Vec<CoEdgeId>,
    pub brep: BrepId,
    pub tag: String,
    pub user_data: EdgeUserData,
}

/// A use of an edge by one face's wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoEdge {
    pub edge: EdgeId,
    pub face: FaceId,
    pub wire: WireId,
    /// true if the wire traverses the edge from start to end vertex.
    pub forward: bool,
    pub tag: String,
    pub user_data: CoEdgeUserData,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wire {
    pub coedges: Vec<CoEdgeId>,
    pub face: FaceId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Face {
    /// Outer wire first, then holes.
    pub wires: Vec<WireId>,
    pub brep: BrepId,
    pub tag: String,
    pub user_data: FaceUserData,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Brep {
    pub faces: Vec<FaceId>,
    pub edges: Vec<EdgeId>,
    pub vertices: Vec<VertexId>,
    pub tag: String,
    /// Lookup of edges by their current tag.
    edge_tags: HashMap<String, EdgeId>,
}

impl_taggable!(Brep, Face, Edge, CoEdge);

// ─── Entity Store ────────────────────────────────────────────────────────────

/// Arena-based storage for all topological entities.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntityStore {
    pub vertices: SlotMap<VertexId, Vertex>,
    pub edges: SlotMap<EdgeId, Edge>,
    pub coedges: SlotMap<CoEdgeId, CoEdge>,
    pub wires: SlotMap<WireId, Wire>,
    pub faces: SlotMap<FaceId, Face>,
    pub breps: SlotMap<BrepId, Brep>,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Co-edges of every wire of a face, in wire order.
    pub fn face_coedges(&self, face_id: FaceId) -> Vec<CoEdgeId> {
        self.faces[face_id]
            .wires
            .iter()
            .flat_map(|&w| self.wires[w].coedges.iter().copied())
            .collect()
    }

    /// Distinct edges bounding a face, in wire order.
    pub fn face_edges(&self, face_id: FaceId) -> Vec<EdgeId> {
        let mut edges = Vec::new();
        for ce in self.face_coedges(face_id) {
            let e = self.coedges[ce].edge;
            if !edges.contains(&e) {
                edges.push(e);
            }
        }
        edges
    }

    /// Distinct faces using an edge, in co-edge order.
    pub fn edge_faces(&self, edge_id: EdgeId) -> Vec<FaceId> {
        let mut faces = Vec::new();
        for &ce in &self.edges[edge_id].coedges {
            let f = self.coedges[ce].face;
            if !faces.contains(&f) {
                faces.push(f);
            }
        }
        faces
    }

    pub fn edge_start_point(&self, edge_id: EdgeId) -> Point3d {
        self.vertices[self.edges[edge_id].start_vertex].point
    }

    pub fn edge_end_point(&self, edge_id: EdgeId) -> Point3d {
        self.vertices[self.edges[edge_id].end_vertex].point
    }

    /// Rename an edge and keep the owning brep's tag index in step.
    pub fn replace_edge_tag(&mut self, edge_id: EdgeId, new_tag: String) {
        let (brep_id, old_tag) = {
            let edge = &self.edges[edge_id];
            (edge.brep, edge.tag.clone())
        };
        if let Some(brep) = self.breps.get_mut(brep_id) {
            if brep.edge_tags.get(&old_tag) == Some(&edge_id) {
                brep.edge_tags.remove(&old_tag);
            }
            brep.edge_tags.insert(new_tag.clone(), edge_id);
        }
        self.edges[edge_id].tag = new_tag;
    }

    pub fn edge_by_tag(&self, brep_id: BrepId, tag: &str) -> Option<EdgeId> {
        self.breps.get(brep_id)?.edge_tags.get(tag).copied()
    }

    pub fn face_by_tag(&self, brep_id: BrepId, tag: &str) -> Option<FaceId> {
        self.breps
            .get(brep_id)?
            .faces
            .iter()
            .copied()
            .find(|&f| self.faces[f].tag == tag)
    }

    pub(crate) fn register_edge_tag(&mut self, brep_id: BrepId, tag: String, edge_id: EdgeId) {
        self.breps[brep_id].edge_tags.insert(tag, edge_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::builder::BrepBuilder;

    fn triangle_pair(store: &mut EntityStore) -> (BrepId, FaceId, FaceId) {
        let mut b = BrepBuilder::new(store);
        let v0 = b.add_vertex(Point3d::new(0.0, 0.0, 0.0));
        let v1 = b.add_vertex(Point3d::new(1.0, 0.0, 0.0));
        let v2 = b.add_vertex(Point3d::new(0.0, 1.0, 0.0));
        let v3 = b.add_vertex(Point3d::new(1.0, 1.0, 0.0));
        let f0 = b.add_face(&[vec![v0, v1, v2]]).unwrap();
        let f1 = b.add_face(&[vec![v1, v3, v2]]).unwrap();
        (b.finish(), f0, f1)
    }

    #[test]
    fn test_shared_edge_sees_both_faces() {
        let mut store = EntityStore::new();
        let (brep, f0, f1) = triangle_pair(&mut store);
        assert_eq!(store.breps[brep].edges.len(), 5);
        let shared: Vec<EdgeId> = store
            .face_edges(f0)
            .into_iter()
            .filter(|e| store.face_edges(f1).contains(e))
            .collect();
        assert_eq!(shared.len(), 1);
        assert_eq!(store.edge_faces(shared[0]), vec![f0, f1]);
    }

    #[test]
    fn test_replace_edge_tag_updates_index() {
        let mut store = EntityStore::new();
        let (brep, f0, _) = triangle_pair(&mut store);
        let e = store.face_edges(f0)[0];
        let old = store.edges[e].tag.clone();
        assert_eq!(store.edge_by_tag(brep, &old), Some(e));

        store.replace_edge_tag(e, "renamed".to_string());
        assert_eq!(store.edges[e].tag(), "renamed");
        assert_eq!(store.edge_by_tag(brep, "renamed"), Some(e));
        assert_eq!(store.edge_by_tag(brep, &old), None);
    }

    #[test]
    fn test_face_lookup_by_tag() {
        let mut store = EntityStore::new();
        let (brep, _, f1) = triangle_pair(&mut store);
        store.faces[f1].set_tag("side".to_string());
        assert_eq!(store.face_by_tag(brep, "side"), Some(f1));
        assert_eq!(store.face_by_tag(brep, "missing"), None);
    }
}
