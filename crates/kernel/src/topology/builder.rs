use std::collections::HashMap;

use tracing::debug;

use super::brep::*;
use crate::geometry::curves::TrimmedCurve;
use crate::geometry::point::Point3d;
use crate::operations::OperationError;

/// Incremental construction of one brep with straight edges.
///
/// Edges are shared by unordered vertex pair, so a second face naming the
/// same pair reuses the edge. Every new entity receives a provisional kernel
/// tag (`f{n}`, `e{n}`, `c{n}`) that later naming passes may replace.
pub struct BrepBuilder<'a> {
    store: &'a mut EntityStore,
    brep: BrepId,
    edge_map: HashMap<(VertexId, VertexId), EdgeId>,
    coedge_count: usize,
}

impl<'a> BrepBuilder<'a> {
    pub fn new(store: &'a mut EntityStore) -> Self {
        let brep = store.breps.insert(Brep::default());
        Self {
            store,
            brep,
            edge_map: HashMap::new(),
            coedge_count: 0,
        }
    }

    pub fn brep_id(&self) -> BrepId {
        self.brep
    }

    pub fn add_vertex(&mut self, point: Point3d) -> VertexId {
        let v = self.store.vertices.insert(Vertex {
            point,
            edges: Vec::new(),
        });
        self.store.breps[self.brep].vertices.push(v);
        v
    }

    /// Get or create the edge between two vertices. A new edge runs from `a` to `b`.
    pub fn add_edge(&mut self, a: VertexId, b: VertexId) -> Result<EdgeId, OperationError> {
        let key = if a < b { (a, b) } else { (b, a) };
        if let Some(&e) = self.edge_map.get(&key) {
            return Ok(e);
        }
        let pa = self.vertex_point(a)?;
        let pb = self.vertex_point(b)?;
        let curve = TrimmedCurve::line(pa, pb).ok_or(OperationError::DegenerateEdge)?;

        let tag = format!("e{}", self.store.breps[self.brep].edges.len());
        let e = self.store.edges.insert(Edge {
            curve,
            start_vertex: a,
            end_vertex: b,
            coedges: Vec::new(),
            brep: self.brep,
            tag: tag.clone(),
            user_data: EdgeUserData::default(),
        });
        self.store.vertices[a].edges.push(e);
        self.store.vertices[b].edges.push(e);
        self.store.breps[self.brep].edges.push(e);
        self.store.register_edge_tag(self.brep, tag, e);
        self.edge_map.insert(key, e);
        Ok(e)
    }

    /// Add a face bounded by closed vertex loops (outer first). Repeated
    /// consecutive vertices are collapsed before the loop is validated.
    pub fn add_face(&mut self, loops: &[Vec<VertexId>]) -> Result<FaceId, OperationError> {
        let loops: Vec<Vec<VertexId>> = loops.iter().map(|l| collapse_repeats(l)).collect();
        if let Some(short) = loops.iter().find(|l| l.len() < 3) {
            return Err(OperationError::InsufficientLoop {
                provided: short.len(),
            });
        }

        let tag = format!("f{}", self.store.breps[self.brep].faces.len());
        let face_id = self.store.faces.insert(Face {
            wires: Vec::new(),
            brep: self.brep,
            tag,
            user_data: FaceUserData::default(),
        });

        for verts in &loops {
            let wire_id = self.store.wires.insert(Wire {
                coedges: Vec::new(),
                face: face_id,
            });
            for i in 0..verts.len() {
                let (a, b) = (verts[i], verts[(i + 1) % verts.len()]);
                let edge_id = self.add_edge(a, b)?;
                let forward = self.store.edges[edge_id].start_vertex == a;
                let ce = self.store.coedges.insert(CoEdge {
                    edge: edge_id,
                    face: face_id,
                    wire: wire_id,
                    forward,
                    tag: format!("c{}", self.coedge_count),
                    user_data: CoEdgeUserData::default(),
                });
                self.coedge_count += 1;
                self.store.edges[edge_id].coedges.push(ce);
                self.store.wires[wire_id].coedges.push(ce);
            }
            self.store.faces[face_id].wires.push(wire_id);
        }

        self.store.breps[self.brep].faces.push(face_id);
        Ok(face_id)
    }

    pub fn finish(self) -> BrepId {
        let brep = &self.store.breps[self.brep];
        debug!(
            faces = brep.faces.len(),
            edges = brep.edges.len(),
            vertices = brep.vertices.len(),
            "brep built"
        );
        self.brep
    }

    fn vertex_point(&self, v: VertexId) -> Result<Point3d, OperationError> {
        self.store
            .vertices
            .get(v)
            .map(|v| v.point)
            .ok_or(OperationError::UnknownVertex)
    }
}

fn collapse_repeats(verts: &[VertexId]) -> Vec<VertexId> {
    let mut out: Vec<VertexId> = Vec::with_capacity(verts.len());
    for &v in verts {
        if out.last() != Some(&v) {
            out.push(v);
        }
    }
    while out.len() > 1 && out.first() == out.last() {
        out.pop();
    }
    out
}
