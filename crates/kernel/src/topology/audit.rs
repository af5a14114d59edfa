use tracing::{info, instrument};

use super::brep::*;

/// Result of a topological consistency check on one brep.
#[derive(Debug, Clone)]
pub struct TopologyAudit {
    pub all_wires_closed: bool,
    /// Every edge is used by exactly two co-edges.
    pub all_edges_two_faced: bool,
    pub back_references_consistent: bool,
    pub errors: Vec<TopologyError>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TopologyError {
    OpenWire { wire: WireId },
    /// Edge used by other than two co-edges (boundary or non-manifold).
    EdgeUseCount { edge: EdgeId, uses: usize },
    /// A vertex does not list an edge that ends on it.
    MissingVertexEdge { vertex: VertexId, edge: EdgeId },
    /// A co-edge is not listed by its edge.
    MissingEdgeCoEdge { edge: EdgeId, coedge: CoEdgeId },
}

impl TopologyAudit {
    pub fn all_valid(&self) -> bool {
        self.all_wires_closed && self.all_edges_two_faced && self.back_references_consistent
    }
}

/// Check wire closure, edge use counts and back-references of a brep.
#[instrument(skip(store))]
pub fn audit_brep(store: &EntityStore, brep_id: BrepId) -> TopologyAudit {
    let brep = &store.breps[brep_id];
    let mut errors = Vec::new();

    for &face_id in &brep.faces {
        for &wire_id in &store.faces[face_id].wires {
            if !is_wire_closed(store, wire_id) {
                errors.push(TopologyError::OpenWire { wire: wire_id });
            }
            for &ce in &store.wires[wire_id].coedges {
                let edge = store.coedges[ce].edge;
                if !store.edges[edge].coedges.contains(&ce) {
                    errors.push(TopologyError::MissingEdgeCoEdge { edge, coedge: ce });
                }
            }
        }
    }

    for &edge_id in &brep.edges {
        let edge = &store.edges[edge_id];
        if edge.coedges.len() != 2 {
            errors.push(TopologyError::EdgeUseCount {
                edge: edge_id,
                uses: edge.coedges.len(),
            });
        }
        for v in [edge.start_vertex, edge.end_vertex] {
            if !store.vertices[v].edges.contains(&edge_id) {
                errors.push(TopologyError::MissingVertexEdge {
                    vertex: v,
                    edge: edge_id,
                });
            }
        }
    }

    let audit = TopologyAudit {
        all_wires_closed: !errors.iter().any(|e| matches!(e, TopologyError::OpenWire { .. })),
        all_edges_two_faced: !errors
            .iter()
            .any(|e| matches!(e, TopologyError::EdgeUseCount { .. })),
        back_references_consistent: !errors.iter().any(|e| {
            matches!(
                e,
                TopologyError::MissingVertexEdge { .. } | TopologyError::MissingEdgeCoEdge { .. }
            )
        }),
        errors,
    };
    info!(errors = audit.errors.len(), "brep audit complete");
    audit
}

/// Each co-edge must start where the previous one ended.
fn is_wire_closed(store: &EntityStore, wire_id: WireId) -> bool {
    let coedges = &store.wires[wire_id].coedges;
    if coedges.is_empty() {
        return false;
    }
    let ends: Vec<(VertexId, VertexId)> = coedges
        .iter()
        .map(|&ce| {
            let c = &store.coedges[ce];
            let e = &store.edges[c.edge];
            if c.forward {
                (e.start_vertex, e.end_vertex)
            } else {
                (e.end_vertex, e.start_vertex)
            }
        })
        .collect();
    (0..ends.len()).all(|i| ends[i].1 == ends[(i + 1) % ends.len()].0)
}
