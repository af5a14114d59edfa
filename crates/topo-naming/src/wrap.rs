use sweep_kernel::{EdgeId, EntityStore, Point3d, Tolerance};
use topo_types::{tag_root, DiagnosticCode, Diagnostics, ProfileEdgeRole};
use tracing::debug;

use crate::config::NamingConfig;
use crate::entity::SweepEntity;

/// Model-space point where the wrap-around chain of light-slot edges starts.
///
/// The start of the profile curve that begins at point 5 is lifted through
/// the entity's local coordinate and matched against the vertices of edges
/// between `4-*` and `5-*` faces in every brep of the entity. An exact
/// match wins; otherwise the nearest such vertex is returned. `None`, with a
/// diagnostic, when there is no such curve or no such vertex.
pub fn wrap_anchor_point<E: SweepEntity + ?Sized>(
    store: &EntityStore,
    entity: &E,
    config: &NamingConfig,
    diags: &mut Diagnostics,
) -> Option<Point3d> {
    let anchor_id = ProfileEdgeRole::WrapAnchor.point_id();
    let Some(curve) = entity
        .profile_curves()
        .iter()
        .find(|c| c.start_point_id == Some(anchor_id))
    else {
        diags.push(
            DiagnosticCode::MissingWrapAnchor,
            format!("no profile curve starts at point {anchor_id}"),
        );
        return None;
    };
    let plane = entity.local_coordinate();
    let target = plane
        .curve_3d(&curve.curve)
        .map(|c| c.start_point())
        .unwrap_or_else(|| plane.to_3d(&curve.curve.start_point()));

    let candidates = light_slot_vertices(store, entity);
    if let Some(exact) = candidates
        .iter()
        .find(|p| config.tolerance.points_coincident(p, &target))
    {
        return Some(*exact);
    }
    let nearest = candidates
        .into_iter()
        .min_by(|a, b| a.distance_to(&target).total_cmp(&b.distance_to(&target)));
    match nearest {
        Some(p) => {
            debug!(drift = p.distance_to(&target), "wrap anchor snapped to nearest vertex");
            Some(p)
        }
        None => {
            diags.push(
                DiagnosticCode::MissingWrapAnchor,
                "no vertex lies on an edge between light-slot faces",
            );
            None
        }
    }
}

fn light_slot_vertices<E: SweepEntity + ?Sized>(store: &EntityStore, entity: &E) -> Vec<Point3d> {
    use ProfileEdgeRole::{ClosingOuter, WrapAnchor};

    let mut points = Vec::new();
    for &brep in entity.breps() {
        let Some(brep) = store.breps.get(brep) else {
            continue;
        };
        for &edge in &brep.edges {
            let faces = store.edge_faces(edge);
            if faces.len() < 2 {
                continue;
            }
            let r0 = tag_root(&store.faces[faces[0]].tag);
            let r1 = tag_root(&store.faces[faces[1]].tag);
            if ProfileEdgeRole::is_pair(r0, r1, ClosingOuter, WrapAnchor) {
                points.push(store.edge_start_point(edge));
                points.push(store.edge_end_point(edge));
            }
        }
    }
    points
}

/// Greedily chain `edges` end to start, beginning with the edge that starts
/// at `anchor`. Returns the chain and the edges it could not reach.
pub(crate) fn chain_from_anchor(
    store: &EntityStore,
    mut edges: Vec<EdgeId>,
    anchor: &Point3d,
    tol: &Tolerance,
) -> (Vec<EdgeId>, Vec<EdgeId>) {
    let starts_at =
        |edges: &[EdgeId], p: &Point3d| edges.iter().position(|&e| tol.points_coincident(&store.edge_start_point(e), p));

    let mut chain = Vec::with_capacity(edges.len());
    let mut cursor = *anchor;
    while let Some(i) = starts_at(&edges, &cursor) {
        let edge = edges.remove(i);
        cursor = store.edge_end_point(edge);
        chain.push(edge);
    }
    (chain, edges)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::*;
    use crate::namer::reconstruct_brep_names;
    use sweep_kernel::{Point2d, Vec3};

    #[test]
    fn test_anchor_matches_profile_point_five() {
        let mut store = EntityStore::new();
        let (solid, map) = short_path_slot(&mut store);
        reconstruct_brep_names(&mut store, &solid, &map, NamingConfig::default());

        let mut diags = Diagnostics::new();
        let anchor = wrap_anchor_point(&store, &solid, &NamingConfig::default(), &mut diags).unwrap();
        let expected = solid.local_coordinate.to_3d(&Point2d::new(6.0, 8.0));
        assert!(anchor.equals(&expected));
        assert!(diags.is_empty());
    }

    #[test]
    fn test_anchor_falls_back_to_nearest_vertex() {
        let mut store = EntityStore::new();
        let (mut solid, map) = short_path_slot(&mut store);
        reconstruct_brep_names(&mut store, &solid, &map, NamingConfig::default());

        let exact = solid.local_coordinate.to_3d(&Point2d::new(6.0, 8.0));
        solid.local_coordinate.origin = solid.local_coordinate.origin + Vec3::new(0.5, 0.01, -0.02);
        let mut diags = Diagnostics::new();
        let anchor = wrap_anchor_point(&store, &solid, &NamingConfig::default(), &mut diags).unwrap();
        assert!(anchor.equals(&exact));
        assert!(diags.is_empty());
    }

    #[test]
    fn test_missing_point_five_is_diagnosed_but_edges_stay_flagged() {
        let mut store = EntityStore::new();
        let (mut solid, map) = short_path_slot(&mut store);
        for c in &mut solid.profile.curves {
            if c.start_point_id == Some(5) {
                c.start_point_id = None;
            }
        }
        let report = reconstruct_brep_names(&mut store, &solid, &map, NamingConfig::default());

        assert_eq!(report.diagnostics.count(DiagnosticCode::MissingWrapAnchor), 1);
        assert_eq!(report.wrap_edges_named, 0);
        let flagged = store
            .edges
            .values()
            .filter(|e| e.user_data.light_slot_path && e.user_data.topoed)
            .count();
        assert_eq!(flagged, 4);
    }

    #[test]
    fn test_chain_stops_at_gap() {
        let mut store = EntityStore::new();
        let (solid, map) = short_path_slot(&mut store);
        reconstruct_brep_names(&mut store, &solid, &map, NamingConfig::default());

        let brep = solid.breps[0];
        let edges: Vec<EdgeId> = (1..=4)
            .map(|n| store.edge_by_tag(brep, &format!("4>5-{n}")).unwrap())
            .collect();
        // Drop the second edge; the fourth can no longer be reached.
        let pending = vec![edges[3], edges[0], edges[2]];
        let anchor = store.edge_start_point(edges[0]);
        let (chain, rest) = chain_from_anchor(&store, pending, &anchor, &Tolerance::default());
        assert_eq!(chain, vec![edges[0]]);
        assert_eq!(rest, vec![edges[3], edges[2]]);
    }
}
