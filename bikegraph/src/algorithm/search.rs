use crate::model::osm::{
    graph::{OsmGraph, OsmNodeId},
    OsmError,
};
use std::collections::{BTreeSet, HashSet, VecDeque};

/// finds the set of nodes reachable from `src` when edge direction is
/// ignored, using a breadth-first search.
///
/// # Arguments
///
/// * `src` - origin of tree
/// * `graph` - graph to search
/// * `valid_set` - set of valid nodes to visit, or None if all are acceptable.
///
/// # Returns
///
/// The set of node ids weakly connected to `src` within the valid_set.
pub fn bfs_undirected(
    src: OsmNodeId,
    graph: &OsmGraph,
    valid_set: Option<&HashSet<OsmNodeId>>,
) -> Result<HashSet<OsmNodeId>, OsmError> {
    let mut visited: HashSet<OsmNodeId> = HashSet::from([src]);
    let mut frontier: VecDeque<OsmNodeId> = VecDeque::from([src]);

    while let Some(next_id) = frontier.pop_front() {
        // neighbors are sorted (BTreeSet) for deterministic frontier insertion order
        let neighbors = graph.get_undirected_neighbors(&next_id)?;
        let valid_neighbors = neighbors.into_iter().filter(|n| match &valid_set {
            Some(valid) => valid.contains(n),
            None => true,
        });
        for neighbor in valid_neighbors {
            if visited.insert(neighbor) {
                frontier.push_back(neighbor);
            }
        }
    }

    Ok(visited)
}

/// partitions the graph nodes into weakly connected components. components
/// are listed in order of their smallest node id, and each component's
/// nodes are sorted.
pub fn weakly_connected_components(graph: &OsmGraph) -> Result<Vec<Vec<OsmNodeId>>, OsmError> {
    let mut assigned: HashSet<OsmNodeId> = HashSet::new();
    let mut components = vec![];
    for node_id in graph.node_ids() {
        if assigned.contains(&node_id) {
            continue;
        }
        let component = bfs_undirected(node_id, graph, None)?;
        assigned.extend(component.iter().cloned());
        let sorted: BTreeSet<OsmNodeId> = component.into_iter().collect();
        components.push(sorted.into_iter().collect());
    }
    Ok(components)
}

#[cfg(test)]
mod tests {
    use super::{bfs_undirected, weakly_connected_components};
    use crate::{
        config::TagAllowlist,
        model::osm::graph::{OsmEdgeData, OsmGraph, OsmNodeData, OsmNodeId, OsmTags, OsmWayData, OsmWayId},
    };
    use std::collections::HashSet;

    /// builds a graph of oneway edges between the given node pairs
    fn graph(edges: &[(i64, i64)]) -> OsmGraph {
        let mut g = OsmGraph::empty();
        for (u, v) in edges.iter() {
            for id in [u, v] {
                g.insert_node(OsmNodeData::new(
                    OsmNodeId(*id),
                    0.0,
                    0.0,
                    &OsmTags::new(),
                    &TagAllowlist::node_defaults(),
                ));
            }
            let way = OsmWayData::new(
                OsmWayId(1),
                &[*u, *v],
                &OsmTags::new(),
                &TagAllowlist::way_defaults(),
                false,
            );
            g.add_edge(&OsmNodeId(*u), &OsmNodeId(*v), OsmEdgeData::from_way(&way, false))
                .unwrap_or_else(|e| panic!("{e}"));
        }
        g
    }

    #[test]
    fn search_ignores_edge_direction() {
        let g = graph(&[(1, 2), (3, 2), (4, 5)]);
        let found = bfs_undirected(OsmNodeId(1), &g, None).unwrap_or_else(|e| panic!("{e}"));
        let expected: HashSet<OsmNodeId> = [1, 2, 3].into_iter().map(OsmNodeId).collect();
        assert_eq!(found, expected);
    }

    #[test]
    fn search_respects_valid_set() {
        let g = graph(&[(1, 2), (2, 3)]);
        let valid: HashSet<OsmNodeId> = [1, 2].into_iter().map(OsmNodeId).collect();
        let found =
            bfs_undirected(OsmNodeId(1), &g, Some(&valid)).unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(found, valid);
    }

    #[test]
    fn components_are_ordered() {
        let g = graph(&[(5, 4), (1, 2), (3, 2)]);
        let components = weakly_connected_components(&g).unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(
            components,
            vec![
                vec![OsmNodeId(1), OsmNodeId(2), OsmNodeId(3)],
                vec![OsmNodeId(4), OsmNodeId(5)]
            ]
        );
    }
}
