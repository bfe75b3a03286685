use crate::model::osm::{
    graph::{OsmGraph, OsmNodeId},
    OsmError,
};
use std::collections::BTreeMap;

/// counts the physical street segments incident to each node when edge
/// direction is ignored. opposing edges sharing a key are one street,
/// parallel edges each count, and a self-loop counts twice.
pub fn count_streets_per_node(
    graph: &OsmGraph,
) -> Result<BTreeMap<OsmNodeId, usize>, OsmError> {
    let mut counts = BTreeMap::new();
    for node_id in graph.node_ids() {
        let mut count = 0;
        for neighbor in graph.get_undirected_neighbors(&node_id)? {
            let n_fwd = graph.get_edges(&node_id, &neighbor).map(|e| e.len()).unwrap_or_default();
            if neighbor == node_id {
                count += 2 * n_fwd;
            } else {
                let n_rev = graph.get_edges(&neighbor, &node_id).map(|e| e.len()).unwrap_or_default();
                count += n_fwd.max(n_rev);
            }
        }
        counts.insert(node_id, count);
    }
    Ok(counts)
}

/// writes street counts computed on `source` onto the nodes of `graph`.
/// `source` may be a larger graph than `graph`, so that nodes on a
/// truncated boundary still report the streets leaving the study area.
pub fn set_street_counts(graph: &mut OsmGraph, source: &OsmGraph) -> Result<(), OsmError> {
    let counts = count_streets_per_node(source)?;
    for node in graph.nodes_iter_mut() {
        node.street_count = Some(counts.get(&node.osmid).cloned().unwrap_or_default());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::count_streets_per_node;
    use crate::{
        config::TagAllowlist,
        model::osm::graph::{
            OsmGraph, OsmNodeData, OsmNodeId, OsmNodes, OsmTags, OsmWayData, OsmWayId, OsmWays,
        },
    };

    #[test]
    fn two_way_streets_count_once_and_loops_twice() {
        let nodes: OsmNodes = [1, 2, 3]
            .into_iter()
            .map(|id| {
                let node = OsmNodeData::new(
                    OsmNodeId(id),
                    0.0,
                    0.0,
                    &OsmTags::new(),
                    &TagAllowlist::node_defaults(),
                );
                (OsmNodeId(id), node)
            })
            .collect();
        let oneway: OsmTags = [(String::from("oneway"), String::from("yes"))]
            .into_iter()
            .collect();
        let allowlist = TagAllowlist::way_defaults();
        let ways: OsmWays = [
            (OsmWayId(1), OsmWayData::new(OsmWayId(1), &[1, 2], &OsmTags::new(), &allowlist, false)),
            (OsmWayId(2), OsmWayData::new(OsmWayId(2), &[2, 3], &oneway, &allowlist, false)),
            (OsmWayId(3), OsmWayData::new(OsmWayId(3), &[3, 2], &oneway, &allowlist, false)),
        ]
        .into_iter()
        .collect();
        let mut graph = OsmGraph::from_ways(&nodes, &ways).unwrap_or_else(|e| panic!("{e}"));
        let way = OsmWayData::new(OsmWayId(4), &[3, 3], &OsmTags::new(), &allowlist, false);
        graph
            .add_edge(
                &OsmNodeId(3),
                &OsmNodeId(3),
                crate::model::osm::graph::OsmEdgeData::from_way(&way, false),
            )
            .unwrap_or_else(|e| panic!("{e}"));
        let counts = count_streets_per_node(&graph).unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(counts.get(&OsmNodeId(1)), Some(&1));
        // the two-way street to 1 plus a oneway pair to 3 with matching keys
        assert_eq!(counts.get(&OsmNodeId(2)), Some(&2));
        assert_eq!(counts.get(&OsmNodeId(3)), Some(&3));
    }
}
