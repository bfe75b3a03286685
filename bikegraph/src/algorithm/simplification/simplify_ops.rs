use super::SimplifiedPath;
use crate::model::osm::{
    graph::{OsmGraph, OsmNodeId},
    OsmError,
};
use kdam::tqdm;
use std::collections::HashSet;

/// tests whether a node is the endpoint of a path that can be simplified.
///
/// a node is an endpoint when:
///   - it has a self-loop
///   - it has no incoming or no outgoing edges
///   - it does not have exactly two neighbors with a degree of 2 or 4
///     (the end of a oneway or two-way road passing through the node)
pub fn is_endpoint(graph: &OsmGraph, node_id: &OsmNodeId) -> Result<bool, OsmError> {
    let neighbors = graph.get_undirected_neighbors(node_id)?;
    if neighbors.contains(node_id) {
        return Ok(true);
    }
    if graph.out_degree(node_id)? == 0 || graph.in_degree(node_id)? == 0 {
        return Ok(true);
    }
    let degree = graph.degree(node_id)?;
    Ok(!(neighbors.len() == 2 && (degree == 2 || degree == 4)))
}

/// walks forward from an endpoint through its successor until the next
/// endpoint, returning the nodes along the way.
pub fn build_path(
    graph: &OsmGraph,
    endpoint: &OsmNodeId,
    endpoint_successor: &OsmNodeId,
    endpoints: &HashSet<OsmNodeId>,
) -> Result<Vec<OsmNodeId>, OsmError> {
    let mut path = vec![*endpoint, *endpoint_successor];
    for this_successor in graph.get_out_neighbors(endpoint_successor)? {
        if path.contains(&this_successor) {
            continue;
        }
        let mut successor = this_successor;
        path.push(successor);
        while !endpoints.contains(&successor) {
            let successors = graph
                .get_out_neighbors(&successor)?
                .into_iter()
                .filter(|n| !path.contains(n))
                .collect::<Vec<_>>();
            match successors[..] {
                [next] => {
                    successor = next;
                    path.push(successor);
                }
                [] => {
                    // a dead end, or a ring that closes back on the endpoint
                    if graph.get_out_neighbors(&successor)?.contains(endpoint) {
                        path.push(*endpoint);
                    } else {
                        log::debug!("unexpected simplify pattern handled near {successor}");
                    }
                    return Ok(path);
                }
                _ => {
                    return Err(OsmError::GraphSimplificationError(format!(
                        "impossible simplify pattern at node {successor}"
                    )))
                }
            }
        }
        return Ok(path);
    }
    Ok(path)
}

/// all paths running from one endpoint to the next through non-endpoint nodes.
fn get_paths_to_simplify(graph: &OsmGraph) -> Result<Vec<SimplifiedPath>, OsmError> {
    let node_ids = graph.node_ids();
    let mut endpoints = HashSet::new();
    for node_id in node_ids.iter() {
        if is_endpoint(graph, node_id)? {
            endpoints.insert(*node_id);
        }
    }
    log::info!(
        "identified {} edge endpoints among {} nodes",
        endpoints.len(),
        node_ids.len()
    );

    let mut paths = vec![];
    for endpoint in node_ids.iter().filter(|n| endpoints.contains(n)) {
        for successor in graph.get_out_neighbors(endpoint)? {
            if !endpoints.contains(&successor) {
                let path = build_path(graph, endpoint, &successor, &endpoints)?;
                paths.push(SimplifiedPath::new(path)?);
            }
        }
    }
    Ok(paths)
}

/// removes interstitial nodes, replacing each chain of edges between two
/// endpoints with a single edge carrying the merged attributes and the
/// geometry of the removed nodes.
pub fn simplify_graph(graph: &mut OsmGraph) -> Result<(), OsmError> {
    let n_nodes = graph.n_nodes();
    let n_edges = graph.n_edges();
    let paths = get_paths_to_simplify(graph)?;

    let merged = tqdm!(
        paths.iter(),
        desc = "merge simplified paths",
        total = paths.len()
    )
    .map(|p| p.merged_edge(graph).map(|e| (p, e)))
    .collect::<Result<Vec<_>, _>>()?;
    eprintln!();

    for (path, edge) in merged.into_iter() {
        graph.add_edge(&path.src_node_id, &path.dst_node_id, edge)?;
    }
    for path in paths.iter() {
        path.remove_interstitial_nodes(graph)?;
    }

    log::info!(
        "simplified graph: {} to {} nodes, {} to {} edges",
        n_nodes,
        graph.n_nodes(),
        n_edges,
        graph.n_edges()
    );
    Ok(())
}
