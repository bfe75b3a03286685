use crate::model::osm::{
    graph::{OsmGraph, OsmNodeId},
    OsmError,
};
use geo::MultiPolygon;
use itertools::Itertools;
use rayon::prelude::*;
use std::collections::HashSet;

/// removes nodes that are outside of the provided extent, along with their edges.
/// when `truncate_by_edge` is set, an outside node is retained as long as
/// one of its neighbors lies within the extent.
///
/// returns the number of removed nodes.
pub fn truncate_graph_polygon(
    graph: &mut OsmGraph,
    extent: &MultiPolygon<f64>,
    truncate_by_edge: bool,
) -> Result<usize, OsmError> {
    log::info!("identifying all nodes that lie outside the polygon");

    let inside: HashSet<OsmNodeId> = graph
        .nodes_iter()
        .collect_vec()
        .into_par_iter()
        .filter(|node| node.within(extent))
        .map(|node| node.osmid)
        .collect();

    let mut remove_nodes = vec![];
    for node_id in graph.node_ids().into_iter() {
        if inside.contains(&node_id) {
            continue;
        }
        let keep = truncate_by_edge
            && graph
                .get_undirected_neighbors(&node_id)?
                .iter()
                .any(|n| inside.contains(n));
        if !keep {
            remove_nodes.push(node_id);
        }
    }

    let n_removed = remove_nodes.len();
    for node_id in remove_nodes.iter() {
        graph.remove_node(node_id)?;
    }

    if truncate_by_edge {
        log::info!("removed {n_removed} nodes not connected by edges to nodes within the extent");
    } else {
        log::info!("removed {n_removed} nodes found outside the extent");
    }
    Ok(n_removed)
}
