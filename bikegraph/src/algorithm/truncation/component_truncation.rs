use super::component_filter::ComponentFilter;
use crate::{
    algorithm::search,
    model::osm::{
        graph::{OsmGraph, OsmNodeId},
        OsmError,
    },
};
use kdam::tqdm;
use std::collections::HashSet;

/// mutates the graph in place so that it only holds the weakly connected
/// components selected by the filter. returns the number of removed nodes.
pub fn filter_components(graph: &mut OsmGraph, filter: &ComponentFilter) -> Result<usize, OsmError> {
    if *filter == ComponentFilter::KeepAll {
        return Ok(0);
    }
    let components = search::weakly_connected_components(graph)?;
    let n_components = components.len();
    let filtered_components = filter.assign_components(components);
    log::info!(
        "retaining {} of {} graph components after filtering",
        filtered_components.len(),
        n_components
    );

    let keep_list = filtered_components
        .into_iter()
        .flatten()
        .collect::<HashSet<OsmNodeId>>();
    let remove_list = graph
        .node_ids()
        .into_iter()
        .filter(|n| !keep_list.contains(n))
        .collect::<Vec<_>>();
    let n_removed = remove_list.len();
    let iter = tqdm!(
        remove_list.iter(),
        desc = format!("apply {filter} component filter"),
        total = n_removed
    );
    for node_id in iter {
        graph.remove_node(node_id)?;
    }
    eprintln!();
    log::info!(
        "after filtering components, graph has {} nodes and {} edges",
        graph.n_nodes(),
        graph.n_edges()
    );

    Ok(n_removed)
}
