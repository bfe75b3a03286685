use super::{
    graph::{ElementFilter, OsmGraph, OsmNodeData, OsmNodeId, OsmNodes, OsmWayData, OsmWayId, OsmWays},
    overpass::{OverpassElement, OverpassResponse},
    OsmError,
};
use crate::{
    algorithm::{length, simplification, street_count, truncation},
    config::{PipelineConfiguration, TagAllowlist},
};
use geo::MultiPolygon;
use kdam::tqdm;
use std::collections::{BTreeMap, HashSet};

/// reads the way and node elements of an overpass response into lookups.
/// ways are filtered by the element filter, and only nodes referenced by a
/// retained way are kept.
pub fn read_elements(
    response: &OverpassResponse,
    filter: &ElementFilter,
    way_allowlist: &TagAllowlist,
    node_allowlist: &TagAllowlist,
    bidirectional: bool,
) -> Result<(OsmNodes, OsmWays), OsmError> {
    let mut ways: OsmWays = BTreeMap::new();
    let mut n_rejected = 0;
    let mut node_elements = vec![];
    let iter = tqdm!(
        response.elements.iter(),
        desc = "read overpass elements",
        total = response.elements.len()
    );
    for element in iter {
        match element {
            OverpassElement::Way { id, nodes, tags } => {
                if !filter.accept(tags) {
                    log::debug!("way {id} rejected by network filter");
                    n_rejected += 1;
                    continue;
                }
                let way = OsmWayData::new(OsmWayId(*id), nodes, tags, way_allowlist, bidirectional);
                if way.nodes.len() < 2 {
                    log::debug!("way {id} has fewer than 2 distinct nodes, skipping");
                    continue;
                }
                ways.insert(way.osmid, way);
            }
            OverpassElement::Node { .. } => node_elements.push(element),
            OverpassElement::Other => {}
        }
    }
    eprintln!();
    if n_rejected > 0 {
        log::info!("{n_rejected} ways rejected by the network filter");
    }
    if ways.is_empty() {
        return Err(OsmError::NoWaysFound);
    }

    let referenced: HashSet<OsmNodeId> = ways.values().flat_map(|w| w.nodes.iter().cloned()).collect();
    let mut nodes: OsmNodes = BTreeMap::new();
    for element in node_elements.into_iter() {
        if let OverpassElement::Node { id, lat, lon, tags } = element {
            let osmid = OsmNodeId(*id);
            if referenced.contains(&osmid) {
                let node = OsmNodeData::new(osmid, *lon, *lat, tags, node_allowlist);
                nodes.insert(osmid, node);
            }
        }
    }
    if nodes.is_empty() {
        return Err(OsmError::NoNodesFound);
    }
    log::info!("read {} ways and {} nodes", ways.len(), nodes.len());
    Ok((nodes, ways))
}

/// builds the graph from an overpass response, then trims and simplifies it:
///
///   1. build the multigraph and measure edge lengths
///   2. truncate to the buffered extent
///   3. filter connected components
///   4. simplify
///   5. truncate to the extent and filter components again
///   6. count streets per node on the graph before step 5
///
/// without an extent, the truncation steps are skipped.
pub fn build_graph(
    response: &OverpassResponse,
    extent: Option<&MultiPolygon<f64>>,
    buffered_extent: Option<&MultiPolygon<f64>>,
    conf: &PipelineConfiguration,
) -> Result<OsmGraph, OsmError> {
    let filter = conf.element_filter()?;

    eprintln!();
    log::info!("  (((2.1))) building graph from overpass elements");
    let (nodes, ways) = read_elements(
        response,
        &filter,
        &conf.way_tag_allowlist(),
        &conf.useful_tags_node,
        conf.network_type.is_bidirectional(),
    )?;
    let mut graph = OsmGraph::from_ways(&nodes, &ways)?;
    length::add_edge_lengths(&mut graph)?;
    log::info!(
        "created graph with {} nodes and {} edges",
        graph.n_nodes(),
        graph.n_edges()
    );

    // overpass returns entire ways, including their nodes outside the
    // download area, so these are trimmed first
    eprintln!();
    if let Some(buffered) = buffered_extent {
        log::info!("  (((2.2))) truncating graph to buffered extent");
        truncation::truncate_graph_polygon(&mut graph, buffered, conf.truncate_by_edge)?;
    } else {
        log::info!("  (((2.2))) truncating graph to buffered extent (skipped)");
    }

    eprintln!();
    log::info!("  (((2.3))) truncating graph via connected components filtering");
    truncation::filter_components(&mut graph, &conf.component_filter)?;

    eprintln!();
    if conf.simplify {
        log::info!("  (((2.4))) simplifying graph");
        simplification::simplify_graph(&mut graph)?;
    } else {
        log::info!("  (((2.4))) simplifying graph (skipped)");
    }

    // streets are counted before the final truncation so that nodes on the
    // boundary still count the streets that leave the extent
    let buffered_graph = graph.clone();

    eprintln!();
    if let Some(extent) = extent {
        log::info!("  (((2.5))) truncating graph to extent");
        truncation::truncate_graph_polygon(&mut graph, extent, conf.truncate_by_edge)?;
        truncation::filter_components(&mut graph, &conf.component_filter)?;
    } else {
        log::info!("  (((2.5))) truncating graph to extent (skipped)");
    }

    street_count::set_street_counts(&mut graph, &buffered_graph)?;

    if graph.n_nodes() == 0 {
        return Err(OsmError::EmptyGraph(String::from("truncation")));
    }
    log::info!(
        "finished graph with {} nodes and {} edges",
        graph.n_nodes(),
        graph.n_edges()
    );
    Ok(graph)
}
