use crate::model::osm::{
    graph::{OsmEdgeData, OsmGraph, OsmNodeId},
    OsmError,
};
use geo::LineString;
use itertools::Itertools;

/// a chain of nodes between two endpoints whose interstitial nodes can be
/// collapsed into a single edge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimplifiedPath {
    pub src_node_id: OsmNodeId,
    pub dst_node_id: OsmNodeId,
    pub path: Vec<OsmNodeId>,
}

impl SimplifiedPath {
    pub fn new(path: Vec<OsmNodeId>) -> Result<SimplifiedPath, OsmError> {
        match (path.first(), path.last()) {
            (Some(src), Some(dst)) if path.len() > 1 => Ok(SimplifiedPath {
                src_node_id: *src,
                dst_node_id: *dst,
                path,
            }),
            _ => Err(OsmError::GraphSimplificationError(format!(
                "SimplifiedPath::new called with invalid path of {} nodes",
                path.len()
            ))),
        }
    }

    /// builds the merged edge for this path from the first edge between
    /// each consecutive node pair, with geometry running through every node.
    pub fn merged_edge(&self, graph: &OsmGraph) -> Result<OsmEdgeData, OsmError> {
        let mut edges = vec![];
        for (u, v) in self.path.iter().tuple_windows() {
            let multiedges = graph.get_edges(u, v).ok_or_else(|| {
                OsmError::GraphSimplificationError(format!(
                    "path contains node pair ({u}, {v}) with no edge"
                ))
            })?;
            if multiedges.len() != 1 {
                log::debug!(
                    "multiple edges between {u} and {v} while simplifying path, using the first"
                );
            }
            if let Some(edge) = multiedges.first() {
                edges.push(edge);
            }
        }
        let coords = self
            .path
            .iter()
            .map(|n| graph.get_node_data(n).map(|node| node.get_coord()))
            .collect::<Result<Vec<_>, _>>()?;
        OsmEdgeData::merge_path(&edges, LineString::new(coords))
    }

    /// remove all but the src and dst nodes for this path.
    /// a node already removed by another path is skipped.
    pub fn remove_interstitial_nodes(&self, graph: &mut OsmGraph) -> Result<(), OsmError> {
        for node_id in self.path.iter().dropping(1).dropping_back(1) {
            if graph.contains_node(node_id) {
                graph.remove_node(node_id)?;
            }
        }
        Ok(())
    }
}
