use super::{
    AdjacencyDirection as Dir, AdjacencyList, OsmEdgeData, OsmEdgesByOd, OsmNodeData, OsmNodeId,
    OsmNodes, OsmWays,
};
use crate::model::osm::OsmError;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// a directed multigraph of OSM nodes and the edges between them.
///
/// edges between the same ordered node pair are stored together, the
/// position of an edge in its list is its key. all collections iterate in
/// id order so that every output built from the graph is deterministic.
#[derive(Default, Debug, Clone, Serialize, Deserialize)]
pub struct OsmGraph {
    /// the collection of OSM nodes associated via their OSMID
    nodes: OsmNodes,
    /// edges are stored wrt their src/dst node pairs
    edges: OsmEdgesByOd,
    /// forward and reverse adjacency list
    adj: AdjacencyList,
}

impl OsmGraph {
    pub fn empty() -> OsmGraph {
        OsmGraph {
            nodes: BTreeMap::new(),
            edges: BTreeMap::new(),
            adj: HashMap::new(),
        }
    }

    /// creates a new graph to model the relationship between the provided
    /// nodes and ways.
    ///
    /// each consecutive pair of nodes along a way becomes an edge in the
    /// direction of travel. ways that are not oneway also receive the
    /// opposite edges, flagged as reversed.
    pub fn from_ways(nodes: &OsmNodes, ways: &OsmWays) -> Result<OsmGraph, OsmError> {
        let mut graph = OsmGraph::empty();
        for way in ways.values() {
            let path = way.directed_nodes();
            for (src_id, dst_id) in path.iter().tuple_windows() {
                // confirm node exists in source dataset or fail
                for node_id in [src_id, dst_id] {
                    if !graph.contains_node(node_id) {
                        let node = nodes
                            .get(node_id)
                            .ok_or(OsmError::GraphMissingNodeId(*node_id))?;
                        graph.insert_node(node.clone());
                    }
                }
                graph.add_edge(src_id, dst_id, OsmEdgeData::from_way(way, false))?;
                if !way.oneway {
                    graph.add_edge(dst_id, src_id, OsmEdgeData::from_way(way, true))?;
                }
            }
        }
        Ok(graph)
    }

    pub fn n_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// since this is a multigraph, there may be more than 1 edge between some pair (u, v)
    pub fn n_edges(&self) -> usize {
        self.edges.values().map(|multiedges| multiedges.len()).sum()
    }

    pub fn contains_node(&self, node_id: &OsmNodeId) -> bool {
        self.nodes.contains_key(node_id)
    }

    /// helper with error handling for getting the node data for a given node id
    pub fn get_node_data(&self, node_id: &OsmNodeId) -> Result<&OsmNodeData, OsmError> {
        self.nodes
            .get(node_id)
            .ok_or(OsmError::GraphMissingNodeId(*node_id))
    }

    pub fn get_node_data_mut(&mut self, node_id: &OsmNodeId) -> Result<&mut OsmNodeData, OsmError> {
        self.nodes
            .get_mut(node_id)
            .ok_or(OsmError::GraphMissingNodeId(*node_id))
    }

    /// all node ids in ascending order
    pub fn node_ids(&self) -> Vec<OsmNodeId> {
        self.nodes.keys().cloned().collect_vec()
    }

    pub fn nodes_iter(&self) -> impl Iterator<Item = &OsmNodeData> {
        self.nodes.values()
    }

    pub fn nodes_iter_mut(&mut self) -> impl Iterator<Item = &mut OsmNodeData> {
        self.nodes.values_mut()
    }

    /// adjacent nodes along the given direction. fails if the node is not in the graph.
    pub fn get_neighbors(
        &self,
        node_id: &OsmNodeId,
        direction: Dir,
    ) -> Result<Vec<OsmNodeId>, OsmError> {
        if !self.contains_node(node_id) {
            return Err(OsmError::AdjacencyMissingSourceNodeId(direction, *node_id));
        }
        let neighbors = match self.adj.get(&(*node_id, direction)) {
            Some(adjacencies) => adjacencies.iter().cloned().collect_vec(),
            None => vec![],
        };
        Ok(neighbors)
    }

    /// successors of a node
    pub fn get_out_neighbors(&self, node_id: &OsmNodeId) -> Result<Vec<OsmNodeId>, OsmError> {
        self.get_neighbors(node_id, Dir::Forward)
    }

    /// predecessors of a node
    pub fn get_in_neighbors(&self, node_id: &OsmNodeId) -> Result<Vec<OsmNodeId>, OsmError> {
        self.get_neighbors(node_id, Dir::Reverse)
    }

    /// the union of successors and predecessors of a node
    pub fn get_undirected_neighbors(
        &self,
        node_id: &OsmNodeId,
    ) -> Result<BTreeSet<OsmNodeId>, OsmError> {
        let mut neighbors: BTreeSet<OsmNodeId> =
            self.get_out_neighbors(node_id)?.into_iter().collect();
        neighbors.extend(self.get_in_neighbors(node_id)?);
        Ok(neighbors)
    }

    /// number of edges leaving (Forward) or entering (Reverse) a node,
    /// counting each multiedge.
    pub fn degree_for_direction(&self, node_id: &OsmNodeId, dir: Dir) -> Result<usize, OsmError> {
        let degree = self
            .get_neighbors(node_id, dir)?
            .iter()
            .map(|other| {
                let od = match dir {
                    Dir::Forward => (*node_id, *other),
                    Dir::Reverse => (*other, *node_id),
                };
                self.edges.get(&od).map(|e| e.len()).unwrap_or_default()
            })
            .sum();
        Ok(degree)
    }

    pub fn out_degree(&self, node_id: &OsmNodeId) -> Result<usize, OsmError> {
        self.degree_for_direction(node_id, Dir::Forward)
    }

    pub fn in_degree(&self, node_id: &OsmNodeId) -> Result<usize, OsmError> {
        self.degree_for_direction(node_id, Dir::Reverse)
    }

    /// in-degree plus out-degree. a self-loop is counted twice.
    pub fn degree(&self, node_id: &OsmNodeId) -> Result<usize, OsmError> {
        Ok(self.out_degree(node_id)? + self.in_degree(node_id)?)
    }

    /// the multiedges from src to dst, if any
    pub fn get_edges(&self, src: &OsmNodeId, dst: &OsmNodeId) -> Option<&Vec<OsmEdgeData>> {
        self.edges.get(&(*src, *dst))
    }

    /// iterates over every edge as (u, v, key, edge) in (u, v, key) order.
    pub fn edge_iter(&self) -> impl Iterator<Item = (OsmNodeId, OsmNodeId, usize, &OsmEdgeData)> {
        self.edges.iter().flat_map(|((u, v), multiedges)| {
            multiedges
                .iter()
                .enumerate()
                .map(move |(key, edge)| (*u, *v, key, edge))
        })
    }

    pub fn edge_iter_mut(
        &mut self,
    ) -> impl Iterator<Item = (OsmNodeId, OsmNodeId, usize, &mut OsmEdgeData)> {
        self.edges.iter_mut().flat_map(|((u, v), multiedges)| {
            let (u, v) = (*u, *v);
            multiedges
                .iter_mut()
                .enumerate()
                .map(move |(key, edge)| (u, v, key, edge))
        })
    }

    /// inserts or replaces a node. adjacencies are untouched.
    pub fn insert_node(&mut self, node: OsmNodeData) {
        self.nodes.insert(node.osmid, node);
    }

    /// adds a new multiedge between two nodes already in the graph,
    /// returning the key of the new edge.
    pub fn add_edge(
        &mut self,
        src: &OsmNodeId,
        dst: &OsmNodeId,
        edge: OsmEdgeData,
    ) -> Result<usize, OsmError> {
        for node_id in [src, dst] {
            if !self.contains_node(node_id) {
                return Err(OsmError::GraphMissingNodeId(*node_id));
            }
        }
        let multiedges = self.edges.entry((*src, *dst)).or_default();
        multiedges.push(edge);
        let key = multiedges.len() - 1;
        let dir = Dir::Forward;
        self.adj.entry((*src, dir)).or_default().insert(*dst);
        self.adj.entry((*dst, dir.opposite())).or_default().insert(*src);
        Ok(key)
    }

    /// removes all multiedges from src to dst, returning them.
    pub fn remove_edges(&mut self, src: &OsmNodeId, dst: &OsmNodeId) -> Vec<OsmEdgeData> {
        let removed = self.edges.remove(&(*src, *dst)).unwrap_or_default();
        self.remove_adjacency(src, Dir::Forward, dst);
        self.remove_adjacency(dst, Dir::Reverse, src);
        removed
    }

    /// removes a node along with every edge incident to it.
    pub fn remove_node(&mut self, node_id: &OsmNodeId) -> Result<OsmNodeData, OsmError> {
        for dst in self.get_out_neighbors(node_id)? {
            let _ = self.remove_edges(node_id, &dst);
        }
        for src in self.get_in_neighbors(node_id)? {
            let _ = self.remove_edges(&src, node_id);
        }
        self.adj.remove(&(*node_id, Dir::Forward));
        self.adj.remove(&(*node_id, Dir::Reverse));
        self.nodes
            .remove(node_id)
            .ok_or(OsmError::GraphMissingNodeId(*node_id))
    }

    fn remove_adjacency(&mut self, node_id: &OsmNodeId, dir: Dir, other: &OsmNodeId) {
        if let Some(adjacencies) = self.adj.get_mut(&(*node_id, dir)) {
            adjacencies.remove(other);
            if adjacencies.is_empty() {
                self.adj.remove(&(*node_id, dir));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::OsmGraph;
    use crate::{
        config::TagAllowlist,
        model::osm::graph::{
            OsmNodeData, OsmNodeId, OsmNodes, OsmTags, OsmWayData, OsmWayId, OsmWays,
        },
    };

    fn tags(pairs: &[(&str, &str)]) -> OsmTags {
        pairs
            .iter()
            .map(|(k, v)| (String::from(*k), String::from(*v)))
            .collect()
    }

    fn nodes(ids: &[i64]) -> OsmNodes {
        ids.iter()
            .map(|id| {
                let node = OsmNodeData::new(
                    OsmNodeId(*id),
                    *id as f64 * 0.001,
                    0.0,
                    &OsmTags::new(),
                    &TagAllowlist::node_defaults(),
                );
                (OsmNodeId(*id), node)
            })
            .collect()
    }

    fn way(id: i64, path: &[i64], pairs: &[(&str, &str)]) -> (OsmWayId, OsmWayData) {
        let data = OsmWayData::new(
            OsmWayId(id),
            path,
            &tags(pairs),
            &TagAllowlist::way_defaults(),
            false,
        );
        (OsmWayId(id), data)
    }

    #[test]
    fn two_way_street_gets_both_directions() {
        let ways: OsmWays = [way(1, &[1, 2, 3], &[("highway", "residential")])]
            .into_iter()
            .collect();
        let graph = OsmGraph::from_ways(&nodes(&[1, 2, 3]), &ways).unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(graph.n_nodes(), 3);
        assert_eq!(graph.n_edges(), 4);
        let back = graph
            .get_edges(&OsmNodeId(2), &OsmNodeId(1))
            .unwrap_or_else(|| panic!("missing reverse edge"));
        assert_eq!(back[0].reversed, vec![true]);
        assert_eq!(graph.degree(&OsmNodeId(2)).unwrap_or_else(|e| panic!("{e}")), 4);
    }

    #[test]
    fn reversed_oneway_only_runs_backwards() {
        let ways: OsmWays = [way(1, &[1, 2], &[("highway", "residential"), ("oneway", "-1")])]
            .into_iter()
            .collect();
        let graph = OsmGraph::from_ways(&nodes(&[1, 2]), &ways).unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(graph.n_edges(), 1);
        let edges = graph
            .get_edges(&OsmNodeId(2), &OsmNodeId(1))
            .unwrap_or_else(|| panic!("missing edge"));
        assert!(edges[0].oneway);
        assert_eq!(edges[0].reversed, vec![false]);
    }

    #[test]
    fn parallel_ways_become_multiedges() {
        let ways: OsmWays = [
            way(1, &[1, 2], &[("highway", "residential"), ("oneway", "yes")]),
            way(2, &[1, 2], &[("highway", "cycleway"), ("oneway", "yes")]),
        ]
        .into_iter()
        .collect();
        let graph = OsmGraph::from_ways(&nodes(&[1, 2]), &ways).unwrap_or_else(|e| panic!("{e}"));
        let keys = graph.edge_iter().map(|(_, _, k, _)| k).collect::<Vec<_>>();
        assert_eq!(keys, vec![0, 1]);
        assert_eq!(graph.out_degree(&OsmNodeId(1)).unwrap_or_else(|e| panic!("{e}")), 2);
    }

    #[test]
    fn missing_node_fails() {
        let ways: OsmWays = [way(1, &[1, 2], &[("highway", "residential")])]
            .into_iter()
            .collect();
        assert!(OsmGraph::from_ways(&nodes(&[1]), &ways).is_err());
    }

    #[test]
    fn remove_node_drops_incident_edges() {
        let ways: OsmWays = [way(1, &[1, 2, 3], &[("highway", "residential")])]
            .into_iter()
            .collect();
        let mut graph =
            OsmGraph::from_ways(&nodes(&[1, 2, 3]), &ways).unwrap_or_else(|e| panic!("{e}"));
        let removed = graph
            .remove_node(&OsmNodeId(2))
            .unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(removed.osmid, OsmNodeId(2));
        assert_eq!(graph.n_edges(), 0);
        assert!(graph
            .get_out_neighbors(&OsmNodeId(1))
            .unwrap_or_else(|e| panic!("{e}"))
            .is_empty());
        assert!(graph.get_out_neighbors(&OsmNodeId(2)).is_err());
    }
}
