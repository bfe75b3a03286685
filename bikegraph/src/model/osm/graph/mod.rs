mod adjacency_direction;
pub mod osm_edge_data;
pub mod osm_element_filter;
pub mod osm_graph;
mod osm_ids;
pub mod osm_node_data;
pub mod osm_way_data;

pub use adjacency_direction::AdjacencyDirection;
pub use osm_edge_data::{EdgeGrade, OsmEdgeData, TagValue};
pub use osm_element_filter::ElementFilter;
pub use osm_graph::OsmGraph;
pub use osm_ids::{OsmNodeId, OsmWayId};
pub use osm_node_data::OsmNodeData;
pub use osm_way_data::OsmWayData;

use std::collections::{BTreeMap, BTreeSet, HashMap};

/// raw key/value tags of an OSM element as delivered by the source
pub type OsmTags = HashMap<String, String>;

pub type OsmNodes = BTreeMap<OsmNodeId, OsmNodeData>;
pub type OsmWays = BTreeMap<OsmWayId, OsmWayData>;

/// multiedges between an ordered (src, dst) pair. the position of an edge
/// in the list is its key.
pub type OsmEdgesByOd = BTreeMap<(OsmNodeId, OsmNodeId), Vec<OsmEdgeData>>;
pub type AdjacencyList = HashMap<(OsmNodeId, AdjacencyDirection), BTreeSet<OsmNodeId>>;
