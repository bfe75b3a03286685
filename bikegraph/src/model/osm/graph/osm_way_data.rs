use super::{OsmNodeId, OsmTags, OsmWayId};
use crate::config::TagAllowlist;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// a way element with its node path, allowlisted tags and directionality.
#[derive(Default, Debug, Clone, Serialize, Deserialize)]
pub struct OsmWayData {
    pub osmid: OsmWayId,
    pub nodes: Vec<OsmNodeId>,
    /// allowlisted tags, excluding `oneway` which is replaced by the
    /// interpreted boolean below
    pub tags: BTreeMap<String, String>,
    /// travel is only allowed along one direction of this way
    pub oneway: bool,
    /// the allowed direction runs against the order of `nodes`
    pub reversed: bool,
}

impl OsmWayData {
    /// the values OSM uses in its 'oneway' tag to denote True. see:
    ///   <https://wiki.openstreetmap.org/wiki/Key:oneway>
    ///   <https://www.geofabrik.de/de/data/geofabrik-osm-gis-standard-0.7.pdf>
    const ONEWAY_VALUES: [&'static str; 7] = ["yes", "true", "1", "-1", "reverse", "T", "F"];
    /// the 'oneway' values that denote travel against the order of the nodes
    const REVERSED_VALUES: [&'static str; 3] = ["-1", "reverse", "T"];

    /// builds a way from its raw element data.
    ///
    /// # Arguments
    ///
    /// * `osmid` - way id
    /// * `nodes` - node references in element order
    /// * `tags` - raw tags of the element
    /// * `allowlist` - tag keys to retain as attributes
    /// * `bidirectional` - if true, oneway tags are ignored (pedestrian networks)
    pub fn new(
        osmid: OsmWayId,
        nodes: &[i64],
        tags: &OsmTags,
        allowlist: &TagAllowlist,
        bidirectional: bool,
    ) -> OsmWayData {
        // remove consecutive duplicates from the node path
        let mut nodes = nodes.iter().map(|n| OsmNodeId(*n)).collect_vec();
        nodes.dedup();

        let oneway = !bidirectional && is_one_way(tags);
        let reversed = oneway && is_reversed(tags);
        let mut retained = allowlist.retain(tags);
        retained.remove("oneway");

        OsmWayData {
            osmid,
            nodes,
            tags: retained,
            oneway,
            reversed,
        }
    }

    /// the node path in the direction of travel.
    pub fn directed_nodes(&self) -> Vec<OsmNodeId> {
        if self.reversed {
            self.nodes.iter().rev().cloned().collect_vec()
        } else {
            self.nodes.clone()
        }
    }
}

/// mirrors osmnx.graph._is_path_one_way.
/// roundabouts are also one-way but are not always explicitly tagged as such.
fn is_one_way(tags: &OsmTags) -> bool {
    if let Some(oneway) = tags.get("oneway") {
        OsmWayData::ONEWAY_VALUES.contains(&oneway.trim())
    } else if let Some(junction) = tags.get("junction") {
        junction.trim() == "roundabout"
    } else {
        false
    }
}

/// mirrors osmnx.graph._is_path_reversed
fn is_reversed(tags: &OsmTags) -> bool {
    match tags.get("oneway") {
        Some(oneway) => OsmWayData::REVERSED_VALUES.contains(&oneway.trim()),
        None => false,
    }
}
