use crate::config::TagAllowlist;
use geo::{Coord, Intersects, MultiPolygon, Point};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{OsmNodeId, OsmTags};

/// a graph node built from an OSM node element.
#[derive(Default, Debug, Clone, Serialize, Deserialize)]
pub struct OsmNodeData {
    pub osmid: OsmNodeId,
    /// longitude
    pub x: f64,
    /// latitude
    pub y: f64,
    /// number of physical street segments meeting at this node, set once the
    /// graph is finalized
    pub street_count: Option<usize>,
    /// elevation sampled from a raster. None is the no-data sentinel, used
    /// both before sampling and when the raster does not cover this node.
    pub elevation: Option<f64>,
    /// allowlisted node tags
    pub tags: BTreeMap<String, String>,
}

impl OsmNodeData {
    pub fn new(
        osmid: OsmNodeId,
        lon: f64,
        lat: f64,
        tags: &OsmTags,
        allowlist: &TagAllowlist,
    ) -> OsmNodeData {
        OsmNodeData {
            osmid,
            x: lon,
            y: lat,
            street_count: None,
            elevation: None,
            tags: allowlist.retain(tags),
        }
    }

    pub fn get_point(&self) -> Point<f64> {
        Point::new(self.x, self.y)
    }

    pub fn get_coord(&self) -> Coord<f64> {
        Coord::from((self.x, self.y))
    }

    /// true if this node lies inside or on the boundary of the extent
    pub fn within(&self, extent: &MultiPolygon<f64>) -> bool {
        extent.intersects(&self.get_point())
    }
}
