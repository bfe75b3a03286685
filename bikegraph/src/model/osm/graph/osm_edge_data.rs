use super::{OsmWayData, OsmWayId};
use crate::model::osm::OsmError;
use geo::LineString;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt::Display};

/// an attribute value on an edge. edges built from a single way carry
/// single values; merging a path of edges during simplification collects
/// the distinct values into a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TagValue {
    Single(String),
    List(Vec<String>),
}

impl TagValue {
    pub fn values(&self) -> Vec<&str> {
        match self {
            TagValue::Single(s) => vec![s.as_str()],
            TagValue::List(l) => l.iter().map(String::as_str).collect_vec(),
        }
    }

    /// collects the distinct values across a set of tag values, sorted.
    /// returns None when the set is empty.
    pub fn merge<'a>(values: impl Iterator<Item = &'a TagValue>) -> Option<TagValue> {
        let unique = values
            .flat_map(|v| v.values())
            .unique()
            .sorted()
            .map(String::from)
            .collect_vec();
        match unique.len() {
            0 => None,
            1 => unique.into_iter().next().map(TagValue::Single),
            _ => Some(TagValue::List(unique)),
        }
    }
}

impl Display for TagValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TagValue::Single(s) => write!(f, "{s}"),
            TagValue::List(l) => write!(f, "[{}]", l.iter().join(", ")),
        }
    }
}

/// slope of an edge computed from its endpoint elevations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeGrade {
    /// rise over run, None when an endpoint lacks elevation or the edge has zero length
    pub grade: Option<f64>,
    pub grade_abs: Option<f64>,
}

/// a directed edge of the graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OsmEdgeData {
    /// way(s) this edge was built from, sorted and distinct
    pub osmid: Vec<OsmWayId>,
    pub oneway: bool,
    /// whether the edge runs against the node order of its way(s)
    pub reversed: Vec<bool>,
    /// great-circle length in meters
    pub length: f64,
    pub tags: BTreeMap<String, TagValue>,
    /// path geometry, only present once interstitial nodes have been
    /// simplified away. otherwise the edge is a straight segment.
    pub geometry: Option<LineString<f64>>,
    /// present once grades have been computed for the graph
    pub grade: Option<EdgeGrade>,
}

impl OsmEdgeData {
    /// builds a single segment edge carrying the attributes of its way.
    pub fn from_way(way: &OsmWayData, reversed: bool) -> OsmEdgeData {
        let tags = way
            .tags
            .iter()
            .map(|(k, v)| (k.clone(), TagValue::Single(v.clone())))
            .collect();
        OsmEdgeData {
            osmid: vec![way.osmid],
            oneway: way.oneway,
            reversed: vec![reversed],
            length: 0.0,
            tags,
            geometry: None,
            grade: None,
        }
    }

    pub fn get_tag(&self, key: &str) -> Option<&TagValue> {
        self.tags.get(key)
    }

    /// combines the edges along a simplified path into a single edge:
    ///   - way ids, reversed flags and tag values are collected as distinct values
    ///   - lengths are summed
    ///   - the merged edge is oneway only if every constituent edge is
    ///   - grades are dropped, as they depend on the new endpoints
    pub fn merge_path(
        edges: &[&OsmEdgeData],
        geometry: LineString<f64>,
    ) -> Result<OsmEdgeData, OsmError> {
        if edges.is_empty() {
            return Err(OsmError::GraphSimplificationError(String::from(
                "attempting to merge an empty collection of edges",
            )));
        }
        let osmid = edges
            .iter()
            .flat_map(|e| e.osmid.iter().cloned())
            .unique()
            .sorted()
            .collect_vec();
        let reversed = edges
            .iter()
            .flat_map(|e| e.reversed.iter().cloned())
            .unique()
            .sorted()
            .collect_vec();
        let length = edges.iter().map(|e| e.length).sum::<f64>();
        let oneway = edges.iter().all(|e| e.oneway);
        let keys = edges
            .iter()
            .flat_map(|e| e.tags.keys())
            .unique()
            .cloned()
            .collect_vec();
        let mut tags = BTreeMap::new();
        for key in keys.into_iter() {
            let values = edges.iter().filter_map(|e| e.tags.get(&key));
            if let Some(merged) = TagValue::merge(values) {
                tags.insert(key, merged);
            }
        }
        Ok(OsmEdgeData {
            osmid,
            oneway,
            reversed,
            length,
            tags,
            geometry: Some(geometry),
            grade: None,
        })
    }
}
