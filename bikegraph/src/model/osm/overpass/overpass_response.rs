use crate::model::osm::{graph::OsmTags, OsmError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// the body of an `[out:json]` overpass response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OverpassResponse {
    #[serde(default)]
    pub elements: Vec<OverpassElement>,
    /// overpass reports runtime errors (timeouts, memory exhaustion) here
    /// while still answering with HTTP 200.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OverpassElement {
    Node {
        id: i64,
        lat: f64,
        lon: f64,
        #[serde(default)]
        tags: OsmTags,
    },
    Way {
        id: i64,
        #[serde(default)]
        nodes: Vec<i64>,
        #[serde(default)]
        tags: OsmTags,
    },
    #[serde(other)]
    Other,
}

impl OverpassResponse {
    /// reads a previously-saved overpass JSON response from disk.
    pub fn from_file(filepath: &Path) -> Result<OverpassResponse, OsmError> {
        let f = filepath.display().to_string();
        let contents =
            std::fs::read_to_string(filepath).map_err(|e| OsmError::OverpassFileError(f, e))?;
        OverpassResponse::from_json_str(&contents)
    }

    pub fn from_json_str(s: &str) -> Result<OverpassResponse, OsmError> {
        serde_json::from_str(s).map_err(|e| OsmError::OverpassDecodeError(e.to_string()))
    }
}
