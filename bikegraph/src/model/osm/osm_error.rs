use thiserror::Error;

use super::graph::{AdjacencyDirection, OsmNodeId};

#[derive(Error, Debug)]
pub enum OsmError {
    #[error("invalid OSM import configuration: {0}")]
    ConfigurationError(String),
    #[error("failure building HTTP client: {source}")]
    HttpClientError { source: reqwest::Error },
    #[error("request to {url} failed: {source}")]
    HttpRequestError { url: String, source: reqwest::Error },
    #[error("request to {url} returned status {status}: {body}")]
    HttpStatusError {
        url: String,
        status: u16,
        body: String,
    },
    #[error("unable to geocode '{0}': no results returned")]
    GeocodeNoResults(String),
    #[error("unable to geocode '{0}': no result has a Polygon or MultiPolygon geometry")]
    GeocodeNoPolygon(String),
    #[error("failure decoding geocoder response: {0}")]
    GeocodeDecodeError(String),
    #[error("failure decoding overpass response: {0}")]
    OverpassDecodeError(String),
    #[error("failure reading overpass response file {0}: {1}")]
    OverpassFileError(String, std::io::Error),
    #[error("attempting to get {0} adjacencies for node '{1}' not in graph")]
    AdjacencyMissingSourceNodeId(AdjacencyDirection, OsmNodeId),
    #[error("attempting to get node '{0}' not in graph")]
    GraphMissingNodeId(OsmNodeId),
    #[error("failure simplifying graph: {0}")]
    GraphSimplificationError(String),
    #[error("response does not contain any OSM 'node' elements")]
    NoNodesFound,
    #[error("response does not contain any OSM 'way' elements matching the network filter")]
    NoWaysFound,
    #[error("graph is empty after {0}")]
    EmptyGraph(String),
    #[error("unable to deserialize WKT into geometry: {0}")]
    InvalidWKT(String),
    #[error("Geometry of WKT is not a valid extent: {0}")]
    InvalidExtentWKT(String),
    #[error("{0}")]
    InternalError(String),
}
