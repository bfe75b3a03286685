use super::NominatimResult;
use crate::model::osm::{http_ops, OsmError};
use geo::MultiPolygon;
use reqwest::blocking::Client;

/// resolves free-text place queries to boundary polygons with a Nominatim
/// `search` endpoint. see <https://nominatim.org/release-docs/latest/api/Search/>
pub struct NominatimClient {
    endpoint: String,
    client: Client,
}

impl NominatimClient {
    pub fn new(endpoint: &str, user_agent: &str, timeout_secs: u64) -> Result<Self, OsmError> {
        let client = http_ops::build_client(user_agent, timeout_secs)?;
        Ok(NominatimClient {
            endpoint: String::from(endpoint),
            client,
        })
    }

    /// runs a search request, returning the raw results.
    pub fn search(&self, query: &str) -> Result<Vec<NominatimResult>, OsmError> {
        let url = format!("{}/search", self.endpoint.trim_end_matches('/'));
        let response = self
            .client
            .get(&url)
            .query(&[
                ("format", "json"),
                ("polygon_geojson", "1"),
                ("dedupe", "0"),
                ("limit", "50"),
                ("q", query),
            ])
            .send()
            .map_err(|source| OsmError::HttpRequestError {
                url: url.clone(),
                source,
            })?;
        let body = http_ops::read_text(response, &url)?;
        serde_json::from_str(&body).map_err(|e| OsmError::GeocodeDecodeError(e.to_string()))
    }

    /// geocodes a place to the boundary of the first result that has one.
    pub fn geocode(&self, query: &str) -> Result<MultiPolygon<f64>, OsmError> {
        let results = self.search(query)?;
        let (result, boundary) = NominatimResult::first_boundary(&results, query)?;
        log::info!(
            "geocoded '{query}' to {} {}",
            result.osm_type.as_deref().unwrap_or("element"),
            result.display_name
        );
        Ok(boundary)
    }
}
