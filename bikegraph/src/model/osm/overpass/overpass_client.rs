use super::{OverpassQuery, OverpassResponse};
use crate::model::osm::{http_ops, OsmError};
use reqwest::blocking::Client;

/// submits queries to an Overpass API interpreter endpoint.
pub struct OverpassClient {
    endpoint: String,
    client: Client,
}

impl OverpassClient {
    pub fn new(endpoint: &str, user_agent: &str, timeout_secs: u64) -> Result<Self, OsmError> {
        let client = http_ops::build_client(user_agent, timeout_secs)?;
        Ok(OverpassClient {
            endpoint: String::from(endpoint),
            client,
        })
    }

    /// POSTs the query as the `data` form field and decodes the JSON response.
    pub fn query(&self, query: &OverpassQuery) -> Result<OverpassResponse, OsmError> {
        let data = query.to_string();
        log::debug!("overpass query: {data}");
        let response = self
            .client
            .post(&self.endpoint)
            .form(&[("data", data.as_str())])
            .send()
            .map_err(|source| OsmError::HttpRequestError {
                url: self.endpoint.clone(),
                source,
            })?;
        let body = http_ops::read_text(response, &self.endpoint)?;
        let result = OverpassResponse::from_json_str(&body)?;
        if let Some(remark) = &result.remark {
            log::warn!("overpass response remark: {remark}");
        }
        log::info!(
            "overpass returned {} elements from {}",
            result.elements.len(),
            self.endpoint
        );
        Ok(result)
    }
}
