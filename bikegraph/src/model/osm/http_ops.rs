use super::OsmError;
use reqwest::blocking::{Client, Response};
use std::time::Duration;

/// builds the blocking client shared by the geocoder and overpass calls.
/// both public services reject requests that do not identify themselves.
pub fn build_client(user_agent: &str, timeout_secs: u64) -> Result<Client, OsmError> {
    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|source| OsmError::HttpClientError { source })
}

/// reads the body of a response, failing on non-success status codes.
pub fn read_text(response: Response, url: &str) -> Result<String, OsmError> {
    let status = response.status();
    let body = response.text().map_err(|source| OsmError::HttpRequestError {
        url: String::from(url),
        source,
    })?;
    if !status.is_success() {
        return Err(OsmError::HttpStatusError {
            url: String::from(url),
            status: status.as_u16(),
            body,
        });
    }
    Ok(body)
}
