use crate::model::osm::OsmError;
use geo::{Geometry, MultiPolygon};
use serde::{Deserialize, Serialize};

/// one entry of a Nominatim `search` response with `polygon_geojson=1`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NominatimResult {
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub osm_type: Option<String>,
    #[serde(default)]
    pub osm_id: Option<i64>,
    #[serde(default)]
    pub geojson: Option<geojson::Geometry>,
}

impl NominatimResult {
    /// the boundary of this result when its geometry is a Polygon or MultiPolygon.
    /// points and lines (e.g. a place node) have no area and return None.
    pub fn boundary(&self) -> Result<Option<MultiPolygon<f64>>, OsmError> {
        let geojson = match &self.geojson {
            Some(g) => g.clone(),
            None => return Ok(None),
        };
        let geometry = Geometry::<f64>::try_from(geojson).map_err(|e| {
            OsmError::GeocodeDecodeError(format!(
                "invalid geometry for '{}': {e}",
                self.display_name
            ))
        })?;
        match geometry {
            Geometry::Polygon(p) => Ok(Some(MultiPolygon::new(vec![p]))),
            Geometry::MultiPolygon(mp) => Ok(Some(mp)),
            _ => Ok(None),
        }
    }

    /// selects the first result with an areal boundary, in response order.
    pub fn first_boundary<'a>(
        results: &'a [NominatimResult],
        query: &str,
    ) -> Result<(&'a NominatimResult, MultiPolygon<f64>), OsmError> {
        if results.is_empty() {
            return Err(OsmError::GeocodeNoResults(String::from(query)));
        }
        for result in results.iter() {
            if let Some(boundary) = result.boundary()? {
                return Ok((result, boundary));
            }
            log::debug!(
                "skipping geocoder result '{}' without a polygon geometry",
                result.display_name
            );
        }
        Err(OsmError::GeocodeNoPolygon(String::from(query)))
    }
}

#[cfg(test)]
mod tests {
    use super::NominatimResult;
    use crate::model::osm::OsmError;

    const RESPONSE: &str = r#"[
        {
            "place_id": 1,
            "osm_type": "node",
            "osm_id": 11,
            "display_name": "Rosemount, Kitchener, Waterloo Region, Ontario, Canada",
            "class": "place",
            "type": "neighbourhood",
            "geojson": {"type": "Point", "coordinates": [-80.45, 43.45]}
        },
        {
            "place_id": 2,
            "osm_type": "relation",
            "osm_id": 22,
            "display_name": "Rosemount, Kitchener, Ontario, Canada",
            "class": "boundary",
            "type": "administrative",
            "geojson": {
                "type": "Polygon",
                "coordinates": [[[-80.46, 43.44], [-80.44, 43.44], [-80.44, 43.46], [-80.46, 43.46], [-80.46, 43.44]]]
            }
        }
    ]"#;

    #[test]
    fn first_polygon_result_is_selected() {
        let results: Vec<NominatimResult> =
            serde_json::from_str(RESPONSE).unwrap_or_else(|e| panic!("{e}"));
        // the selected result borrows from the results, not the query
        let (result, boundary) = {
            let query = String::from("Rosemount");
            NominatimResult::first_boundary(&results, &query).unwrap_or_else(|e| panic!("{e}"))
        };
        assert_eq!(result.osm_id, Some(22));
        assert_eq!(boundary.0.len(), 1);
        assert_eq!(boundary.0[0].exterior().0.len(), 5);
    }

    #[test]
    fn point_only_results_fail() {
        let results: Vec<NominatimResult> =
            serde_json::from_str(RESPONSE).unwrap_or_else(|e| panic!("{e}"));
        match NominatimResult::first_boundary(&results[..1], "Rosemount") {
            Err(OsmError::GeocodeNoPolygon(q)) => assert_eq!(q, "Rosemount"),
            other => panic!("expected GeocodeNoPolygon, found {other:?}"),
        }
    }

    #[test]
    fn empty_results_fail() {
        assert!(matches!(
            NominatimResult::first_boundary(&[], "nowhere"),
            Err(OsmError::GeocodeNoResults(_))
        ));
    }
}
