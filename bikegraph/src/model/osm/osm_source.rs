use super::{
    graph::OsmGraph,
    import_ops,
    nominatim::NominatimClient,
    overpass::{OverpassClient, OverpassQuery, OverpassResponse},
    OsmError,
};
use crate::{algorithm::buffer, config::PipelineConfiguration};
use geo::{Geometry, MultiPolygon, Rect};
use serde::{Deserialize, Serialize};
use std::path::Path;
use wkt::TryFromWkt;

/// where the network comes from.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum OsmSource {
    /// a free-text place name, geocoded to its boundary
    Place { query: String },
    /// a WGS84 bounding box
    Bbox {
        north: f64,
        south: f64,
        east: f64,
        west: f64,
    },
    /// a previously-saved overpass JSON response, optionally truncated to
    /// the POLYGON or MULTIPOLYGON stored as WKT in `extent_filepath`
    OverpassFile {
        filepath: String,
        extent_filepath: Option<String>,
    },
}

impl OsmSource {
    /// downloads or reads the network and builds the graph.
    pub fn import(&self, conf: &PipelineConfiguration) -> Result<OsmGraph, OsmError> {
        let (response, extent) = match self {
            OsmSource::Place { query } => {
                eprintln!();
                log::info!("  (((2.0))) geocoding '{query}'");
                let client = NominatimClient::new(
                    &conf.nominatim_endpoint,
                    &conf.user_agent,
                    conf.timeout_secs,
                )?;
                let extent = client.geocode(query)?;
                let response = download(&extent, conf)?;
                (response, Some(extent))
            }
            OsmSource::Bbox {
                north,
                south,
                east,
                west,
            } => {
                if north <= south || east <= west {
                    return Err(OsmError::ConfigurationError(format!(
                        "invalid bounding box: north {north}, south {south}, east {east}, west {west}"
                    )));
                }
                let rect = Rect::new((*west, *south), (*east, *north));
                let extent = MultiPolygon::new(vec![rect.to_polygon()]);
                let response = download(&extent, conf)?;
                (response, Some(extent))
            }
            OsmSource::OverpassFile {
                filepath,
                extent_filepath,
            } => {
                eprintln!();
                log::info!("  (((2.0))) reading overpass response {filepath}");
                let response = OverpassResponse::from_file(Path::new(filepath))?;
                let extent = read_extent_wkt(extent_filepath)?;
                (response, extent)
            }
        };

        let buffered = match &extent {
            Some(e) => Some(buffered_extent(e, conf.buffer_meters)?),
            None => None,
        };
        import_ops::build_graph(&response, extent.as_ref(), buffered.as_ref(), conf)
    }
}

fn buffered_extent(extent: &MultiPolygon<f64>, meters: f64) -> Result<MultiPolygon<f64>, OsmError> {
    let bounds = buffer::buffered_bounds(extent, meters)?;
    Ok(MultiPolygon::new(vec![bounds.to_polygon()]))
}

/// queries overpass for the network within the buffered bounds of the extent.
fn download(
    extent: &MultiPolygon<f64>,
    conf: &PipelineConfiguration,
) -> Result<OverpassResponse, OsmError> {
    let bounds = buffer::buffered_bounds(extent, conf.buffer_meters)?;
    let filters = conf.element_filter()?.queries();
    let query = OverpassQuery::new(filters, bounds, conf.timeout_secs, conf.overpass_memory);
    eprintln!();
    log::info!(
        "  (((2.0))) downloading '{}' network from {}",
        conf.custom_filter
            .clone()
            .unwrap_or_else(|| conf.network_type.to_string()),
        conf.overpass_endpoint
    );
    let client = OverpassClient::new(&conf.overpass_endpoint, &conf.user_agent, conf.timeout_secs)?;
    client.query(&query)
}

/// helper function that attempts to read an optional WKT extent from a file if provided.
fn read_extent_wkt(
    extent_filepath: &Option<String>,
) -> Result<Option<MultiPolygon<f64>>, OsmError> {
    let filepath = match extent_filepath {
        Some(f) => f,
        None => return Ok(None),
    };
    let wkt_str = std::fs::read_to_string(filepath).map_err(|e| {
        OsmError::ConfigurationError(format!("unable to read file {filepath}: {e}"))
    })?;
    let geometry: Geometry<f64> = Geometry::try_from_wkt_str(&wkt_str)
        .map_err(|e| OsmError::InvalidWKT(format!("{filepath}: {e}")))?;
    match geometry {
        Geometry::Polygon(p) => Ok(Some(MultiPolygon::new(vec![p]))),
        Geometry::MultiPolygon(mp) => Ok(Some(mp)),
        _ => Err(OsmError::InvalidExtentWKT(format!(
            "{filepath} must contain a POLYGON or MULTIPOLYGON"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::{read_extent_wkt, OsmSource};
    use crate::config::PipelineConfiguration;
    use crate::model::osm::OsmError;
    use std::io::Write;

    #[test]
    fn polygon_extent_is_read() {
        let mut file = tempfile::Builder::new()
            .suffix(".wkt")
            .tempfile()
            .unwrap_or_else(|e| panic!("{e}"));
        write!(file, "POLYGON((0 0,1 0,1 1,0 1,0 0))").unwrap_or_else(|e| panic!("{e}"));
        let path = Some(file.path().display().to_string());
        let extent = read_extent_wkt(&path)
            .unwrap_or_else(|e| panic!("{e}"))
            .unwrap_or_else(|| panic!("no extent"));
        assert_eq!(extent.0.len(), 1);
        assert!(read_extent_wkt(&None).unwrap_or_else(|e| panic!("{e}")).is_none());
    }

    #[test]
    fn point_extent_is_rejected() {
        let mut file = tempfile::Builder::new()
            .suffix(".wkt")
            .tempfile()
            .unwrap_or_else(|e| panic!("{e}"));
        write!(file, "POINT(0 0)").unwrap_or_else(|e| panic!("{e}"));
        let path = Some(file.path().display().to_string());
        assert!(matches!(
            read_extent_wkt(&path),
            Err(OsmError::InvalidExtentWKT(_))
        ));
    }

    #[test]
    fn inverted_bbox_is_rejected_before_download() {
        let source = OsmSource::Bbox {
            north: 43.4,
            south: 43.5,
            east: -80.4,
            west: -80.5,
        };
        assert!(matches!(
            source.import(&PipelineConfiguration::default()),
            Err(OsmError::ConfigurationError(_))
        ));
    }

    #[test]
    fn missing_overpass_file_fails() {
        let source = OsmSource::OverpassFile {
            filepath: String::from("does/not/exist.json"),
            extent_filepath: None,
        };
        assert!(matches!(
            source.import(&PipelineConfiguration::default()),
            Err(OsmError::OverpassFileError(_, _))
        ));
    }
}
