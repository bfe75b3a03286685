use crate::model::osm::OsmError;
use geo::{BoundingRect, Destination, Haversine, MultiPolygon, Point, Rect};

/// the bounding box of an extent grown by a distance in meters on every side.
/// meters are converted to degrees at the center of the extent.
pub fn buffered_bounds(extent: &MultiPolygon<f64>, meters: f64) -> Result<Rect<f64>, OsmError> {
    let bounds = extent.bounding_rect().ok_or_else(|| {
        OsmError::InvalidExtentWKT(String::from("extent has no bounding box"))
    })?;
    if meters <= 0.0 {
        return Ok(bounds);
    }
    let center: Point<f64> = bounds.center().into();
    let north = Haversine.destination(center, 0.0, meters);
    let east = Haversine.destination(center, 90.0, meters);
    let dy = north.y() - center.y();
    let dx = east.x() - center.x();
    let min = bounds.min();
    let max = bounds.max();
    Ok(Rect::new(
        (min.x - dx, min.y - dy),
        (max.x + dx, max.y + dy),
    ))
}
