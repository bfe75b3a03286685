use geo::{Coord, Rect};

/// a surface that can be sampled for elevation at WGS84 coordinates.
pub trait ElevationSource: Send + Sync {
    /// the elevation at a (lon, lat) coordinate, or None outside coverage
    /// and where the surface has no data.
    fn sample(&self, coord: Coord<f64>) -> Option<f64>;

    /// the extent covered by this source
    fn bounds(&self) -> Rect<f64>;
}
