use super::{ElevationError, ElevationSource, GeoTiffRaster};
use geo::{Coord, Rect};
use std::path::Path;

/// an ordered collection of rasters sampled as a single surface. a
/// coordinate takes its value from the first raster with data there.
pub struct RasterMosaic {
    rasters: Vec<GeoTiffRaster>,
}

impl RasterMosaic {
    pub fn new(rasters: Vec<GeoTiffRaster>) -> Result<RasterMosaic, ElevationError> {
        if rasters.is_empty() {
            return Err(ElevationError::NoRasters);
        }
        Ok(RasterMosaic { rasters })
    }

    /// opens every raster file, failing on the first that cannot be read.
    pub fn open<P: AsRef<Path>>(paths: &[P]) -> Result<RasterMosaic, ElevationError> {
        let rasters = paths
            .iter()
            .map(|p| GeoTiffRaster::open(p.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        RasterMosaic::new(rasters)
    }

    pub fn len(&self) -> usize {
        self.rasters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rasters.is_empty()
    }
}

impl ElevationSource for RasterMosaic {
    fn sample(&self, coord: Coord<f64>) -> Option<f64> {
        self.rasters.iter().find_map(|r| r.sample(coord))
    }

    fn bounds(&self) -> Rect<f64> {
        let mut bounds = self.rasters.iter().map(|r| r.bounds());
        let first = bounds.next().unwrap_or(Rect::new((0.0, 0.0), (0.0, 0.0)));
        bounds.fold(first, |acc, b| {
            Rect::new(
                (acc.min().x.min(b.min().x), acc.min().y.min(b.min().y)),
                (acc.max().x.max(b.max().x), acc.max().y.max(b.max().y)),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::RasterMosaic;
    use crate::model::elevation::{test_raster, ElevationError, ElevationSource};
    use geo::coord;
    use std::path::PathBuf;

    #[test]
    fn empty_mosaic_fails() {
        let paths: Vec<PathBuf> = vec![];
        assert!(matches!(
            RasterMosaic::open(&paths),
            Err(ElevationError::NoRasters)
        ));
    }

    #[test]
    fn first_raster_with_data_supplies_the_sample() {
        let a = test_raster::write_sloped_raster();
        let b = test_raster::write_sloped_raster();
        let mosaic = RasterMosaic::open(&[a.path(), b.path()]).unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(mosaic.len(), 2);
        assert_eq!(
            mosaic.sample(test_raster::pixel_center(0, 0)),
            Some(test_raster::elevation_at(0, 0))
        );
        assert_eq!(mosaic.sample(coord! { x: 10.0, y: 10.0 }), None);
        assert!((mosaic.bounds().min().y - 43.44).abs() < 1e-9);
    }
}
