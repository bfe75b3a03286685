mod elevation_error;
mod elevation_source;
mod geo_transform;
mod geotiff_raster;
mod raster_mosaic;
mod sample_store;
#[cfg(test)]
pub(crate) mod test_raster;

pub use elevation_error::ElevationError;
pub use elevation_source::ElevationSource;
pub use geo_transform::GeoTransform;
pub use geotiff_raster::GeoTiffRaster;
pub use raster_mosaic::RasterMosaic;
