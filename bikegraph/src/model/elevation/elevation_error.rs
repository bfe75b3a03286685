use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ElevationError {
    #[error("failure opening raster file {0}: {1}")]
    RasterFileError(PathBuf, std::io::Error),
    #[error("failure decoding GeoTIFF {path}: {source}")]
    TiffError {
        path: PathBuf,
        source: tiff::TiffError,
    },
    #[error("GeoTIFF {0} has no ModelPixelScale/ModelTiepoint or ModelTransformation georeference")]
    MissingGeoreference(PathBuf),
    #[error("GeoTIFF {0} is not supported: {1}")]
    UnsupportedRaster(PathBuf, String),
    #[error("no raster files provided for elevation sampling")]
    NoRasters,
}
