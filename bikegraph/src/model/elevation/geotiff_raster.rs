use super::{sample_store::SampleStore, ElevationError, ElevationSource, GeoTransform};
use geo::{Coord, Rect};
use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};
use tiff::{
    decoder::{Decoder, Limits},
    tags::Tag,
};

const MODEL_PIXEL_SCALE: u16 = 33550;
const MODEL_TIEPOINT: u16 = 33922;
const MODEL_TRANSFORMATION: u16 = 34264;
const GEO_KEY_DIRECTORY: u16 = 34735;
const GDAL_NODATA: u16 = 42113;
/// GeoKey GTRasterTypeGeoKey, and its RasterPixelIsPoint value
const RASTER_TYPE_KEY: u32 = 1025;
const RASTER_PIXEL_IS_POINT: u32 = 2;

/// a single-band GeoTIFF elevation grid in WGS84, decoded into memory.
pub struct GeoTiffRaster {
    path: PathBuf,
    width: usize,
    height: usize,
    /// number of interleaved bands per pixel
    stride: usize,
    transform: GeoTransform,
    nodata: Option<f64>,
    samples: SampleStore,
}

impl GeoTiffRaster {
    /// reads and decodes the raster at `path`.
    pub fn open(path: &Path) -> Result<GeoTiffRaster, ElevationError> {
        let tiff_err = |source: tiff::TiffError| ElevationError::TiffError {
            path: path.to_path_buf(),
            source,
        };
        let file = File::open(path)
            .map_err(|e| ElevationError::RasterFileError(path.to_path_buf(), e))?;
        let mut decoder = Decoder::new(BufReader::new(file))
            .map_err(tiff_err)?
            .with_limits(Limits::unlimited());

        let (width, height) = decoder.dimensions().map_err(tiff_err)?;
        let (width, height) = (width as usize, height as usize);

        let find_f64s = |decoder: &mut Decoder<BufReader<File>>,
                         code: u16|
         -> tiff::TiffResult<Option<Vec<f64>>> {
            decoder
                .find_tag(Tag::from_u16_exhaustive(code))?
                .map(|v| v.into_f64_vec())
                .transpose()
        };
        let scale = find_f64s(&mut decoder, MODEL_PIXEL_SCALE).map_err(tiff_err)?;
        let tiepoint = find_f64s(&mut decoder, MODEL_TIEPOINT).map_err(tiff_err)?;
        let matrix = find_f64s(&mut decoder, MODEL_TRANSFORMATION).map_err(tiff_err)?;
        let geokeys = decoder
            .find_tag(Tag::from_u16_exhaustive(GEO_KEY_DIRECTORY))
            .map_err(tiff_err)?
            .map(|v| v.into_u32_vec())
            .transpose()
            .map_err(tiff_err)?;
        let nodata = decoder
            .find_tag(Tag::from_u16_exhaustive(GDAL_NODATA))
            .map_err(tiff_err)?
            .map(|v| v.into_string())
            .transpose()
            .map_err(tiff_err)?
            .and_then(|s| parse_nodata(&s));

        let transform = match (tiepoint, scale, matrix) {
            (Some(tp), Some(s), _) => GeoTransform::from_tiepoint(&tp, &s),
            (_, _, Some(m)) => GeoTransform::from_matrix(&m),
            _ => None,
        }
        .ok_or_else(|| ElevationError::MissingGeoreference(path.to_path_buf()))?;
        let transform = if is_pixel_is_point(geokeys.as_deref()) {
            transform.shifted_to_corner()
        } else {
            transform
        };

        let samples = SampleStore::from(decoder.read_image().map_err(tiff_err)?);
        let n_pixels = width * height;
        if n_pixels == 0 || samples.len() < n_pixels {
            return Err(ElevationError::UnsupportedRaster(
                path.to_path_buf(),
                format!(
                    "decoded {} samples for a {width}x{height} grid",
                    samples.len()
                ),
            ));
        }
        let stride = samples.len() / n_pixels;
        if stride > 1 {
            log::warn!(
                "raster {} has {stride} bands, sampling the first",
                path.display()
            );
        }

        log::info!(
            "loaded {width}x{height} raster {} (nodata: {})",
            path.display(),
            nodata.map(|n| n.to_string()).unwrap_or(String::from("none"))
        );
        Ok(GeoTiffRaster {
            path: path.to_path_buf(),
            width,
            height,
            stride,
            transform,
            nodata,
            samples,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn nodata(&self) -> Option<f64> {
        self.nodata
    }

    /// the (col, row) of the pixel containing a coordinate, None when outside the grid.
    fn pixel(&self, coord: Coord<f64>) -> Option<(usize, usize)> {
        let (col, row) = self.transform.to_raster(coord)?;
        let (col, row) = (col.floor(), row.floor());
        if col < 0.0 || row < 0.0 || col >= self.width as f64 || row >= self.height as f64 {
            return None;
        }
        Some((col as usize, row as usize))
    }
}

impl ElevationSource for GeoTiffRaster {
    /// nearest-pixel lookup. nodata and NaN samples are reported as None.
    fn sample(&self, coord: Coord<f64>) -> Option<f64> {
        let (col, row) = self.pixel(coord)?;
        let value = self.samples.get((row * self.width + col) * self.stride)?;
        match self.nodata {
            _ if value.is_nan() => None,
            Some(nodata) if value == nodata => None,
            _ => Some(value),
        }
    }

    fn bounds(&self) -> Rect<f64> {
        let w = self.width as f64;
        let h = self.height as f64;
        let corners = [
            self.transform.to_model(0.0, 0.0),
            self.transform.to_model(w, 0.0),
            self.transform.to_model(0.0, h),
            self.transform.to_model(w, h),
        ];
        let min_x = corners.iter().map(|c| c.x).fold(f64::INFINITY, f64::min);
        let min_y = corners.iter().map(|c| c.y).fold(f64::INFINITY, f64::min);
        let max_x = corners.iter().map(|c| c.x).fold(f64::NEG_INFINITY, f64::max);
        let max_y = corners.iter().map(|c| c.y).fold(f64::NEG_INFINITY, f64::max);
        Rect::new((min_x, min_y), (max_x, max_y))
    }
}

/// GDAL writes nodata as ASCII, possibly NUL-terminated.
fn parse_nodata(s: &str) -> Option<f64> {
    s.trim_matches(|c: char| c == '\0' || c.is_whitespace())
        .parse::<f64>()
        .ok()
}

/// reads GTRasterTypeGeoKey from a GeoKeyDirectory, a header of 4 values
/// followed by (key, location, count, value) entries.
fn is_pixel_is_point(geokeys: Option<&[u32]>) -> bool {
    match geokeys {
        Some(keys) if keys.len() >= 4 => keys[4..]
            .chunks_exact(4)
            .any(|entry| {
                entry[0] == RASTER_TYPE_KEY && entry[1] == 0 && entry[3] == RASTER_PIXEL_IS_POINT
            }),
        _ => false,
    }
}
