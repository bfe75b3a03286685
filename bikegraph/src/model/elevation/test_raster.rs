//! synthetic GeoTIFF fixtures for tests.
use geo::{coord, Coord};
use tempfile::NamedTempFile;
use tiff::{
    encoder::{colortype, TiffEncoder},
    tags::Tag,
};

pub const WIDTH: usize = 8;
pub const HEIGHT: usize = 6;
pub const ORIGIN_X: f64 = -80.5;
pub const ORIGIN_Y: f64 = 43.5;
pub const PIXEL_SIZE: f64 = 0.01;
pub const NODATA: f64 = -9999.0;
pub const NODATA_PIXEL: (usize, usize) = (7, 5);

/// elevation rises 2 m per column east and 5 m per row south
pub fn elevation_at(col: usize, row: usize) -> f64 {
    300.0 + 2.0 * col as f64 + 5.0 * row as f64
}

pub fn pixel_center(col: usize, row: usize) -> Coord<f64> {
    coord! {
        x: ORIGIN_X + (col as f64 + 0.5) * PIXEL_SIZE,
        y: ORIGIN_Y - (row as f64 + 0.5) * PIXEL_SIZE,
    }
}

/// writes an 8x6 Float32 grid covering lon [-80.50, -80.42], lat [43.44, 43.50]
/// with GDAL_NODATA set on a single pixel.
pub fn write_sloped_raster() -> NamedTempFile {
    let mut data = vec![];
    for row in 0..HEIGHT {
        for col in 0..WIDTH {
            if (col, row) == NODATA_PIXEL {
                data.push(NODATA as f32);
            } else {
                data.push(elevation_at(col, row) as f32);
            }
        }
    }
    let mut file = tempfile::Builder::new()
        .suffix(".tif")
        .tempfile()
        .unwrap_or_else(|e| panic!("{e}"));
    {
        let mut tiff = TiffEncoder::new(file.as_file_mut()).unwrap_or_else(|e| panic!("{e}"));
        let mut image = tiff
            .new_image::<colortype::Gray32Float>(WIDTH as u32, HEIGHT as u32)
            .unwrap_or_else(|e| panic!("{e}"));
        let encoder = image.encoder();
        encoder
            .write_tag(
                Tag::from_u16_exhaustive(33550),
                &[PIXEL_SIZE, PIXEL_SIZE, 0.0][..],
            )
            .unwrap_or_else(|e| panic!("{e}"));
        encoder
            .write_tag(
                Tag::from_u16_exhaustive(33922),
                &[0.0, 0.0, 0.0, ORIGIN_X, ORIGIN_Y, 0.0][..],
            )
            .unwrap_or_else(|e| panic!("{e}"));
        encoder
            .write_tag(Tag::from_u16_exhaustive(42113), "-9999")
            .unwrap_or_else(|e| panic!("{e}"));
        image.write_data(&data).unwrap_or_else(|e| panic!("{e}"));
    }
    file
}
