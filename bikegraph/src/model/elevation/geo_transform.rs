use geo::Coord;

/// affine mapping from raster (column, row) space to model (x, y) space:
///
/// ```text
/// x = a * col + b * row + c
/// y = d * col + e * row + f
/// ```
///
/// with (col, row) = (0, 0) at the upper-left corner of the first pixel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoTransform {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl GeoTransform {
    /// from a ModelTiepoint `[i, j, k, x, y, z]` and ModelPixelScale `[sx, sy, sz]`.
    /// raster rows run south, so the y scale is negated.
    pub fn from_tiepoint(tiepoint: &[f64], scale: &[f64]) -> Option<GeoTransform> {
        match (tiepoint, scale) {
            ([i, j, _, x, y, ..], [sx, sy, ..]) => Some(GeoTransform {
                a: *sx,
                b: 0.0,
                c: x - i * sx,
                d: 0.0,
                e: -sy,
                f: y + j * sy,
            }),
            _ => None,
        }
    }

    /// from a row-major 4x4 ModelTransformation matrix
    pub fn from_matrix(matrix: &[f64]) -> Option<GeoTransform> {
        match matrix {
            [a, b, _, c, d, e, _, f, ..] => Some(GeoTransform {
                a: *a,
                b: *b,
                c: *c,
                d: *d,
                e: *e,
                f: *f,
            }),
            _ => None,
        }
    }

    /// moves the origin from a pixel center to its upper-left corner, for
    /// rasters georeferenced as PixelIsPoint.
    pub fn shifted_to_corner(self) -> GeoTransform {
        GeoTransform {
            c: self.c - 0.5 * self.a - 0.5 * self.b,
            f: self.f - 0.5 * self.d - 0.5 * self.e,
            ..self
        }
    }

    pub fn to_model(&self, col: f64, row: f64) -> Coord<f64> {
        Coord {
            x: self.a * col + self.b * row + self.c,
            y: self.d * col + self.e * row + self.f,
        }
    }

    /// fractional (col, row) position of a model coordinate, None if the
    /// transform is degenerate.
    pub fn to_raster(&self, coord: Coord<f64>) -> Option<(f64, f64)> {
        let det = self.a * self.e - self.b * self.d;
        if det == 0.0 || !det.is_finite() {
            return None;
        }
        let dx = coord.x - self.c;
        let dy = coord.y - self.f;
        let col = (self.e * dx - self.b * dy) / det;
        let row = (self.a * dy - self.d * dx) / det;
        Some((col, row))
    }
}
