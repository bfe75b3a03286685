use geo::Geometry;
use itertools::Itertools;
use std::fmt::Display;
use wkt::ToWkt;

/// a typed table cell
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// an attribute absent on this row, printed as NaN
    Missing,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    List(Vec<String>),
    Geometry(Geometry<f64>),
}

impl CellValue {
    pub fn from_option(value: Option<f64>) -> CellValue {
        match value {
            Some(v) => CellValue::Float(v),
            None => CellValue::Missing,
        }
    }

    /// the value as written to CSV, where missing values are empty
    pub fn to_csv_field(&self) -> String {
        match self {
            CellValue::Missing => String::new(),
            CellValue::Float(v) => v.to_string(),
            other => other.to_string(),
        }
    }
}

impl Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellValue::Missing => write!(f, "NaN"),
            CellValue::Bool(true) => write!(f, "True"),
            CellValue::Bool(false) => write!(f, "False"),
            CellValue::Int(v) => write!(f, "{v}"),
            CellValue::Float(v) if v.is_nan() => write!(f, "NaN"),
            CellValue::Float(v) => write!(f, "{v:.3}"),
            CellValue::Text(v) => write!(f, "{v}"),
            CellValue::List(v) => write!(f, "[{}]", v.iter().join(", ")),
            CellValue::Geometry(g) => write!(f, "{}", g.wkt_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::CellValue;
    use geo::{line_string, Geometry};

    #[test]
    fn display() {
        assert_eq!(CellValue::Missing.to_string(), "NaN");
        assert_eq!(CellValue::Float(57.12345).to_string(), "57.123");
        assert_eq!(CellValue::Bool(false).to_string(), "False");
        assert_eq!(
            CellValue::List(vec![String::from("asphalt"), String::from("gravel")]).to_string(),
            "[asphalt, gravel]"
        );
        let geometry = Geometry::LineString(line_string![(x: 1.0, y: 2.0), (x: 3.0, y: 4.0)]);
        let wkt = CellValue::Geometry(geometry).to_string();
        assert!(wkt.starts_with("LINESTRING"), "{wkt}");
        assert!(wkt.contains("3 4"), "{wkt}");
    }

    #[test]
    fn csv_fields() {
        assert_eq!(CellValue::Missing.to_csv_field(), "");
        assert_eq!(CellValue::Float(0.5).to_csv_field(), "0.5");
        assert_eq!(CellValue::Int(7).to_csv_field(), "7");
    }
}
