use super::FilterQuery;
use geo::Rect;
use itertools::Itertools;
use std::fmt::Display;

/// a way query in the Overpass QL described at
/// <https://wiki.openstreetmap.org/wiki/Overpass_API/Language_Guide>.
/// selects all ways that pass the filter chain within a bounding box and
/// recurses down to their nodes.
#[derive(Debug, Clone)]
pub struct OverpassQuery {
    pub filters: Vec<FilterQuery>,
    /// bounding box in WGS84 degrees, x = longitude, y = latitude
    pub bbox: Rect<f64>,
    pub timeout_secs: u64,
    /// server-side memory allocation in bytes, or the server default when None
    pub maxsize: Option<u64>,
}

impl OverpassQuery {
    pub fn new(
        filters: Vec<FilterQuery>,
        bbox: Rect<f64>,
        timeout_secs: u64,
        maxsize: Option<u64>,
    ) -> OverpassQuery {
        OverpassQuery {
            filters,
            bbox,
            timeout_secs,
            maxsize,
        }
    }

    /// the `(south,west,north,east)` bounding box clause
    fn bbox_clause(&self) -> String {
        let min = self.bbox.min();
        let max = self.bbox.max();
        format!("({:.6},{:.6},{:.6},{:.6})", min.y, min.x, max.y, max.x)
    }

    fn settings(&self) -> String {
        let maxsize = match self.maxsize {
            Some(bytes) => format!("[maxsize:{bytes}]"),
            None => String::new(),
        };
        format!("[out:json][timeout:{}]{}", self.timeout_secs, maxsize)
    }
}

impl Display for OverpassQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let filter = self.filters.iter().join("");
        write!(
            f,
            "{};(way{}{};>;);out;",
            self.settings(),
            filter,
            self.bbox_clause()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::OverpassQuery;
    use crate::model::osm::overpass::FilterQuery;
    use geo::{coord, Rect};

    #[test]
    fn renders_overpass_ql() {
        let filters = FilterQuery::parse_chain(r#"["highway"]["bicycle"!~"no"]"#)
            .unwrap_or_else(|e| panic!("{e}"));
        let bbox = Rect::new(
            coord! { x: -80.5, y: 43.4 },
            coord! { x: -80.4, y: 43.5 },
        );
        let query = OverpassQuery::new(filters, bbox, 180, None);
        assert_eq!(
            query.to_string(),
            r#"[out:json][timeout:180];(way["highway"]["bicycle"!~"no"](43.400000,-80.500000,43.500000,-80.400000);>;);out;"#
        );
    }

    #[test]
    fn renders_maxsize_setting() {
        let bbox = Rect::new(coord! { x: 0.0, y: 0.0 }, coord! { x: 1.0, y: 1.0 });
        let query = OverpassQuery::new(vec![FilterQuery::exists("highway")], bbox, 60, Some(1024));
        assert!(query
            .to_string()
            .starts_with("[out:json][timeout:60][maxsize:1024];"));
    }
}
