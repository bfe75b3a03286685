use super::OsmTags;
use crate::model::osm::{overpass::FilterQuery, NetworkType, OsmError};
use serde::{Deserialize, Serialize};

/// decides which way elements of a response become part of the graph.
/// overpass already applies the same filter server-side, but responses read
/// from disk may hold ways that a network type should exclude.
#[derive(Default, Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum ElementFilter {
    #[default]
    NoFilter,
    OverpassQueries {
        queries: Vec<FilterQuery>,
    },
}

impl ElementFilter {
    pub fn from_network_type(network_type: &NetworkType) -> Result<ElementFilter, OsmError> {
        let queries = network_type.filter_queries()?;
        Ok(ElementFilter::OverpassQueries { queries })
    }

    /// builds a filter from a user-supplied chain of overpass tag clauses,
    /// such as `["highway"~"cycleway|path"]`.
    pub fn from_custom_filter(filter: &str) -> Result<ElementFilter, OsmError> {
        let queries = FilterQuery::parse_chain(filter).map_err(OsmError::ConfigurationError)?;
        Ok(ElementFilter::OverpassQueries { queries })
    }

    /// true if a way with these tags passes every query of this filter
    pub fn accept(&self, tags: &OsmTags) -> bool {
        match self {
            ElementFilter::NoFilter => true,
            ElementFilter::OverpassQueries { queries } => queries.iter().all(|q| q.filter(tags)),
        }
    }

    /// the overpass tag clauses equivalent to this filter
    pub fn queries(&self) -> Vec<FilterQuery> {
        match self {
            ElementFilter::NoFilter => vec![],
            ElementFilter::OverpassQueries { queries } => queries.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ElementFilter;
    use crate::model::osm::{graph::OsmTags, NetworkType};

    fn tags(pairs: &[(&str, &str)]) -> OsmTags {
        pairs
            .iter()
            .map(|(k, v)| (String::from(*k), String::from(*v)))
            .collect()
    }

    #[test]
    fn custom_filter_accepts_only_matching_ways() {
        let filter = ElementFilter::from_custom_filter(r#"["highway"~"cycleway|path"]"#)
            .unwrap_or_else(|e| panic!("{e}"));
        assert!(filter.accept(&tags(&[("highway", "cycleway")])));
        assert!(!filter.accept(&tags(&[("highway", "primary")])));
        assert!(!filter.accept(&tags(&[("name", "King Street")])));
    }

    #[test]
    fn invalid_custom_filter_fails() {
        assert!(ElementFilter::from_custom_filter("highway=cycleway").is_err());
    }

    #[test]
    fn bike_filter_matches_network_type() {
        let filter =
            ElementFilter::from_network_type(&NetworkType::Bike).unwrap_or_else(|e| panic!("{e}"));
        assert!(filter.accept(&tags(&[("highway", "path")])));
        assert!(!filter.accept(&tags(&[("highway", "motorway_link")])));
        assert!(ElementFilter::NoFilter.accept(&tags(&[])));
    }
}
