use super::{overpass::FilterQuery, OsmError};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// `["access"!~"private"]`, the default access restriction applied by osmnx.
const DEFAULT_ACCESS: &str = r#"["access"!~"private"]"#;

/// travel-mode filters selecting which ways qualify for a network. each
/// filter mirrors the osmnx definition of the same name, e.g. for "bike":
///
/// ```text
/// ["highway"]["area"!~"yes"]["access"!~"private"]
/// ["highway"!~"abandoned|bus_guideway|construction|corridor|elevator|escalator|footway|motor|no|planned|platform|proposed|raceway|razed|steps"]
/// ["bicycle"!~"no"]["service"!~"private"]
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum NetworkType {
    Drive,
    #[value(name = "drive_service")]
    DriveService,
    Walk,
    #[default]
    Bike,
    All,
    #[value(name = "all_public")]
    AllPublic,
}

impl NetworkType {
    /// the overpass tag filter chain for this network type.
    pub fn overpass_filter(&self) -> String {
        use NetworkType as N;
        match self {
            N::Drive => format!(
                "[\"highway\"][\"area\"!~\"yes\"]{DEFAULT_ACCESS}\
                 [\"highway\"!~\"abandoned|bridleway|bus_guideway|construction|corridor|cycleway|elevator|escalator|footway|no|path|pedestrian|planned|platform|proposed|raceway|razed|service|steps|track\"]\
                 [\"motor_vehicle\"!~\"no\"][\"motorcar\"!~\"no\"]\
                 [\"service\"!~\"alley|driveway|emergency_access|parking|parking_aisle|private\"]"
            ),
            N::DriveService => format!(
                "[\"highway\"][\"area\"!~\"yes\"]{DEFAULT_ACCESS}\
                 [\"highway\"!~\"abandoned|bridleway|bus_guideway|construction|corridor|cycleway|elevator|escalator|footway|no|path|pedestrian|planned|platform|proposed|raceway|razed|steps|track\"]\
                 [\"motor_vehicle\"!~\"no\"][\"motorcar\"!~\"no\"]\
                 [\"service\"!~\"emergency_access|parking|parking_aisle|private\"]"
            ),
            N::Walk => format!(
                "[\"highway\"][\"area\"!~\"yes\"]{DEFAULT_ACCESS}\
                 [\"highway\"!~\"abandoned|bus_guideway|construction|cycleway|motor|no|planned|platform|proposed|raceway|razed\"]\
                 [\"foot\"!~\"no\"][\"service\"!~\"private\"]"
            ),
            N::Bike => format!(
                "[\"highway\"][\"area\"!~\"yes\"]{DEFAULT_ACCESS}\
                 [\"highway\"!~\"abandoned|bus_guideway|construction|corridor|elevator|escalator|footway|motor|no|planned|platform|proposed|raceway|razed|steps\"]\
                 [\"bicycle\"!~\"no\"][\"service\"!~\"private\"]"
            ),
            N::All => String::from(
                "[\"highway\"][\"area\"!~\"yes\"]\
                 [\"highway\"!~\"abandoned|construction|no|planned|platform|proposed|raceway|razed\"]",
            ),
            N::AllPublic => format!(
                "[\"highway\"][\"area\"!~\"yes\"]{DEFAULT_ACCESS}\
                 [\"highway\"!~\"abandoned|construction|no|planned|platform|proposed|raceway|razed\"]\
                 [\"service\"!~\"private\"]"
            ),
        }
    }

    /// the filter chain as individual queries, for local evaluation.
    pub fn filter_queries(&self) -> Result<Vec<FilterQuery>, OsmError> {
        FilterQuery::parse_chain(&self.overpass_filter()).map_err(|e| {
            OsmError::InternalError(format!("invalid '{self}' network filter: {e}"))
        })
    }

    /// pedestrians may walk either direction on a oneway street, so walk
    /// networks ignore the oneway tag.
    pub fn is_bidirectional(&self) -> bool {
        matches!(self, NetworkType::Walk)
    }
}

impl Display for NetworkType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use NetworkType as N;
        let s = match self {
            N::Drive => "drive",
            N::DriveService => "drive_service",
            N::Walk => "walk",
            N::Bike => "bike",
            N::All => "all",
            N::AllPublic => "all_public",
        };
        write!(f, "{s}")
    }
}

#[cfg(test)]
mod tests {
    use super::NetworkType;
    use crate::model::osm::graph::OsmTags;

    fn tags(pairs: &[(&str, &str)]) -> OsmTags {
        pairs
            .iter()
            .map(|(k, v)| (String::from(*k), String::from(*v)))
            .collect()
    }

    fn accepts(network_type: NetworkType, pairs: &[(&str, &str)]) -> bool {
        let queries = network_type
            .filter_queries()
            .unwrap_or_else(|e| panic!("{e}"));
        let t = tags(pairs);
        queries.iter().all(|q| q.filter(&t))
    }

    #[test]
    fn every_network_type_parses() {
        use NetworkType as N;
        for n in [N::Drive, N::DriveService, N::Walk, N::Bike, N::All, N::AllPublic] {
            assert!(!n.filter_queries().unwrap_or_else(|e| panic!("{e}")).is_empty());
        }
    }

    #[test]
    fn bike_network_accepts_cycleways_and_streets() {
        assert!(accepts(NetworkType::Bike, &[("highway", "cycleway")]));
        assert!(accepts(
            NetworkType::Bike,
            &[("highway", "residential"), ("surface", "asphalt")]
        ));
    }

    #[test]
    fn bike_network_rejects_motorways_footways_and_private_ways() {
        assert!(!accepts(NetworkType::Bike, &[("highway", "motorway")]));
        assert!(!accepts(NetworkType::Bike, &[("highway", "footway")]));
        assert!(!accepts(NetworkType::Bike, &[("highway", "steps")]));
        assert!(!accepts(
            NetworkType::Bike,
            &[("highway", "residential"), ("access", "private")]
        ));
        assert!(!accepts(
            NetworkType::Bike,
            &[("highway", "tertiary"), ("bicycle", "no")]
        ));
        assert!(!accepts(NetworkType::Bike, &[("building", "yes")]));
    }

    #[test]
    fn walk_is_the_only_bidirectional_network() {
        assert!(NetworkType::Walk.is_bidirectional());
        assert!(!NetworkType::Bike.is_bidirectional());
    }
}
