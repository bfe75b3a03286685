use super::TagAllowlist;
use crate::{
    algorithm::truncation::ComponentFilter,
    model::{
        osm::{graph::ElementFilter, NetworkType, OsmError},
        BikegraphCliError,
    },
};
use serde::{Deserialize, Serialize};

/// defines behaviors for a download, elevation and report run.
///
/// the way tag allowlist is carried here and handed to the graph fetch, so
/// any extension of it is in place before the network is read.
#[derive(Clone, Serialize, Deserialize, Debug)]
#[serde(default)]
pub struct PipelineConfiguration {
    pub network_type: NetworkType,
    /// overpass tag clauses such as `["highway"~"cycleway|path"]` replacing
    /// the network type filter
    pub custom_filter: Option<String>,
    /// base set of way tags retained as edge attributes
    pub useful_tags_way: TagAllowlist,
    /// additional way tags appended to `useful_tags_way` before the fetch
    pub extra_tags_way: Vec<String>,
    pub useful_tags_node: TagAllowlist,
    pub nominatim_endpoint: String,
    pub overpass_endpoint: String,
    pub user_agent: String,
    pub timeout_secs: u64,
    pub overpass_memory: Option<u64>,
    /// distance the study area is grown by before download so that edges
    /// crossing the boundary are not cut prematurely
    pub buffer_meters: f64,
    pub component_filter: ComponentFilter,
    pub truncate_by_edge: bool,
    pub simplify: bool,
    pub add_edge_grades: bool,
    pub fill_edge_geometry: bool,
    pub parallelize: bool,
    pub report_columns: Vec<String>,
    pub report_rows: usize,
}

impl Default for PipelineConfiguration {
    fn default() -> Self {
        Self {
            network_type: NetworkType::Bike,
            custom_filter: None,
            useful_tags_way: TagAllowlist::way_defaults(),
            extra_tags_way: vec![String::from("surface"), String::from("cycleway")],
            useful_tags_node: TagAllowlist::node_defaults(),
            nominatim_endpoint: String::from("https://nominatim.openstreetmap.org/"),
            overpass_endpoint: String::from("https://overpass-api.de/api/interpreter"),
            user_agent: format!("bikegraph/{}", env!("CARGO_PKG_VERSION")),
            timeout_secs: 180,
            overpass_memory: None,
            buffer_meters: 500.0,
            component_filter: ComponentFilter::Largest,
            truncate_by_edge: false,
            simplify: true,
            add_edge_grades: false,
            fill_edge_geometry: true,
            parallelize: true,
            report_columns: [
                "highway",
                "length",
                "surface",
                "cycleway",
                "maxspeed",
                "grade",
                "grade_abs",
            ]
            .iter()
            .map(|c| String::from(*c))
            .collect(),
            report_rows: 25,
        }
    }
}

impl PipelineConfiguration {
    /// the way tag allowlist in effect for the fetch: the base list
    /// extended with the extra tags.
    pub fn way_tag_allowlist(&self) -> TagAllowlist {
        self.useful_tags_way.extended_with(&self.extra_tags_way)
    }

    /// the way filter in effect: the custom filter if given, otherwise the
    /// filter of the network type.
    pub fn element_filter(&self) -> Result<ElementFilter, OsmError> {
        match &self.custom_filter {
            Some(filter) => ElementFilter::from_custom_filter(filter),
            None => ElementFilter::from_network_type(&self.network_type),
        }
    }
}

impl TryFrom<&String> for PipelineConfiguration {
    type Error = BikegraphCliError;

    fn try_from(f: &String) -> Result<Self, Self::Error> {
        if f.ends_with(".toml") {
            let s = std::fs::read_to_string(f).map_err(|e| {
                BikegraphCliError::ConfigurationError(format!("failure reading {f}: {e}"))
            })?;
            toml::from_str(&s).map_err(|e| {
                BikegraphCliError::ConfigurationError(format!("failure decoding {f}: {e}"))
            })
        } else if f.ends_with(".json") {
            let s = std::fs::read_to_string(f).map_err(|e| {
                BikegraphCliError::ConfigurationError(format!("failure reading {f}: {e}"))
            })?;
            serde_json::from_str(&s).map_err(|e| {
                BikegraphCliError::ConfigurationError(format!("failure decoding {f}: {e}"))
            })
        } else {
            Err(BikegraphCliError::ConfigurationError(format!(
                "unsupported file type: {f}"
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::PipelineConfiguration;
    use crate::{algorithm::truncation::ComponentFilter, model::osm::NetworkType};
    use std::io::Write;

    #[test]
    fn default_allowlist_carries_surface_and_cycleway() {
        let conf = PipelineConfiguration::default();
        let allowlist = conf.way_tag_allowlist();
        assert!(allowlist.contains("surface"));
        assert!(allowlist.contains("cycleway"));
        assert!(!conf.useful_tags_way.contains("surface"));
    }

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap_or_else(|e| panic!("{e}"));
        writeln!(
            file,
            "network_type = \"walk\"\nadd_edge_grades = true\nextra_tags_way = []\n\n[component_filter]\ntype = \"keep_all\""
        )
        .unwrap_or_else(|e| panic!("{e}"));
        let path = file.path().display().to_string();
        let conf = PipelineConfiguration::try_from(&path).unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(conf.network_type, NetworkType::Walk);
        assert!(conf.add_edge_grades);
        assert!(matches!(conf.component_filter, ComponentFilter::KeepAll));
        assert!(!conf.way_tag_allowlist().contains("surface"));
        assert_eq!(conf.report_rows, 25);
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let result = PipelineConfiguration::try_from(&String::from("pipeline.yaml"));
        assert!(result.is_err());
    }
}
