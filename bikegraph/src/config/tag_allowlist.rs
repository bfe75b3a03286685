use crate::model::osm::graph::OsmTags;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt::Display};

/// the set of OSM tag keys retained as graph attributes when building the graph.
/// order is preserved and used as the column order of tabular outputs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagAllowlist(Vec<String>);

impl TagAllowlist {
    /// default way tags retained by osmnx (`settings.useful_tags_way`)
    pub const WAY_DEFAULTS: [&'static str; 15] = [
        "bridge",
        "tunnel",
        "oneway",
        "lanes",
        "ref",
        "name",
        "highway",
        "maxspeed",
        "service",
        "access",
        "area",
        "landuse",
        "width",
        "est_width",
        "junction",
    ];

    /// default node tags retained by osmnx (`settings.useful_tags_node`)
    pub const NODE_DEFAULTS: [&'static str; 2] = ["ref", "highway"];

    pub fn new(tags: &[&str]) -> TagAllowlist {
        let mut out = TagAllowlist(vec![]);
        out.extend(tags.iter().map(|t| String::from(*t)));
        out
    }

    pub fn way_defaults() -> TagAllowlist {
        TagAllowlist::new(&Self::WAY_DEFAULTS)
    }

    pub fn node_defaults() -> TagAllowlist {
        TagAllowlist::new(&Self::NODE_DEFAULTS)
    }

    /// appends tags not yet present, keeping the original order.
    pub fn extend<I: IntoIterator<Item = String>>(&mut self, tags: I) {
        for tag in tags.into_iter() {
            if !self.0.contains(&tag) {
                self.0.push(tag);
            }
        }
    }

    /// returns a copy of this allowlist extended with additional tags.
    pub fn extended_with(&self, tags: &[String]) -> TagAllowlist {
        let mut out = self.clone();
        out.extend(tags.iter().cloned());
        out
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.0.iter().any(|t| t == tag)
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// keeps the allowlisted entries of a raw tag set, with values trimmed.
    pub fn retain(&self, tags: &OsmTags) -> BTreeMap<String, String> {
        tags.iter()
            .filter(|(k, _)| self.contains(k))
            .map(|(k, v)| (k.clone(), String::from(v.trim())))
            .collect()
    }
}

impl Default for TagAllowlist {
    fn default() -> Self {
        TagAllowlist::way_defaults()
    }
}

impl Display for TagAllowlist {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.0.iter().join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::TagAllowlist;
    use crate::model::osm::graph::OsmTags;

    #[test]
    fn extension_appends_without_duplicates() {
        let allowlist = TagAllowlist::way_defaults().extended_with(&[
            String::from("surface"),
            String::from("cycleway"),
            String::from("highway"),
        ]);
        assert_eq!(allowlist.len(), TagAllowlist::WAY_DEFAULTS.len() + 2);
        let tail = allowlist.iter().skip(15).cloned().collect::<Vec<_>>();
        assert_eq!(tail, vec![String::from("surface"), String::from("cycleway")]);
    }

    #[test]
    fn retain_filters_and_trims() {
        let tags: OsmTags = [
            ("highway", " residential "),
            ("surface", "asphalt"),
            ("source", "survey"),
        ]
        .iter()
        .map(|(k, v)| (String::from(*k), String::from(*v)))
        .collect();
        let retained = TagAllowlist::way_defaults().retain(&tags);
        assert_eq!(retained.len(), 1);
        assert_eq!(retained.get("highway").map(String::as_str), Some("residential"));

        let extended = TagAllowlist::way_defaults().extended_with(&[String::from("surface")]);
        assert_eq!(extended.retain(&tags).len(), 2);
    }
}
