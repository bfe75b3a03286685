use crate::model::osm::graph::OsmNodeId;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

/// selects which weakly connected components of a graph are retained.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum ComponentFilter {
    /// keep only the component with the most nodes
    #[default]
    Largest,
    /// keep the k components with the most nodes
    TopK { k: usize },
    /// keep the k components with the fewest nodes
    LeastK { k: usize },
    /// keep every component, including isolated nodes
    KeepAll,
}

impl std::fmt::Display for ComponentFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ComponentFilter::Largest => write!(f, "largest"),
            ComponentFilter::TopK { k } => write!(f, "top-{k}"),
            ComponentFilter::LeastK { k } => write!(f, "least-{k}"),
            ComponentFilter::KeepAll => write!(f, "keep all"),
        }
    }
}

impl ComponentFilter {
    /// filters the connected node components, preserving their input order.
    /// ties in size are broken by input order.
    pub fn assign_components(&self, components: Vec<Vec<OsmNodeId>>) -> Vec<Vec<OsmNodeId>> {
        use ComponentFilter as CF;
        let ranked = match self {
            CF::KeepAll => return components,
            CF::Largest => rank(&components, 1, |c| Reverse(c.len())),
            CF::TopK { k } => rank(&components, *k, |c| Reverse(c.len())),
            CF::LeastK { k } => rank(&components, *k, |c| c.len()),
        };
        components
            .into_iter()
            .enumerate()
            .filter(|(idx, _)| ranked.contains(idx))
            .map(|(_, c)| c)
            .collect_vec()
    }
}

/// indices of the first k components by the given ordering key
fn rank<K: Ord>(
    components: &[Vec<OsmNodeId>],
    k: usize,
    key: impl Fn(&Vec<OsmNodeId>) -> K,
) -> Vec<usize> {
    components
        .iter()
        .enumerate()
        .sorted_by_key(|(idx, c)| (key(c), *idx))
        .take(k)
        .map(|(idx, _)| idx)
        .collect_vec()
}
