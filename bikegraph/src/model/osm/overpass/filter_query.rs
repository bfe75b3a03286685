use crate::model::osm::graph::OsmTags;
use itertools::Itertools;
use regex::Regex;
use serde::{de::Visitor, Deserialize, Deserializer, Serialize};
use std::{
    fmt::{self, Display},
    str::FromStr,
};

use super::FilterOp;

#[derive(Debug, Clone)]
/// represents a single fragment of an overpass API filter query
/// see <https://wiki.openstreetmap.org/wiki/Overpass_API/Language_Guide#Tag_request_clauses_(or_%22tag_filters%22)>
pub struct FilterQuery {
    /// the key in the tag's key/value pair to match against
    tag: String,
    /// operation/predicate used on this query
    op: FilterOp,
    /// the values we are expecting. if empty, then simply
    /// any value set at this tag returns true (used to represent
    /// existential queries such as `["highway"]`).
    values: Vec<String>,
    /// compiled alternation of `values` for the regex predicates
    pattern: Option<Regex>,
}

impl FilterQuery {
    const QUERY_REGEX: &str = r#"\["([\w:*]+)"(?:(=|!=|~|!~)"([^"]*)")?\]"#;

    pub fn new(tag: &str, op: FilterOp, values: &[&str]) -> Result<FilterQuery, String> {
        let values = values.iter().map(|v| String::from(*v)).collect_vec();
        let pattern = match op {
            FilterOp::Matches | FilterOp::NotMatches => {
                let re = Regex::new(&values.join("|"))
                    .map_err(|e| format!("invalid overpass regex for tag '{tag}': {e}"))?;
                Some(re)
            }
            _ => None,
        };
        Ok(FilterQuery {
            tag: String::from(tag),
            op,
            values,
            pattern,
        })
    }

    /// builds an existential query `["tag"]`
    pub fn exists(tag: &str) -> FilterQuery {
        FilterQuery {
            tag: String::from(tag),
            op: FilterOp::Exists,
            values: vec![],
            pattern: None,
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn op(&self) -> FilterOp {
        self.op
    }

    /// tests a set of element tags against this query using overpass semantics:
    /// negated predicates accept elements that do not carry the tag at all.
    pub fn filter(&self, tags: &OsmTags) -> bool {
        match tags.get(&self.tag) {
            None => self.op.accepts_missing_tag(),
            Some(value) => match self.op {
                FilterOp::Exists => true,
                FilterOp::Equals => self.values.iter().any(|v| v == value),
                FilterOp::NotEquals => !self.values.iter().any(|v| v == value),
                FilterOp::Matches => self.is_match(value),
                FilterOp::NotMatches => !self.is_match(value),
            },
        }
    }

    fn is_match(&self, value: &str) -> bool {
        match &self.pattern {
            Some(re) => re.is_match(value),
            None => false,
        }
    }

    /// parses a chain of tag request clauses such as
    /// `["highway"]["area"!~"yes"]` into its individual queries.
    pub fn parse_chain(s: &str) -> Result<Vec<FilterQuery>, String> {
        let re = Regex::new(Self::QUERY_REGEX)
            .map_err(|e| format!("internal error building overpass query regex: {e}"))?;
        let queries = re
            .captures_iter(s)
            .map(|groups| Self::from_captures(&groups))
            .collect::<Result<Vec<_>, _>>()?;
        if queries.is_empty() {
            return Err(format!("unable to parse overpass query: '{s}'"));
        }
        Ok(queries)
    }

    fn from_captures(groups: &regex::Captures<'_>) -> Result<FilterQuery, String> {
        let tag = &groups[1];
        match (groups.get(2), groups.get(3)) {
            (Some(op), Some(values)) => {
                let op = FilterOp::from_str(op.as_str())?;
                let values = match op {
                    FilterOp::Matches | FilterOp::NotMatches => values.as_str().split('|').collect_vec(),
                    _ => vec![values.as_str()],
                };
                FilterQuery::new(tag, op, &values)
            }
            _ => Ok(FilterQuery::exists(tag)),
        }
    }
}

impl PartialEq for FilterQuery {
    fn eq(&self, other: &Self) -> bool {
        self.tag == other.tag && self.op == other.op && self.values == other.values
    }
}

impl Display for FilterQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.op {
            FilterOp::Exists => write!(f, "[\"{}\"]", self.tag),
            op => write!(f, "[\"{}\"{}\"{}\"]", self.tag, op, self.values.join("|")),
        }
    }
}

impl FromStr for FilterQuery {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match &FilterQuery::parse_chain(s)?[..] {
            [query] => Ok(query.clone()),
            queries => Err(format!(
                "expected a single overpass tag clause, found {} in '{s}'",
                queries.len()
            )),
        }
    }
}

struct OverpassFilterQueryVisitor;

impl Visitor<'_> for OverpassFilterQueryVisitor {
    type Value = FilterQuery;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a valid overpass filter query. see https://wiki.openstreetmap.org/wiki/Overpass_API/Language_Guide#Tag_request_clauses_(or_%22tag_filters%22).")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        FilterQuery::from_str(v).map_err(serde::de::Error::custom)
    }
}

impl<'de> Deserialize<'de> for FilterQuery {
    fn deserialize<D>(deserializer: D) -> Result<FilterQuery, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_str(OverpassFilterQueryVisitor)
    }
}

impl Serialize for FilterQuery {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}
