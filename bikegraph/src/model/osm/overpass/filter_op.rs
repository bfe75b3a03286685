use std::{fmt::Display, str::FromStr};

/// predicate of an overpass tag request clause.
/// see <https://wiki.openstreetmap.org/wiki/Overpass_API/Language_Guide#Tag_request_clauses_(or_%22tag_filters%22)>
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    /// `["key"]`, any value present
    Exists,
    /// `["key"="value"]`
    Equals,
    /// `["key"!="value"]`
    NotEquals,
    /// `["key"~"regex"]`
    Matches,
    /// `["key"!~"regex"]`
    NotMatches,
}

impl FilterOp {
    /// overpass treats a missing tag as passing any negated predicate.
    pub fn accepts_missing_tag(&self) -> bool {
        matches!(self, FilterOp::NotEquals | FilterOp::NotMatches)
    }
}

impl FromStr for FilterOp {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" => Ok(Self::Exists),
            "=" => Ok(Self::Equals),
            "!=" => Ok(Self::NotEquals),
            "~" => Ok(Self::Matches),
            "!~" => Ok(Self::NotMatches),
            _ => Err(format!("unknown overpass query operation '{s}'")),
        }
    }
}

impl Display for FilterOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FilterOp::Exists => write!(f, ""),
            FilterOp::Equals => write!(f, "="),
            FilterOp::NotEquals => write!(f, "!="),
            FilterOp::Matches => write!(f, "~"),
            FilterOp::NotMatches => write!(f, "!~"),
        }
    }
}
