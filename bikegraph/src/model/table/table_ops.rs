use super::{CellValue, EdgeTable, NodeTable, TableError};
use crate::{
    config::TagAllowlist,
    model::osm::graph::{EdgeGrade, OsmEdgeData, OsmGraph, TagValue},
};
use geo::{Geometry, LineString};
use itertools::Itertools;
use std::collections::BTreeSet;

/// orders attribute keys by their position in the allowlist, with keys
/// unknown to the allowlist last in alphabetical order.
fn ordered_keys(keys: BTreeSet<&String>, allowlist: &TagAllowlist) -> Vec<String> {
    let mut ordered = allowlist
        .iter()
        .filter(|k| keys.contains(k))
        .cloned()
        .collect_vec();
    for key in keys.into_iter() {
        if !allowlist.contains(key) {
            ordered.push(key.clone());
        }
    }
    ordered
}

fn tag_cell(value: Option<&TagValue>) -> CellValue {
    match value {
        None => CellValue::Missing,
        Some(TagValue::Single(s)) => CellValue::Text(s.clone()),
        Some(TagValue::List(l)) => CellValue::List(l.clone()),
    }
}

fn osmid_cell(edge: &OsmEdgeData) -> CellValue {
    match &edge.osmid[..] {
        [single] => CellValue::Int(single.0),
        many => CellValue::List(many.iter().map(|id| id.to_string()).collect_vec()),
    }
}

fn reversed_cell(edge: &OsmEdgeData) -> CellValue {
    match &edge.reversed[..] {
        [single] => CellValue::Bool(*single),
        many => CellValue::List(
            many.iter()
                .map(|r| CellValue::Bool(*r).to_string())
                .collect_vec(),
        ),
    }
}

/// flattens the edges of a graph into a table indexed by (u, v, key).
///
/// columns, in order: `osmid`, the way tags present on any edge (in allowlist
/// order), `oneway`, `reversed`, `length`, `grade` and `grade_abs` when
/// grades were computed, and `geometry`. when `fill_edge_geometry` is set,
/// edges without a geometry receive a straight line between their endpoints;
/// otherwise the geometry column is only present if some edge has one.
pub fn graph_to_edge_table(
    graph: &OsmGraph,
    allowlist: &TagAllowlist,
    fill_edge_geometry: bool,
) -> Result<EdgeTable, TableError> {
    let tag_keys = ordered_keys(
        graph.edge_iter().flat_map(|(_, _, _, e)| e.tags.keys()).collect(),
        allowlist,
    );
    let has_grades = graph.edge_iter().any(|(_, _, _, e)| e.grade.is_some());
    let has_geometry =
        fill_edge_geometry || graph.edge_iter().any(|(_, _, _, e)| e.geometry.is_some());

    let mut columns = vec![String::from("osmid")];
    columns.extend(tag_keys.iter().cloned());
    columns.extend(["oneway", "reversed", "length"].map(String::from));
    if has_grades {
        columns.extend(["grade", "grade_abs"].map(String::from));
    }
    if has_geometry {
        columns.push(String::from("geometry"));
    }
    let index_columns = ["u", "v", "key"].map(String::from).to_vec();
    let mut table = EdgeTable::new(index_columns, columns);

    for (u, v, key, edge) in graph.edge_iter() {
        let index = vec![
            CellValue::Int(u.0),
            CellValue::Int(v.0),
            CellValue::Int(key as i64),
        ];
        let mut row = vec![osmid_cell(edge)];
        row.extend(tag_keys.iter().map(|k| tag_cell(edge.tags.get(k))));
        row.push(CellValue::Bool(edge.oneway));
        row.push(reversed_cell(edge));
        row.push(CellValue::Float(edge.length));
        if has_grades {
            let grade = edge.grade.unwrap_or(EdgeGrade {
                grade: None,
                grade_abs: None,
            });
            row.push(CellValue::from_option(grade.grade));
            row.push(CellValue::from_option(grade.grade_abs));
        }
        if has_geometry {
            let geometry = match (&edge.geometry, fill_edge_geometry) {
                (Some(linestring), _) => {
                    CellValue::Geometry(Geometry::LineString(linestring.clone()))
                }
                (None, true) => {
                    let src = graph.get_node_data(&u)?.get_coord();
                    let dst = graph.get_node_data(&v)?.get_coord();
                    CellValue::Geometry(Geometry::LineString(LineString::new(vec![src, dst])))
                }
                (None, false) => CellValue::Missing,
            };
            row.push(geometry);
        }
        table.push_row(index, row);
    }
    Ok(table)
}

/// flattens the nodes of a graph into a table indexed by osmid, with
/// columns `y`, `x`, `street_count`, `elevation` (if any node has one),
/// the allowlisted node tags present on any node, and a point `geometry`.
pub fn graph_to_node_table(
    graph: &OsmGraph,
    allowlist: &TagAllowlist,
) -> Result<NodeTable, TableError> {
    let tag_keys = ordered_keys(
        graph.nodes_iter().flat_map(|n| n.tags.keys()).collect(),
        allowlist,
    );
    let has_elevation = graph.nodes_iter().any(|n| n.elevation.is_some());

    let mut columns = ["y", "x", "street_count"].map(String::from).to_vec();
    if has_elevation {
        columns.push(String::from("elevation"));
    }
    columns.extend(tag_keys.iter().cloned());
    columns.push(String::from("geometry"));
    let mut table = NodeTable::new(vec![String::from("osmid")], columns);

    for node in graph.nodes_iter() {
        let mut row = vec![
            CellValue::Float(node.y),
            CellValue::Float(node.x),
            match node.street_count {
                Some(count) => CellValue::Int(count as i64),
                None => CellValue::Missing,
            },
        ];
        if has_elevation {
            row.push(CellValue::from_option(node.elevation));
        }
        row.extend(tag_keys.iter().map(|k| match node.tags.get(k) {
            Some(v) => CellValue::Text(v.clone()),
            None => CellValue::Missing,
        }));
        row.push(CellValue::Geometry(Geometry::Point(node.get_point())));
        table.push_row(vec![CellValue::Int(node.osmid.0)], row);
    }
    Ok(table)
}
