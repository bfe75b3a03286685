use crate::model::osm::{graph::OsmGraph, OsmError};
use geo::{Haversine, Length, LineString};

/// sets the great-circle length in meters of every edge, measured along
/// its geometry if present, otherwise between its endpoints.
pub fn add_edge_lengths(graph: &mut OsmGraph) -> Result<(), OsmError> {
    let mut lengths = vec![];
    for (u, v, _, edge) in graph.edge_iter() {
        let length = match &edge.geometry {
            Some(linestring) => Haversine.length(linestring),
            None => {
                let src = graph.get_node_data(&u)?.get_coord();
                let dst = graph.get_node_data(&v)?.get_coord();
                Haversine.length(&LineString::new(vec![src, dst]))
            }
        };
        lengths.push(length);
    }
    for ((_, _, _, edge), length) in graph.edge_iter_mut().zip(lengths) {
        edge.length = length;
    }
    Ok(())
}
