use crate::model::{
    elevation::{ElevationError, ElevationSource, RasterMosaic},
    osm::{
        graph::{EdgeGrade, OsmGraph, OsmNodeId},
        OsmError,
    },
};
use geo::{BoundingRect, Intersects, MultiPoint, Rect};
use itertools::Itertools;
use kdam::tqdm;
use rayon::prelude::*;
use std::path::Path;

/// samples the elevation at every node of the graph from the provided
/// rasters, setting each node's `elevation`. nodes outside the rasters'
/// coverage, or on no-data pixels, receive None.
///
/// # Returns
///
/// the number of nodes without an elevation
pub fn add_node_elevations_raster<P: AsRef<Path>>(
    graph: &mut OsmGraph,
    filepaths: &[P],
    parallelize: bool,
) -> Result<usize, ElevationError> {
    let mosaic = RasterMosaic::open(filepaths)?;
    Ok(add_node_elevations(graph, &mosaic, parallelize))
}

/// samples the elevation at every node of the graph from an elevation source.
/// returns the number of nodes without an elevation.
pub fn add_node_elevations(
    graph: &mut OsmGraph,
    source: &dyn ElevationSource,
    parallelize: bool,
) -> usize {
    if !covers_graph(graph, &source.bounds()) {
        log::warn!("graph extent lies partly or wholly outside elevation coverage");
    }
    let coords = graph
        .nodes_iter()
        .map(|n| (n.osmid, n.get_coord()))
        .collect_vec();
    let elevations: Vec<(OsmNodeId, Option<f64>)> = if parallelize {
        coords
            .into_par_iter()
            .map(|(id, coord)| (id, source.sample(coord)))
            .collect()
    } else {
        tqdm!(
            coords.into_iter(),
            desc = "sample node elevations",
            total = graph.n_nodes()
        )
        .map(|(id, coord)| (id, source.sample(coord)))
        .collect()
    };

    let mut n_missing = 0;
    for (node, (id, elevation)) in graph.nodes_iter_mut().zip(elevations) {
        debug_assert_eq!(node.osmid, id);
        if elevation.is_none() {
            n_missing += 1;
        }
        node.elevation = elevation;
    }
    if n_missing > 0 {
        log::warn!("{n_missing} nodes are outside raster coverage or on no-data pixels");
    }
    n_missing
}

/// true when the bounding box of the graph's nodes lies within `bounds`.
/// an empty graph is covered.
pub fn covers_graph(graph: &OsmGraph, bounds: &Rect<f64>) -> bool {
    let points: MultiPoint<f64> = graph.nodes_iter().map(|n| n.get_point()).collect();
    match points.bounding_rect() {
        Some(extent) => {
            let (min, max) = (extent.min(), extent.max());
            bounds.intersects(&min) && bounds.intersects(&max)
        }
        None => true,
    }
}

/// sets `grade` and `grade_abs` on every edge from the elevations of its
/// endpoints: rise over length, rounded to 3 decimal places. edges with a
/// zero length or an endpoint lacking elevation get no grade values.
pub fn add_edge_grades(graph: &mut OsmGraph) -> Result<(), OsmError> {
    let mut grades = vec![];
    for (u, v, _, edge) in graph.edge_iter() {
        let z_u = graph.get_node_data(&u)?.elevation;
        let z_v = graph.get_node_data(&v)?.elevation;
        let grade = match (z_u, z_v) {
            (Some(z_u), Some(z_v)) if edge.length > 0.0 => {
                Some(((z_v - z_u) / edge.length * 1000.0).round() / 1000.0)
            }
            _ => None,
        };
        grades.push(EdgeGrade {
            grade,
            grade_abs: grade.map(f64::abs),
        });
    }
    for ((_, _, _, edge), grade) in graph.edge_iter_mut().zip(grades) {
        edge.grade = Some(grade);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{add_edge_grades, add_node_elevations, add_node_elevations_raster, covers_graph};
    use crate::model::{
        elevation::{test_raster, ElevationSource},
        osm::graph::{OsmEdgeData, OsmGraph, OsmNodeData, OsmNodeId, OsmTags, OsmWayData, OsmWayId},
    };
    use crate::config::TagAllowlist;
    use geo::{Coord, Rect};

    /// a plane rising 1 m per 0.001 degrees of longitude
    struct Slope;

    impl ElevationSource for Slope {
        fn sample(&self, coord: Coord<f64>) -> Option<f64> {
            if coord.x < 0.0 {
                None
            } else {
                Some(coord.x * 1000.0)
            }
        }

        fn bounds(&self) -> Rect<f64> {
            Rect::new((0.0, -90.0), (180.0, 90.0))
        }
    }

    fn graph(points: &[(i64, f64, f64)], edges: &[(i64, i64, f64)]) -> OsmGraph {
        let mut g = OsmGraph::empty();
        for (id, x, y) in points.iter() {
            g.insert_node(OsmNodeData::new(
                OsmNodeId(*id),
                *x,
                *y,
                &OsmTags::new(),
                &TagAllowlist::node_defaults(),
            ));
        }
        let way = OsmWayData::new(OsmWayId(1), &[], &OsmTags::new(), &TagAllowlist::way_defaults(), false);
        for (u, v, length) in edges.iter() {
            let mut edge = OsmEdgeData::from_way(&way, false);
            edge.length = *length;
            g.add_edge(&OsmNodeId(*u), &OsmNodeId(*v), edge)
                .unwrap_or_else(|e| panic!("{e}"));
        }
        g
    }

    #[test]
    fn nodes_outside_coverage_get_no_data() {
        let mut g = graph(&[(1, 0.1, 0.0), (2, -0.1, 0.0)], &[]);
        for parallelize in [true, false] {
            let missing = add_node_elevations(&mut g, &Slope, parallelize);
            assert_eq!(missing, 1);
            let n1 = g.get_node_data(&OsmNodeId(1)).unwrap_or_else(|e| panic!("{e}"));
            assert_eq!(n1.elevation, Some(100.0));
            let n2 = g.get_node_data(&OsmNodeId(2)).unwrap_or_else(|e| panic!("{e}"));
            assert_eq!(n2.elevation, None);
        }
    }

    #[test]
    fn sample_from_geotiff() {
        let file = test_raster::write_sloped_raster();
        let c = test_raster::pixel_center(2, 1);
        let mut g = graph(&[(1, c.x, c.y), (2, 0.0, 0.0)], &[]);
        let missing =
            add_node_elevations_raster(&mut g, &[file.path()], true).unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(missing, 1);
        let n1 = g.get_node_data(&OsmNodeId(1)).unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(n1.elevation, Some(test_raster::elevation_at(2, 1)));
    }

    #[test]
    fn missing_raster_fails() {
        let mut g = graph(&[(1, 0.0, 0.0)], &[]);
        assert!(add_node_elevations_raster(&mut g, &["no_such_raster.tif"], false).is_err());
    }

    #[test]
    fn grades_are_rounded_and_signed() {
        let mut g = graph(
            &[(1, 0.1, 0.0), (2, 0.1033, 0.0), (3, -0.1, 0.0)],
            &[(1, 2, 1000.0), (2, 1, 1000.0), (1, 1, 0.0), (1, 3, 50.0)],
        );
        add_node_elevations(&mut g, &Slope, false);
        add_edge_grades(&mut g).unwrap_or_else(|e| panic!("{e}"));
        let grade = |u: i64, v: i64| {
            g.get_edges(&OsmNodeId(u), &OsmNodeId(v))
                .and_then(|e| e[0].grade)
                .unwrap_or_else(|| panic!("no grade on ({u}, {v})"))
        };
        // 3.3 m over 1000 m
        assert_eq!(grade(1, 2).grade, Some(0.003));
        assert_eq!(grade(2, 1).grade, Some(-0.003));
        assert_eq!(grade(2, 1).grade_abs, Some(0.003));
        // zero length and missing elevation
        assert_eq!(grade(1, 1).grade, None);
        assert_eq!(grade(1, 3).grade_abs, None);
    }

    #[test]
    fn coverage_of_graph_extent() {
        let file = test_raster::write_sloped_raster();
        let raster = crate::model::elevation::GeoTiffRaster::open(file.path())
            .unwrap_or_else(|e| panic!("{e}"));
        let inside = test_raster::pixel_center(1, 1);
        let also_inside = test_raster::pixel_center(6, 4);
        let g = graph(&[(1, inside.x, inside.y), (2, also_inside.x, also_inside.y)], &[]);
        assert!(covers_graph(&g, &raster.bounds()));
        let g = graph(&[(1, inside.x, inside.y), (2, 0.0, 0.0)], &[]);
        assert!(!covers_graph(&g, &raster.bounds()));
        assert!(covers_graph(&OsmGraph::empty(), &raster.bounds()));
    }
}
