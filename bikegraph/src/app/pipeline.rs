use super::report;
use crate::{
    algorithm::elevation,
    config::PipelineConfiguration,
    model::{
        osm::{graph::OsmGraph, OsmSource},
        table::{table_ops, EdgeTable},
        BikegraphCliError,
    },
};
use itertools::Itertools;
use std::{io::Write, path::Path};

/// runs the download, elevation and conversion steps, returning the
/// annotated graph and its edge table. the progress markers `1` and `2`
/// are written to `out` ahead of the tag configuration and the fetch.
pub fn build_edge_table<P: AsRef<Path>, W: Write>(
    source: &OsmSource,
    raster_paths: &[P],
    conf: &PipelineConfiguration,
    out: &mut W,
) -> Result<(OsmGraph, EdgeTable), BikegraphCliError> {
    writeln!(out, "1")?;
    let allowlist = conf.way_tag_allowlist();
    eprintln!();
    log::info!(
        "  (((1))) retaining way tags [{}]",
        allowlist.iter().join(", ")
    );

    writeln!(out, "2")?;
    out.flush()?;
    eprintln!();
    log::info!("  (((2))) fetching '{}' network", conf.network_type);
    let mut graph = source.import(conf)?;

    eprintln!();
    log::info!(
        "  (((3))) sampling node elevations from {} raster(s)",
        raster_paths.len()
    );
    let n_missing = elevation::add_node_elevations_raster(&mut graph, raster_paths, conf.parallelize)?;
    log::info!(
        "{} of {} nodes have an elevation",
        graph.n_nodes() - n_missing,
        graph.n_nodes()
    );

    eprintln!();
    if conf.add_edge_grades {
        log::info!("  (((4))) computing edge grades");
        elevation::add_edge_grades(&mut graph)?;
    } else {
        log::info!("  (((4))) computing edge grades (skipped)");
    }

    eprintln!();
    log::info!("  (((5))) converting edges to a table");
    let edges = table_ops::graph_to_edge_table(&graph, &allowlist, conf.fill_edge_geometry)?;
    Ok((graph, edges))
}

/// runs every step and writes the report to `out`. the tables are exported
/// to CSV, when paths are given, before the report is printed.
pub fn run_pipeline<P: AsRef<Path>, W: Write>(
    source: &OsmSource,
    raster_paths: &[P],
    conf: &PipelineConfiguration,
    out: &mut W,
    edges_csv: Option<&Path>,
    nodes_csv: Option<&Path>,
) -> Result<(), BikegraphCliError> {
    let (graph, edges) = build_edge_table(source, raster_paths, conf, out)?;
    if let Some(path) = edges_csv {
        edges.write_csv(path)?;
    }
    if let Some(path) = nodes_csv {
        let nodes = table_ops::graph_to_node_table(&graph, &conf.useful_tags_node)?;
        nodes.write_csv(path)?;
    }
    report::write_report(&edges, &conf.report_columns, conf.report_rows, out)
}
