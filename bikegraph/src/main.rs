use bikegraph::{
    app::pipeline,
    config::PipelineConfiguration,
    model::{
        osm::{NetworkType, OsmSource},
        BikegraphCliError,
    },
};
use clap::{Args, Parser, Subcommand};
use std::path::Path;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct BikegraphAppArguments {
    #[command(subcommand)]
    app: App,
}

#[derive(Subcommand)]
pub enum App {
    /// geocode a place and download its network
    Place {
        #[arg(long, default_value = "Rosemount, Kitchener, Ontario, Canada")]
        place: String,
        #[command(flatten)]
        run: RunArguments,
    },
    /// download the network within a bounding box
    Bbox {
        #[arg(long, allow_hyphen_values = true)]
        north: f64,
        #[arg(long, allow_hyphen_values = true)]
        south: f64,
        #[arg(long, allow_hyphen_values = true)]
        east: f64,
        #[arg(long, allow_hyphen_values = true)]
        west: f64,
        #[command(flatten)]
        run: RunArguments,
    },
    /// read a saved overpass JSON response
    File {
        #[arg(long, help = "path to overpass JSON response")]
        overpass_file: String,
        #[arg(long, help = "path to file containing WKT used to truncate the network")]
        extent_file: Option<String>,
        #[command(flatten)]
        run: RunArguments,
    },
}

#[derive(Args)]
pub struct RunArguments {
    #[arg(long, default_value = "srtm_20_04.tif", help = "elevation GeoTIFF, may be repeated")]
    raster_file: Vec<String>,
    #[arg(long, help = "path to file with bikegraph pipeline parameters")]
    configuration_file: Option<String>,
    #[arg(long, help = "overrides the configured network type")]
    network_type: Option<NetworkType>,
    #[arg(long, help = "compute edge grades from node elevations")]
    add_edge_grades: bool,
    #[arg(long, help = "write the full edge table as CSV")]
    edges_csv: Option<String>,
    #[arg(long, help = "write the full node table as CSV")]
    nodes_csv: Option<String>,
}

impl RunArguments {
    fn configuration(&self) -> Result<PipelineConfiguration, BikegraphCliError> {
        let mut conf = match &self.configuration_file {
            None => Ok(PipelineConfiguration::default()),
            Some(f) => {
                log::info!("reading bikegraph configuration from {f}");
                PipelineConfiguration::try_from(f)
            }
        }?;
        if let Some(network_type) = &self.network_type {
            conf.network_type = *network_type;
        }
        if self.add_edge_grades {
            conf.add_edge_grades = true;
        }
        Ok(conf)
    }

    fn run(&self, source: OsmSource) -> Result<(), BikegraphCliError> {
        let conf = self.configuration()?;
        let mut stdout = std::io::stdout().lock();
        pipeline::run_pipeline(
            &source,
            self.raster_file.as_slice(),
            &conf,
            &mut stdout,
            self.edges_csv.as_deref().map(Path::new),
            self.nodes_csv.as_deref().map(Path::new),
        )
    }
}

pub fn run(app: &App) -> Result<(), BikegraphCliError> {
    match app {
        App::Place { place, run } => run.run(OsmSource::Place {
            query: place.clone(),
        }),
        App::Bbox {
            north,
            south,
            east,
            west,
            run,
        } => run.run(OsmSource::Bbox {
            north: *north,
            south: *south,
            east: *east,
            west: *west,
        }),
        App::File {
            overpass_file,
            extent_file,
            run,
        } => run.run(OsmSource::OverpassFile {
            filepath: overpass_file.clone(),
            extent_filepath: extent_file.clone(),
        }),
    }
}

fn main() {
    env_logger::init();
    let args = BikegraphAppArguments::parse();
    match run(&args.app) {
        Ok(_) => eprintln!("finished."),
        Err(e) => {
            log::error!("bikegraph failed: {e}");
            std::process::exit(1);
        }
    }
}
