use super::{elevation::ElevationError, osm::OsmError, table::TableError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BikegraphCliError {
    #[error("failure reading run configuration: {0}")]
    ConfigurationError(String),
    #[error("failure building network: {source}")]
    OsmError {
        #[from]
        source: OsmError,
    },
    #[error("failure sampling elevation: {source}")]
    ElevationError {
        #[from]
        source: ElevationError,
    },
    #[error("failure building report: {source}")]
    TableError {
        #[from]
        source: TableError,
    },
    #[error("failure writing output: {source}")]
    StdIoError {
        #[from]
        source: std::io::Error,
    },
}
