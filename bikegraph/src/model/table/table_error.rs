use crate::model::osm::OsmError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TableError {
    #[error("columns not found in table: [{}]", .0.join(", "))]
    MissingColumns(Vec<String>),
    #[error("failure reading graph: {source}")]
    GraphError {
        #[from]
        source: OsmError,
    },
    #[error("failure writing CSV: {source}")]
    CsvError {
        #[from]
        source: csv::Error,
    },
}
