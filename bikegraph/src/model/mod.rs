mod bikegraph_cli_error;
pub mod elevation;
pub mod osm;
pub mod table;

pub use bikegraph_cli_error::BikegraphCliError;
