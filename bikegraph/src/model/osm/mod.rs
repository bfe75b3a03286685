pub mod graph;
mod http_ops;
pub mod import_ops;
pub mod network_type;
pub mod nominatim;
mod osm_error;
mod osm_source;
pub mod overpass;

pub use network_type::NetworkType;
pub use osm_error::OsmError;
pub use osm_source::OsmSource;
