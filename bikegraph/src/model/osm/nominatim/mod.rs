mod nominatim_client;
mod nominatim_result;

pub use nominatim_client::NominatimClient;
pub use nominatim_result::NominatimResult;
