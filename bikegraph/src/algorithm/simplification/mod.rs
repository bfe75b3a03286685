mod simplified_path;
mod simplify_ops;

pub use simplified_path::SimplifiedPath;
pub use simplify_ops::{build_path, is_endpoint, simplify_graph};
