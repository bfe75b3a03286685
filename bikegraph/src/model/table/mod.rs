mod cell_value;
mod table;
mod table_error;
pub mod table_ops;

pub use cell_value::CellValue;
pub use table::Table;
pub use table_error::TableError;

/// one row per edge, indexed by (u, v, key)
pub type EdgeTable = Table;
/// one row per node, indexed by osmid
pub type NodeTable = Table;
