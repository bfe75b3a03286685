pub mod buffer;
pub mod elevation;
pub mod length;
pub mod search;
pub mod simplification;
pub mod street_count;
pub mod truncation;
