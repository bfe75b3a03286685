mod pipeline;
mod tag_allowlist;

pub use pipeline::PipelineConfiguration;
pub use tag_allowlist::TagAllowlist;
