pub mod completeness;
pub mod journey;
