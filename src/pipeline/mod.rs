// Batch cleaning pipeline: ingestion, processing, and storage

pub mod ingestion;
pub mod processing;
pub mod storage;
#[allow(clippy::module_inception)]
pub mod pipeline;

pub use pipeline::{Pipeline, PipelineResult, RelationSummary};
