//! Splits bank marketing campaign archives into normalized client, campaign and
//! economics tables.

pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod pipeline;
pub mod types;

pub use config::Config;
pub use error::{CleanerError, Result};
pub use pipeline::{Pipeline, PipelineResult};
pub use types::{RelationKind, Table, Value};
