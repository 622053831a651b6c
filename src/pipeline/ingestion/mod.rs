// Batch ingestion: locating archives and loading their single table

pub mod loader;
pub mod locator;

pub use loader::{load_batch, read_table, LoadOutcome};
pub use locator::locate_batches;
