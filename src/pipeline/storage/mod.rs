// Relation storage: cross-batch accumulation and flat-file output

pub mod accumulator;
pub mod csv_writer;

pub use accumulator::{AggregatedRelation, Accumulators, RelationAccumulator};
pub use csv_writer::{write_relation, write_table};
