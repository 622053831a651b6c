// Batch processing: schema reconciliation and per-relation transforms

pub mod reconcile;
pub mod transform;

pub use reconcile::reconcile_columns;
pub use transform::{RelationTransform, TransformSet};
