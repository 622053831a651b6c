//! Per-relation column selection and value recoding.
//!
//! Every transform is a pure function of a reconciled batch; a batch that has none of a
//! relation's columns contributes nothing to it.

pub mod campaign;
pub mod client;
pub mod columns;
pub mod economics;

pub use campaign::CampaignTransform;
pub use client::ClientTransform;
pub use columns::ColumnRule;
pub use economics::EconomicsTransform;

use crate::types::{RelationKind, Table};
use tracing::debug;

pub trait RelationTransform {
    fn kind(&self) -> RelationKind;

    /// Canonical columns of the relation, in output order
    fn columns(&self) -> &'static [ColumnRule];

    /// Build this relation's contribution from one batch
    fn transform(&self, batch: &Table) -> Option<Table> {
        columns::apply_rules(batch, self.columns())
    }
}

/// The three relation transforms, applied in a fixed order to every batch
pub struct TransformSet {
    transforms: Vec<Box<dyn RelationTransform>>,
}

impl TransformSet {
    pub fn new(calendar_year: i32) -> Self {
        Self {
            transforms: vec![
                Box::new(ClientTransform) as Box<dyn RelationTransform>,
                Box::new(CampaignTransform::new(calendar_year)),
                Box::new(EconomicsTransform),
            ],
        }
    }

    /// Run every transform over `batch`, keeping only relations it contributed columns to.
    pub fn apply(&self, batch: &Table) -> Vec<(RelationKind, Table)> {
        self.transforms
            .iter()
            .filter_map(|t| {
                let out = t.transform(batch);
                if out.is_none() {
                    debug!("Batch has no {} columns", t.kind());
                }
                out.map(|table| (t.kind(), table))
            })
            .collect()
    }
}
