use super::columns::{ColumnRule, ECONOMICS_COLUMNS};
use super::RelationTransform;
use crate::types::RelationKind;

/// Macroeconomic indicators per client; values pass through unchanged
pub struct EconomicsTransform;

impl RelationTransform for EconomicsTransform {
    fn kind(&self) -> RelationKind {
        RelationKind::Economics
    }

    fn columns(&self) -> &'static [ColumnRule] {
        ECONOMICS_COLUMNS
    }
}
