use super::columns::{ColumnRule, CLIENT_COLUMNS};
use super::RelationTransform;
use crate::types::RelationKind;

/// Client demographics: id, age, job, marital status, education and the two credit flags
pub struct ClientTransform;

impl RelationTransform for ClientTransform {
    fn kind(&self) -> RelationKind {
        RelationKind::Client
    }

    fn columns(&self) -> &'static [ColumnRule] {
        CLIENT_COLUMNS
    }
}
