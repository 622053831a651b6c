use crate::constants::COLUMN_ALIASES;
use crate::metrics::IngestionMetrics;
use crate::types::Table;
use tracing::debug;

/// Rename known alternate spellings to their canonical column names.
///
/// A rename only happens when the canonical column is not already present; an existing
/// canonical column always wins and the alias is left untouched. Returns the
/// `(alias, canonical)` pairs that were applied.
pub fn reconcile_columns(table: &mut Table) -> Vec<(&'static str, &'static str)> {
    let mut applied = Vec::new();
    for &(alias, canonical) in COLUMN_ALIASES {
        if table.has_column(canonical) {
            continue;
        }
        if table.rename_column(alias, canonical) {
            debug!("Renamed column '{}' to '{}'", alias, canonical);
            applied.push((alias, canonical));
        }
    }
    if !applied.is_empty() {
        IngestionMetrics::record_columns_renamed(applied.len());
    }
    applied
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Value;

    fn table(columns: &[&str], row: Vec<Value>) -> Table {
        Table::from_rows(columns.iter().map(|c| c.to_string()).collect(), vec![row])
    }

    #[test]
    fn test_aliases_are_renamed_when_canonical_absent() {
        let mut t = table(
            &["client_id", "previous_campaing_contacts", "const_price_idx", "euribor3m"],
            vec![Value::Int(1), Value::Int(0), Value::Float(93.2), Value::Float(4.857)],
        );

        let applied = reconcile_columns(&mut t);

        assert_eq!(applied.len(), 3);
        assert_eq!(
            t.columns(),
            &[
                "client_id".to_string(),
                "previous_campaign_contacts".to_string(),
                "cons_price_idx".to_string(),
                "euribor_three_months".to_string(),
            ]
        );
        assert_eq!(t.get(0, "cons_price_idx"), Some(&Value::Float(93.2)));
    }

    #[test]
    fn test_existing_canonical_column_is_never_overwritten() {
        let mut t = table(
            &["client_id", "const_price_idx", "cons_price_idx"],
            vec![Value::Int(1), Value::Float(1.5), Value::Float(93.994)],
        );

        let applied = reconcile_columns(&mut t);

        assert!(applied.is_empty());
        assert_eq!(t.get(0, "cons_price_idx"), Some(&Value::Float(93.994)));
        assert!(t.has_column("const_price_idx"));
    }

    #[test]
    fn test_no_aliases_is_a_no_op() {
        let mut t = table(&["client_id"], vec![Value::Int(1)]);
        assert!(reconcile_columns(&mut t).is_empty());
        assert_eq!(t.columns(), &["client_id".to_string()]);
    }
}
