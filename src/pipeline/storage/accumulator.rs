use crate::types::{RelationKind, Table, Value};
use std::collections::HashSet;
use tracing::debug;

/// Per-batch contributions to one output relation, in batch order
#[derive(Debug)]
pub struct RelationAccumulator {
    kind: RelationKind,
    parts: Vec<Table>,
}

/// A relation after concatenation and key deduplication
#[derive(Debug)]
pub struct AggregatedRelation {
    pub kind: RelationKind,
    pub table: Table,
    pub contributing_batches: usize,
    pub rows_before_dedup: usize,
    pub duplicates_dropped: usize,
}

impl RelationAccumulator {
    pub fn new(kind: RelationKind) -> Self {
        Self {
            kind,
            parts: Vec::new(),
        }
    }

    /// Append one batch's contribution; zero-width tables carry nothing and are ignored.
    pub fn push(&mut self, part: Table) {
        if part.width() > 0 {
            self.parts.push(part);
        }
    }

    /// Concatenate in arrival order and keep the first row seen for each `key`.
    pub fn finish(self, key: &str) -> AggregatedRelation {
        let contributing_batches = self.parts.len();
        let combined = concat(self.parts);
        let rows_before_dedup = combined.len();
        let (table, duplicates_dropped) = dedup_by_key(combined, key);
        debug!(
            "{}: {} rows from {} batches, {} duplicates dropped",
            self.kind, rows_before_dedup, contributing_batches, duplicates_dropped
        );
        AggregatedRelation {
            kind: self.kind,
            table,
            contributing_batches,
            rows_before_dedup,
            duplicates_dropped,
        }
    }
}

/// One accumulator per output relation, threaded through the batch loop
#[derive(Debug)]
pub struct Accumulators {
    relations: Vec<RelationAccumulator>,
}

impl Default for Accumulators {
    fn default() -> Self {
        Self::new()
    }
}

impl Accumulators {
    pub fn new() -> Self {
        Self {
            relations: RelationKind::ALL
                .iter()
                .map(|k| RelationAccumulator::new(*k))
                .collect(),
        }
    }

    pub fn push(&mut self, kind: RelationKind, part: Table) {
        if let Some(acc) = self.relations.iter_mut().find(|a| a.kind == kind) {
            acc.push(part);
        }
    }

    pub fn into_relations(self) -> Vec<RelationAccumulator> {
        self.relations
    }
}

/// Stack tables vertically over the union of their columns (first-seen order).
///
/// Cells for columns a table does not have are [`Value::Null`].
pub fn concat(parts: Vec<Table>) -> Table {
    let mut columns: Vec<String> = Vec::new();
    for part in &parts {
        for column in part.columns() {
            if !columns.contains(column) {
                columns.push(column.clone());
            }
        }
    }

    let mut combined = Table::new(columns);
    for part in parts {
        let positions: Vec<usize> = part
            .columns()
            .iter()
            .filter_map(|c| combined.column_index(c))
            .collect();
        for row in part.into_rows() {
            let mut out = vec![Value::Null; combined.width()];
            for (pos, value) in positions.iter().zip(row) {
                out[*pos] = value;
            }
            combined.push_row(out);
        }
    }
    combined
}

/// Keep the first row for every distinct rendered `key` value, preserving row order.
///
/// Rows without a key value (or tables without the key column) pass through untouched.
/// Returns the table and the number of rows dropped.
pub fn dedup_by_key(table: Table, key: &str) -> (Table, usize) {
    let Some(key_idx) = table.column_index(key) else {
        return (table, 0);
    };
    let mut seen: HashSet<String> = HashSet::new();
    let mut kept = Table::new(table.columns().to_vec());
    let mut dropped = 0usize;

    for row in table.into_rows() {
        let is_new = match &row[key_idx] {
            Value::Null => true,
            value => seen.insert(value.render()),
        };
        if is_new {
            kept.push_row(row);
        } else {
            dropped += 1;
        }
    }
    (kept, dropped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::CLIENT_ID;

    fn part(columns: &[&str], rows: Vec<Vec<Value>>) -> Table {
        Table::from_rows(columns.iter().map(|c| c.to_string()).collect(), rows)
    }

    #[test]
    fn test_concat_unions_columns_in_first_seen_order() {
        let a = part(&["client_id", "age"], vec![vec![Value::Int(1), Value::Int(30)]]);
        let b = part(
            &["job", "client_id"],
            vec![vec![Value::text("admin"), Value::Int(2)]],
        );

        let t = concat(vec![a, b]);

        assert_eq!(
            t.columns(),
            &["client_id".to_string(), "age".to_string(), "job".to_string()]
        );
        assert_eq!(t.rows()[0], vec![Value::Int(1), Value::Int(30), Value::Null]);
        assert_eq!(t.rows()[1], vec![Value::Int(2), Value::Null, Value::text("admin")]);
    }

    #[test]
    fn test_dedup_keeps_first_occurrence() {
        let t = part(
            &["client_id", "job"],
            vec![
                vec![Value::Int(1), Value::text("a")],
                vec![Value::Int(2), Value::text("b")],
                vec![Value::Int(2), Value::text("c")],
                vec![Value::Int(3), Value::text("d")],
                vec![Value::Int(1), Value::text("e")],
            ],
        );

        let (kept, dropped) = dedup_by_key(t, CLIENT_ID);

        assert_eq!(dropped, 2);
        let jobs: Vec<&Value> = kept.column_values("job").unwrap().collect();
        assert_eq!(
            jobs,
            vec![&Value::text("a"), &Value::text("b"), &Value::text("d")]
        );
    }

    #[test]
    fn test_dedup_matches_keys_across_types() {
        let t = part(
            &["client_id"],
            vec![vec![Value::Int(2)], vec![Value::text("2")], vec![Value::Null], vec![Value::Null]],
        );
        let (kept, dropped) = dedup_by_key(t, CLIENT_ID);
        assert_eq!(
            kept.rows(),
            &[vec![Value::Int(2)], vec![Value::Null], vec![Value::Null]]
        );
        assert_eq!(dropped, 1);
    }

    #[test]
    fn test_dedup_without_key_column_keeps_every_row() {
        let t = part(
            &["age", "job"],
            vec![
                vec![Value::Int(30), Value::text("admin")],
                vec![Value::Int(41), Value::text("services")],
                vec![Value::Int(50), Value::text("retired")],
            ],
        );

        let (kept, dropped) = dedup_by_key(t, CLIENT_ID);

        assert_eq!(dropped, 0);
        let ages: Vec<&Value> = kept.column_values("age").unwrap().collect();
        assert_eq!(ages, vec![&Value::Int(30), &Value::Int(41), &Value::Int(50)]);
    }

    #[test]
    fn test_accumulator_ignores_zero_width_parts() {
        let mut acc = RelationAccumulator::new(RelationKind::Economics);
        acc.push(Table::new(Vec::new()));
        acc.push(part(&["client_id"], vec![vec![Value::Int(1)], vec![Value::Int(1)]]));

        let agg = acc.finish(CLIENT_ID);
        assert_eq!(agg.contributing_batches, 1);
        assert_eq!(agg.rows_before_dedup, 2);
        assert_eq!(agg.duplicates_dropped, 1);
        assert_eq!(agg.table.len(), 1);
    }

    #[test]
    fn test_accumulators_route_by_kind() {
        let mut accs = Accumulators::new();
        accs.push(RelationKind::Campaign, part(&["client_id"], vec![vec![Value::Int(1)]]));

        let finished: Vec<AggregatedRelation> = accs
            .into_relations()
            .into_iter()
            .map(|acc| acc.finish(CLIENT_ID))
            .collect();
        assert_eq!(finished.len(), 3);
        for agg in finished {
            let expected = if agg.kind == RelationKind::Campaign { 1 } else { 0 };
            assert_eq!(agg.table.len(), expected, "{}", agg.kind);
        }
    }
}
