use crate::constants;
use serde::Serialize;
use std::fmt;

/// A single cell of an in-memory relation.
///
/// `Null` is the absent-value marker: it is what an empty source field loads as and what
/// recodes emit for values that must not survive (e.g. `education == "unknown"`). It is
/// distinct from `Text(String::new())`.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Int(i64),
    Float(f64),
    Text(String),
}

impl Value {
    pub fn text(s: impl Into<String>) -> Self {
        Value::Text(s.into())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Render the value the way it is written to an output file.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Int(i) => write!(f, "{i}"),
            // integral floats keep a trailing ".0" so the column still reads as decimal
            Value::Float(x) if x.is_finite() && x.fract() == 0.0 && x.abs() < 1e16 => {
                write!(f, "{x:.1}")
            }
            Value::Float(x) => write!(f, "{x}"),
            Value::Text(s) => f.write_str(s),
        }
    }
}

/// The three relations produced by a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationKind {
    Client,
    Campaign,
    Economics,
}

impl RelationKind {
    pub const ALL: [RelationKind; 3] = [
        RelationKind::Client,
        RelationKind::Campaign,
        RelationKind::Economics,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            RelationKind::Client => "client",
            RelationKind::Campaign => "campaign",
            RelationKind::Economics => "economics",
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            RelationKind::Client => constants::CLIENT_FILE,
            RelationKind::Campaign => constants::CAMPAIGN_FILE,
            RelationKind::Economics => constants::ECONOMICS_FILE,
        }
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Column-named, row-major in-memory relation.
///
/// Every row has exactly `columns.len()` cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn from_rows(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        debug_assert!(rows.iter().all(|r| r.len() == columns.len()));
        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Vec<Value>> {
        self.rows
    }

    pub fn push_row(&mut self, row: Vec<Value>) {
        debug_assert_eq!(row.len(), self.columns.len());
        self.rows.push(row);
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    pub fn get(&self, row: usize, column: &str) -> Option<&Value> {
        let idx = self.column_index(column)?;
        self.rows.get(row).map(|r| &r[idx])
    }

    pub fn column_values<'a>(&'a self, name: &str) -> Option<impl Iterator<Item = &'a Value> + 'a> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(move |r| &r[idx]))
    }

    /// Rename `from` to `to`. Returns false when `from` is absent.
    pub fn rename_column(&mut self, from: &str, to: &str) -> bool {
        match self.column_index(from) {
            Some(idx) => {
                self.columns[idx] = to.to_string();
                true
            }
            None => false,
        }
    }

    /// Project onto `names` in the given order, silently skipping names that are absent.
    pub fn select(&self, names: &[&str]) -> Table {
        let picked: Vec<(usize, &str)> = names
            .iter()
            .filter_map(|n| self.column_index(n).map(|i| (i, *n)))
            .collect();
        let columns = picked.iter().map(|(_, n)| n.to_string()).collect();
        let rows = self
            .rows
            .iter()
            .map(|r| picked.iter().map(|(i, _)| r[*i].clone()).collect())
            .collect();
        Table { columns, rows }
    }

    /// Replace every cell of `name` with `f(cell)`. Returns false when the column is absent.
    pub fn map_column<F>(&mut self, name: &str, mut f: F) -> bool
    where
        F: FnMut(&Value) -> Value,
    {
        let Some(idx) = self.column_index(name) else {
            return false;
        };
        for row in &mut self.rows {
            row[idx] = f(&row[idx]);
        }
        true
    }

    pub fn push_column(&mut self, name: &str, values: Vec<Value>) {
        debug_assert_eq!(values.len(), self.rows.len());
        self.columns.push(name.to_string());
        for (row, v) in self.rows.iter_mut().zip(values) {
            row.push(v);
        }
    }

    pub fn drop_columns(&mut self, names: &[&str]) {
        let keep: Vec<bool> = self
            .columns
            .iter()
            .map(|c| !names.contains(&c.as_str()))
            .collect();
        let mut flags = keep.iter();
        self.columns.retain(|_| *flags.next().unwrap_or(&true));
        for row in &mut self.rows {
            let mut flags = keep.iter();
            row.retain(|_| *flags.next().unwrap_or(&true));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::from_rows(
            vec!["client_id".into(), "job".into(), "age".into()],
            vec![
                vec![Value::Int(1), Value::text("admin."), Value::Int(30)],
                vec![Value::Int(2), Value::Null, Value::Int(41)],
            ],
        )
    }

    #[test]
    fn test_render_values() {
        assert_eq!(Value::Null.render(), "");
        assert_eq!(Value::Int(7).render(), "7");
        assert_eq!(Value::Float(93.994).render(), "93.994");
        assert_eq!(Value::Float(1.0).render(), "1.0");
        assert_eq!(Value::Float(-0.5).render(), "-0.5");
        assert_eq!(Value::text("blue-collar").render(), "blue-collar");
    }

    #[test]
    fn test_select_skips_missing_and_keeps_requested_order() {
        let t = sample().select(&["age", "missing", "client_id"]);
        assert_eq!(t.columns(), &["age".to_string(), "client_id".to_string()]);
        assert_eq!(t.rows()[1], vec![Value::Int(41), Value::Int(2)]);
    }

    #[test]
    fn test_select_nothing_present_yields_zero_width() {
        let t = sample().select(&["nope"]);
        assert_eq!(t.width(), 0);
        assert_eq!(t.len(), 2);
    }

    #[test]
    fn test_rename_and_drop_columns() {
        let mut t = sample();
        assert!(t.rename_column("job", "occupation"));
        assert!(!t.rename_column("job", "other"));
        t.drop_columns(&["occupation"]);
        assert_eq!(t.columns(), &["client_id".to_string(), "age".to_string()]);
        assert_eq!(t.rows()[0], vec![Value::Int(1), Value::Int(30)]);
    }

    #[test]
    fn test_map_and_push_column() {
        let mut t = sample();
        assert!(t.map_column("age", |v| match v {
            Value::Int(i) => Value::Int(i + 1),
            other => other.clone(),
        }));
        assert!(!t.map_column("absent", |v| v.clone()));
        t.push_column("flag", vec![Value::Int(0), Value::Int(1)]);
        assert_eq!(t.get(0, "age"), Some(&Value::Int(31)));
        assert_eq!(t.get(1, "flag"), Some(&Value::Int(1)));
    }

    #[test]
    fn test_relation_kind_files() {
        let files: Vec<&str> = RelationKind::ALL.iter().map(|k| k.file_name()).collect();
        assert_eq!(files, vec!["client.csv", "campaign.csv", "economics.csv"]);
    }
}
