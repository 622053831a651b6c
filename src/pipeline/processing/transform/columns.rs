//! Declarative column tables for the three output relations.
//!
//! Each relation lists its canonical columns in output order together with the recode
//! applied to that column's cells. Selection is always "listed and present": a listed
//! column missing from a batch is skipped for that batch.

use crate::constants::*;
use crate::types::{Table, Value};

/// Cell-level recode applied to one column
pub type Recode = fn(&Value) -> Value;

#[derive(Clone, Copy)]
pub struct ColumnRule {
    pub name: &'static str,
    pub recode: Option<Recode>,
}

const fn keep(name: &'static str) -> ColumnRule {
    ColumnRule { name, recode: None }
}

const fn recode(name: &'static str, f: Recode) -> ColumnRule {
    ColumnRule {
        name,
        recode: Some(f),
    }
}

pub const CLIENT_COLUMNS: &[ColumnRule] = &[
    keep(CLIENT_ID),
    keep(AGE),
    recode(JOB, clean_job),
    keep(MARITAL),
    recode(EDUCATION, clean_education),
    recode(CREDIT_DEFAULT, yes_flag),
    recode(MORTGAGE, yes_flag),
];

// day and month are selected only to build last_contact_date and never reach the output
// when both are present
pub const CAMPAIGN_COLUMNS: &[ColumnRule] = &[
    keep(CLIENT_ID),
    keep(NUMBER_CONTACTS),
    keep(CONTACT_DURATION),
    keep(PREVIOUS_CAMPAIGN_CONTACTS),
    keep(PDAYS),
    recode(PREVIOUS_OUTCOME, success_flag),
    recode(CAMPAIGN_OUTCOME, yes_flag),
    keep(DAY),
    keep(MONTH),
];

pub const ECONOMICS_COLUMNS: &[ColumnRule] = &[
    keep(CLIENT_ID),
    keep(CONS_PRICE_IDX),
    keep(EURIBOR_THREE_MONTHS),
];

/// Select the listed columns that `batch` has and recode them.
///
/// Returns `None` when the batch has none of the listed columns.
pub fn apply_rules(batch: &Table, rules: &[ColumnRule]) -> Option<Table> {
    let names: Vec<&str> = rules.iter().map(|r| r.name).collect();
    let mut out = batch.select(&names);
    if out.width() == 0 {
        return None;
    }
    for rule in rules {
        if let Some(f) = rule.recode {
            out.map_column(rule.name, f);
        }
    }
    Some(out)
}

/// Drop every `.` and turn every `-` into `_`
pub fn clean_job(value: &Value) -> Value {
    match value {
        Value::Text(s) => Value::Text(s.replace('.', "").replace('-', "_")),
        other => other.clone(),
    }
}

/// Turn every `.` into `_`; `unknown` becomes the absent marker
pub fn clean_education(value: &Value) -> Value {
    match value {
        Value::Text(s) => {
            let cleaned = s.replace('.', "_");
            if cleaned == "unknown" {
                Value::Null
            } else {
                Value::Text(cleaned)
            }
        }
        other => other.clone(),
    }
}

/// 1 for exactly `yes`, 0 for anything else including absent values
pub fn yes_flag(value: &Value) -> Value {
    flag(value, "yes")
}

/// 1 for exactly `success`, 0 otherwise
pub fn success_flag(value: &Value) -> Value {
    flag(value, "success")
}

fn flag(value: &Value, truthy: &str) -> Value {
    Value::Int(i64::from(value.as_text() == Some(truthy)))
}
