use super::columns::{apply_rules, ColumnRule, CAMPAIGN_COLUMNS};
use super::RelationTransform;
use crate::constants::{self, DAY, LAST_CONTACT_DATE, MONTH};
use crate::types::{RelationKind, Table, Value};
use tracing::debug;

/// Campaign interaction facts, with `day`/`month` folded into `last_contact_date`
pub struct CampaignTransform {
    calendar_year: i32,
}

impl CampaignTransform {
    pub fn new(calendar_year: i32) -> Self {
        Self { calendar_year }
    }
}

impl RelationTransform for CampaignTransform {
    fn kind(&self) -> RelationKind {
        RelationKind::Campaign
    }

    fn columns(&self) -> &'static [ColumnRule] {
        CAMPAIGN_COLUMNS
    }

    fn transform(&self, batch: &Table) -> Option<Table> {
        let mut out = apply_rules(batch, self.columns())?;
        derive_contact_date(&mut out, self.calendar_year);
        Some(out)
    }
}

/// Append `last_contact_date` and drop `day`/`month`.
///
/// Only runs when both source columns are present; with one of them missing the table is
/// left exactly as it is.
pub fn derive_contact_date(table: &mut Table, year: i32) {
    let (Some(day_idx), Some(month_idx)) = (table.column_index(DAY), table.column_index(MONTH))
    else {
        return;
    };

    let dates: Vec<Value> = table
        .rows()
        .iter()
        .map(|row| match contact_date(year, &row[day_idx], &row[month_idx]) {
            Some(date) => Value::Text(date),
            None => {
                debug!(
                    "No contact date for day={:?} month={:?}",
                    row[day_idx], row[month_idx]
                );
                Value::Null
            }
        })
        .collect();

    table.push_column(LAST_CONTACT_DATE, dates);
    table.drop_columns(&[DAY, MONTH]);
}

/// `YYYY-MM-DD` text from a day-of-month cell and a three-letter month cell.
///
/// The day is zero-padded as written and never checked against the month, so `30`/`feb`
/// gives `2022-02-30`. `None` only for an unknown month or an absent day.
pub fn contact_date(year: i32, day: &Value, month: &Value) -> Option<String> {
    let month = constants::month_number(month.as_text()?.trim())?;
    let day = match day {
        Value::Null => return None,
        Value::Float(d) if d.fract() == 0.0 => (*d as i64).to_string(),
        Value::Text(s) if s.trim().is_empty() => return None,
        Value::Text(s) => s.trim().to_string(),
        other => other.render(),
    };
    Some(format!("{year}-{month:02}-{day:0>2}"))
}
