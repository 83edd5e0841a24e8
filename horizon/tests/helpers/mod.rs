// Fixtures shared by the integration tests; `use crate::helpers::*;`
#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use horizon::{Column, Table, Value};

/// Midnight UTC on the given calendar day.
pub fn day(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).single().unwrap()
}

/// `date` + `value` table over the given instants.
pub fn date_table(dates: &[DateTime<Utc>]) -> Table {
    Table::new(vec![
        Column::timestamps("date", dates.iter().copied().map(Some).collect(), None),
        Column::float64("value", (0..dates.len()).map(|i| Some(i as f64)).collect()),
    ])
    .unwrap()
}

/// One `id` per entry, each with `n` consecutive days ending at its last day.
pub fn grouped_daily(groups: &[(&str, DateTime<Utc>)], n: usize) -> Table {
    let mut ids = Vec::new();
    let mut dates = Vec::new();
    let mut values = Vec::new();
    for (id, last) in groups {
        for k in (0..n).rev() {
            ids.push(Some(*id));
            dates.push(Some(*last - Duration::days(k as i64)));
            values.push(Some(k as f64));
        }
    }
    Table::new(vec![
        Column::utf8("id", ids),
        Column::timestamps("date", dates, None),
        Column::float64("value", values),
    ])
    .unwrap()
}

/// Non-null instants of a timestamp column, in row order.
pub fn timestamps(table: &Table, column: &str) -> Vec<DateTime<Utc>> {
    table
        .try_column(column)
        .unwrap()
        .timestamp_series(None)
        .unwrap()
        .into_instants()
}

/// `(id, date)` pairs of a grouped result, in row order.
pub fn id_date_rows(table: &Table) -> Vec<(String, DateTime<Utc>)> {
    (0..table.height())
        .map(|row| {
            let Value::Utf8(id) = table.value(row, "id") else {
                panic!("row {row} has no id");
            };
            let Value::Timestamp(ts) = table.value(row, "date") else {
                panic!("row {row} has no date");
            };
            (id, ts)
        })
        .collect()
}
