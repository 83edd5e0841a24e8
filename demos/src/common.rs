use chrono::{Duration, TimeZone, Utc};
use horizon::{Column, HorizonError, Table};

/// `stores` stores with `days` daily observations each, ending on staggered dates.
///
/// # Errors
/// Returns `HorizonError::InvalidArg` if the fixed end date cannot be built.
pub fn sales_table(stores: i64, days: i64) -> Result<Table, HorizonError> {
    let end = Utc
        .with_ymd_and_hms(2024, 6, 30, 0, 0, 0)
        .single()
        .ok_or_else(|| HorizonError::InvalidArg("invalid end date".into()))?;
    let mut store = Vec::new();
    let mut date = Vec::new();
    let mut units = Vec::new();
    for s in 0..stores {
        let last = end - Duration::days(s);
        for d in (0..days).rev() {
            store.push(Some(s));
            date.push(Some(last - Duration::days(d)));
            #[allow(clippy::cast_precision_loss)]
            units.push(Some(((s * 7 + d * 3) % 50) as f64));
        }
    }
    Table::new(vec![
        Column::int64("store", store),
        Column::timestamps("date", date, None),
        Column::float64("units", units),
    ])
}
