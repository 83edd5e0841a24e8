use horizon_core::{Column, ColumnData, Group, GroupedTable, HorizonError, Table, TimestampSeries};

/// Future rows of one group: the date column followed by the key columns,
/// each key broadcast over every new row with its source type.
pub(crate) fn group_batch(
    grouped: &GroupedTable,
    group: &Group,
    date_column: &str,
    future: TimestampSeries,
) -> Result<Table, HorizonError> {
    let len = future.len();
    let mut columns = Vec::with_capacity(grouped.keys().len() + 1);
    columns.push(Column::from_series(date_column, future));
    for (name, value) in grouped.keys().iter().zip(group.key.values()) {
        let dtype = grouped.table().try_column(name)?.dtype();
        columns.push(Column::new(
            name.as_str(),
            ColumnData::broadcast(value, dtype, len)?,
        ));
    }
    Table::new(columns)
}
