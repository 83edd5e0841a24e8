use horizon_core::{Column, FutureFrameConfig, HorizonError, Table, make_future_timestamps};

/// Future rows of an ungrouped table: only the date column is populated.
pub(crate) fn extend(
    table: &Table,
    date_column: &str,
    config: &FutureFrameConfig,
) -> Result<Table, HorizonError> {
    let series = table.try_column(date_column)?.timestamp_series(None)?;
    let future = make_future_timestamps(
        series,
        config.length_out,
        config.freq,
        config.force_regular,
    )?;
    Table::new(vec![Column::from_series(date_column, future)])
}
