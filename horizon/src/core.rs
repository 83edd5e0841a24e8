use horizon_core::checks::{check_date_column, check_group_columns, check_length_out};
use horizon_core::{
    FutureFrameConfig, GroupedTable, HorizonError, LogProgress, ProgressObserver, Table,
};

use crate::extend::{grouped, plain};

/// Input accepted by [`future_frame`]: a plain table or a grouped one.
///
/// Conversions exist from `&Table` and `&GroupedTable`, so callers rarely
/// name the variants directly.
#[derive(Debug, Clone, Copy)]
pub enum Groupable<'a> {
    /// One series spanning the whole table.
    Plain(&'a Table),
    /// One series per group.
    Grouped(&'a GroupedTable),
}

impl<'a> From<&'a Table> for Groupable<'a> {
    fn from(value: &'a Table) -> Self {
        Self::Plain(value)
    }
}

impl<'a> From<&'a GroupedTable> for Groupable<'a> {
    fn from(value: &'a GroupedTable) -> Self {
        Self::Grouped(value)
    }
}

impl Groupable<'_> {
    /// The underlying table.
    #[must_use]
    pub const fn table(&self) -> &Table {
        match self {
            Self::Plain(t) => t,
            Self::Grouped(g) => g.table(),
        }
    }

    /// Column checks run before any work is dispatched.
    ///
    /// # Errors
    /// - `HorizonError::MissingColumn` / `ColumnType` for a bad date column.
    /// - `HorizonError::MissingColumn` / `InvalidArg` for bad group keys.
    /// - `HorizonError::InvalidArg` when a grouped table has no groups.
    pub fn validate(&self, date_column: &str) -> Result<(), HorizonError> {
        check_date_column(self.table(), date_column)?;
        if let Self::Grouped(g) = self {
            check_group_columns(g.table(), g.keys(), date_column)?;
            if g.n_groups() == 0 {
                return Err(HorizonError::InvalidArg(
                    "grouped table has no groups with non-null keys".into(),
                ));
            }
        }
        Ok(())
    }
}

/// Extend a table with `config.length_out` future timestamps per series.
///
/// Plain tables are treated as one series. Grouped tables produce one batch
/// per group with the key columns broadcast over the new rows. With
/// `bind_data` the original rows come first, followed by the new rows aligned
/// by column name (other columns are null); otherwise only the new rows are
/// returned, date column first.
///
/// Progress, when enabled, is logged through `tracing`.
///
/// # Errors
/// Input problems are reported before any work starts. A failure while
/// generating one group aborts the call with `HorizonError::Group`.
pub fn future_frame<'a>(
    data: impl Into<Groupable<'a>>,
    date_column: &str,
    config: &FutureFrameConfig,
) -> Result<Table, HorizonError> {
    let observer = LogProgress {
        label: "future_frame",
    };
    future_frame_with_observer(data.into(), date_column, config, &observer)
}

/// [`future_frame`] with a caller-supplied progress observer.
///
/// # Errors
/// See [`future_frame`].
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        name = "horizon::future_frame",
        skip(data, config, observer),
        fields(
            grouped = matches!(data, Groupable::Grouped(_)),
            length_out = config.length_out,
            freq = ?config.freq,
        ),
        err
    )
)]
pub fn future_frame_with_observer(
    data: Groupable<'_>,
    date_column: &str,
    config: &FutureFrameConfig,
    observer: &dyn ProgressObserver,
) -> Result<Table, HorizonError> {
    check_length_out(config.length_out)?;
    data.validate(date_column)?;
    let batch = match data {
        Groupable::Plain(table) => plain::extend(table, date_column, config)?,
        Groupable::Grouped(grouped) => grouped::extend(grouped, date_column, config, observer)?,
    };
    if config.bind_data {
        Table::concat(&[data.table().clone(), batch])
    } else {
        Ok(batch)
    }
}
