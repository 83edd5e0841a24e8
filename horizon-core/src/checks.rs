//! Eager argument and column validation shared by the extension entry points.

use chrono_tz::Tz;

use crate::table::{DataType, Table};
use crate::types::HorizonError;

/// `length_out` must be positive.
///
/// # Errors
/// Returns `HorizonError::InvalidArg` for zero.
pub fn check_length_out(length_out: usize) -> Result<(), HorizonError> {
    if length_out == 0 {
        return Err(HorizonError::InvalidArg(
            "length_out must be a positive integer".into(),
        ));
    }
    Ok(())
}

/// The date column must exist and hold timestamps. Returns its zone.
///
/// # Errors
/// - `HorizonError::MissingColumn` when the column is absent.
/// - `HorizonError::ColumnType` when it is not a timestamp column.
pub fn check_date_column(table: &Table, date_column: &str) -> Result<Option<Tz>, HorizonError> {
    match table.try_column(date_column)?.dtype() {
        DataType::Timestamp(tz) => Ok(tz),
        other => Err(HorizonError::column_type(
            date_column,
            "timestamp",
            other.to_string(),
        )),
    }
}

/// Every key column must exist and differ from the date column.
///
/// # Errors
/// - `HorizonError::MissingColumn` when a key column is absent.
/// - `HorizonError::InvalidArg` when a key is also the date column.
pub fn check_group_columns<S: AsRef<str>>(
    table: &Table,
    keys: &[S],
    date_column: &str,
) -> Result<(), HorizonError> {
    for key in keys {
        let key = key.as_ref();
        table.try_column(key)?;
        if key == date_column {
            return Err(HorizonError::InvalidArg(format!(
                "'{key}' cannot be both a group key and the date column"
            )));
        }
    }
    Ok(())
}
