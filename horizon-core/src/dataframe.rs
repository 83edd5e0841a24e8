//! Conversion between [`Table`] and polars `DataFrame`.
//!
//! Timestamps travel as `Datetime(Microseconds, tz)`; sub-microsecond
//! precision is truncated on the way out.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use polars::prelude::{
    Column as PlColumn, DataFrame, DataType as PlDataType, NamedFrom, PolarsError, TimeUnit,
    TimeZone as PlTimeZone,
};

use crate::table::{Column, ColumnData, Table};
use crate::types::HorizonError;

fn polars_err(e: PolarsError) -> HorizonError {
    HorizonError::Data(format!("polars: {e}"))
}

impl Table {
    /// Convert into a polars `DataFrame`.
    ///
    /// # Errors
    /// Returns `HorizonError::Data` when polars rejects a column.
    pub fn to_dataframe(&self) -> Result<DataFrame, HorizonError> {
        let columns = self
            .columns()
            .iter()
            .map(to_polars_column)
            .collect::<Result<Vec<_>, _>>()?;
        DataFrame::new(columns).map_err(polars_err)
    }

    /// Build a table from a polars `DataFrame`.
    ///
    /// Integer columns of any width become `Int64`, `Float32` widens to
    /// `Float64`.
    ///
    /// # Errors
    /// - `HorizonError::ColumnType` for unsupported dtypes or unknown zones.
    /// - `HorizonError::Data` when polars fails to cast a column.
    pub fn try_from_dataframe(df: &DataFrame) -> Result<Self, HorizonError> {
        let columns = df
            .get_columns()
            .iter()
            .map(from_polars_column)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(columns)
    }
}

fn to_polars_column(column: &Column) -> Result<PlColumn, HorizonError> {
    let name = column.name().into();
    let out = match column.data() {
        ColumnData::Timestamp { values, tz } => {
            let micros: Vec<Option<i64>> = values
                .iter()
                .map(|v| v.map(|t| t.timestamp_micros()))
                .collect();
            let tz = PlTimeZone::opt_try_new(tz.map(|tz| tz.name())).map_err(polars_err)?;
            PlColumn::new(name, micros)
                .cast(&PlDataType::Datetime(TimeUnit::Microseconds, tz))
                .map_err(polars_err)?
        }
        ColumnData::Int64(v) => PlColumn::new(name, v.as_slice()),
        ColumnData::Float64(v) => PlColumn::new(name, v.as_slice()),
        ColumnData::Utf8(v) => PlColumn::new(name, v.as_slice()),
        ColumnData::Bool(v) => PlColumn::new(name, v.as_slice()),
    };
    Ok(out)
}

fn from_polars_column(column: &PlColumn) -> Result<Column, HorizonError> {
    let name = column.name().as_str();
    let unsupported = || {
        HorizonError::column_type(
            name,
            "datetime, integer, float, string or bool",
            column.dtype().to_string(),
        )
    };
    let data = match column.dtype() {
        PlDataType::Datetime(_, tz) => {
            let tz = tz
                .as_ref()
                .map(|tz| tz.as_str().parse::<Tz>())
                .transpose()
                .map_err(|_| unsupported())?;
            let ints = column
                .cast(&PlDataType::Datetime(TimeUnit::Microseconds, None))
                .and_then(|c| c.cast(&PlDataType::Int64))
                .map_err(polars_err)?;
            let values = ints
                .i64()
                .map_err(polars_err)?
                .into_iter()
                .map(|v| v.and_then(DateTime::<Utc>::from_timestamp_micros))
                .collect();
            ColumnData::Timestamp { values, tz }
        }
        PlDataType::Boolean => {
            ColumnData::Bool(column.bool().map_err(polars_err)?.into_iter().collect())
        }
        PlDataType::String => ColumnData::Utf8(
            column
                .str()
                .map_err(polars_err)?
                .into_iter()
                .map(|v| v.map(str::to_string))
                .collect(),
        ),
        PlDataType::Float32 | PlDataType::Float64 => {
            let cast = column.cast(&PlDataType::Float64).map_err(polars_err)?;
            ColumnData::Float64(cast.f64().map_err(polars_err)?.into_iter().collect())
        }
        dtype if dtype.is_integer() => {
            let cast = column.cast(&PlDataType::Int64).map_err(polars_err)?;
            ColumnData::Int64(cast.i64().map_err(polars_err)?.into_iter().collect())
        }
        _ => return Err(unsupported()),
    };
    Ok(Column::new(name, data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn table_roundtrips_through_polars() {
        let t0 = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let table = Table::new(vec![
            Column::timestamps("date", vec![Some(t0), None], Some(chrono_tz::Europe::Paris)),
            Column::utf8("id", vec![Some("a"), Some("b")]),
            Column::float64("v", vec![Some(1.5), None]),
            Column::int64("n", vec![None, Some(2)]),
            Column::bool("flag", vec![Some(true), Some(false)]),
        ])
        .unwrap();
        let df = table.to_dataframe().unwrap();
        assert_eq!(df.height(), 2);
        let back = Table::try_from_dataframe(&df).unwrap();
        assert_eq!(back, table);
    }
}
