//! A small typed, nullable, column-oriented table.
//!
//! Columns are stored as vectors of `Option<T>`; rows are addressed by index.
//! Timestamp columns carry an optional time zone shared by every value.

use std::collections::HashSet;
use std::fmt;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::timeseries::series::TimestampSeries;
use crate::types::HorizonError;

/// Grouping of a table by key columns.
pub mod group;

pub use group::{Group, GroupKey, GroupedTable};

/// A single cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Missing value.
    Null,
    /// Boolean.
    Bool(bool),
    /// 64-bit signed integer.
    Int64(i64),
    /// 64-bit float.
    Float64(f64),
    /// UTF-8 string.
    Utf8(String),
    /// Instant; the zone lives on the column.
    Timestamp(DateTime<Utc>),
}

impl Value {
    /// True for [`Value::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int64(v) => write!(f, "{v}"),
            Self::Float64(v) => write!(f, "{v}"),
            Self::Utf8(v) => f.write_str(v),
            Self::Timestamp(v) => write!(f, "{}", v.to_rfc3339()),
        }
    }
}

/// Logical type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    /// Instants with an optional zone.
    Timestamp(Option<Tz>),
    /// 64-bit signed integers.
    Int64,
    /// 64-bit floats.
    Float64,
    /// UTF-8 strings.
    Utf8,
    /// Booleans.
    Bool,
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timestamp(None) => f.write_str("timestamp"),
            Self::Timestamp(Some(tz)) => write!(f, "timestamp[{tz}]"),
            Self::Int64 => f.write_str("i64"),
            Self::Float64 => f.write_str("f64"),
            Self::Utf8 => f.write_str("utf8"),
            Self::Bool => f.write_str("bool"),
        }
    }
}

/// Storage of one column.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    /// Instants sharing one optional zone.
    Timestamp {
        /// Values.
        values: Vec<Option<DateTime<Utc>>>,
        /// Zone of every value.
        tz: Option<Tz>,
    },
    /// Integers.
    Int64(Vec<Option<i64>>),
    /// Floats.
    Float64(Vec<Option<f64>>),
    /// Strings.
    Utf8(Vec<Option<String>>),
    /// Booleans.
    Bool(Vec<Option<bool>>),
}

impl ColumnData {
    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Timestamp { values, .. } => values.len(),
            Self::Int64(v) => v.len(),
            Self::Float64(v) => v.len(),
            Self::Utf8(v) => v.len(),
            Self::Bool(v) => v.len(),
        }
    }

    /// True when the column has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Logical type.
    #[must_use]
    pub fn dtype(&self) -> DataType {
        match self {
            Self::Timestamp { tz, .. } => DataType::Timestamp(*tz),
            Self::Int64(_) => DataType::Int64,
            Self::Float64(_) => DataType::Float64,
            Self::Utf8(_) => DataType::Utf8,
            Self::Bool(_) => DataType::Bool,
        }
    }

    /// Value at `row`; out-of-range rows read as null.
    #[must_use]
    pub fn get(&self, row: usize) -> Value {
        match self {
            Self::Timestamp { values, .. } => {
                values.get(row).copied().flatten().map_or(Value::Null, Value::Timestamp)
            }
            Self::Int64(v) => v.get(row).copied().flatten().map_or(Value::Null, Value::Int64),
            Self::Float64(v) => v.get(row).copied().flatten().map_or(Value::Null, Value::Float64),
            Self::Utf8(v) => v
                .get(row)
                .cloned()
                .flatten()
                .map_or(Value::Null, Value::Utf8),
            Self::Bool(v) => v.get(row).copied().flatten().map_or(Value::Null, Value::Bool),
        }
    }

    /// A column of `len` nulls.
    #[must_use]
    pub fn nulls(dtype: DataType, len: usize) -> Self {
        match dtype {
            DataType::Timestamp(tz) => Self::Timestamp {
                values: vec![None; len],
                tz,
            },
            DataType::Int64 => Self::Int64(vec![None; len]),
            DataType::Float64 => Self::Float64(vec![None; len]),
            DataType::Utf8 => Self::Utf8(vec![None; len]),
            DataType::Bool => Self::Bool(vec![None; len]),
        }
    }

    /// A column repeating `value` `len` times.
    ///
    /// # Errors
    /// Returns `HorizonError::Data` when `value` does not fit `dtype`.
    pub fn broadcast(value: &Value, dtype: DataType, len: usize) -> Result<Self, HorizonError> {
        let data = match (value, dtype) {
            (Value::Null, dtype) => Self::nulls(dtype, len),
            (Value::Timestamp(v), DataType::Timestamp(tz)) => Self::Timestamp {
                values: vec![Some(*v); len],
                tz,
            },
            (Value::Int64(v), DataType::Int64) => Self::Int64(vec![Some(*v); len]),
            (Value::Float64(v), DataType::Float64) => Self::Float64(vec![Some(*v); len]),
            (Value::Utf8(v), DataType::Utf8) => Self::Utf8(vec![Some(v.clone()); len]),
            (Value::Bool(v), DataType::Bool) => Self::Bool(vec![Some(*v); len]),
            (value, dtype) => {
                return Err(HorizonError::Data(format!(
                    "value {value:?} does not fit a {dtype} column"
                )));
            }
        };
        Ok(data)
    }

    /// Rows at the given indices, in the given order.
    #[must_use]
    pub fn take(&self, rows: &[usize]) -> Self {
        fn pick<T: Clone>(v: &[Option<T>], rows: &[usize]) -> Vec<Option<T>> {
            rows.iter().map(|&r| v.get(r).cloned().flatten()).collect()
        }
        match self {
            Self::Timestamp { values, tz } => Self::Timestamp {
                values: pick(values, rows),
                tz: *tz,
            },
            Self::Int64(v) => Self::Int64(pick(v, rows)),
            Self::Float64(v) => Self::Float64(pick(v, rows)),
            Self::Utf8(v) => Self::Utf8(pick(v, rows)),
            Self::Bool(v) => Self::Bool(pick(v, rows)),
        }
    }

    /// Append the rows of `other`; types (and zones) must match.
    ///
    /// # Errors
    /// Returns `HorizonError::Data` when the types differ.
    pub fn append(&mut self, other: &Self) -> Result<(), HorizonError> {
        match (self, other) {
            (Self::Timestamp { values, tz }, Self::Timestamp { values: o, tz: otz }) if tz == otz => {
                values.extend_from_slice(o);
            }
            (Self::Int64(v), Self::Int64(o)) => v.extend_from_slice(o),
            (Self::Float64(v), Self::Float64(o)) => v.extend_from_slice(o),
            (Self::Utf8(v), Self::Utf8(o)) => v.extend_from_slice(o),
            (Self::Bool(v), Self::Bool(o)) => v.extend_from_slice(o),
            (this, other) => {
                return Err(HorizonError::Data(format!(
                    "cannot append {} rows to a {} column",
                    other.dtype(),
                    this.dtype()
                )));
            }
        }
        Ok(())
    }
}

/// A named column.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    data: ColumnData,
}

impl Column {
    /// Wrap existing storage.
    pub fn new(name: impl Into<String>, data: ColumnData) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    /// Timestamp column.
    pub fn timestamps(
        name: impl Into<String>,
        values: Vec<Option<DateTime<Utc>>>,
        tz: Option<Tz>,
    ) -> Self {
        Self::new(name, ColumnData::Timestamp { values, tz })
    }

    /// Timestamp column without nulls, taken from a series.
    pub fn from_series(name: impl Into<String>, series: TimestampSeries) -> Self {
        let tz = series.tz();
        Self::timestamps(
            name,
            series.into_instants().into_iter().map(Some).collect(),
            tz,
        )
    }

    /// Integer column.
    pub fn int64(name: impl Into<String>, values: Vec<Option<i64>>) -> Self {
        Self::new(name, ColumnData::Int64(values))
    }

    /// Float column.
    pub fn float64(name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Self::new(name, ColumnData::Float64(values))
    }

    /// String column.
    pub fn utf8<S: Into<String>>(name: impl Into<String>, values: Vec<Option<S>>) -> Self {
        Self::new(
            name,
            ColumnData::Utf8(values.into_iter().map(|v| v.map(Into::into)).collect()),
        )
    }

    /// Boolean column.
    pub fn bool(name: impl Into<String>, values: Vec<Option<bool>>) -> Self {
        Self::new(name, ColumnData::Bool(values))
    }

    /// Column name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Column storage.
    #[must_use]
    pub const fn data(&self) -> &ColumnData {
        &self.data
    }

    /// Logical type.
    #[must_use]
    pub fn dtype(&self) -> DataType {
        self.data.dtype()
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True when the column has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Non-null timestamps of the given rows (all rows when `rows` is `None`).
    ///
    /// # Errors
    /// Returns `HorizonError::ColumnType` when this is not a timestamp column.
    pub fn timestamp_series(&self, rows: Option<&[usize]>) -> Result<TimestampSeries, HorizonError> {
        let ColumnData::Timestamp { values, tz } = &self.data else {
            return Err(HorizonError::column_type(
                &self.name,
                "timestamp",
                self.dtype().to_string(),
            ));
        };
        let instants = match rows {
            Some(rows) => rows.iter().filter_map(|&r| values.get(r).copied().flatten()).collect(),
            None => values.iter().flatten().copied().collect(),
        };
        Ok(TimestampSeries::from_utc(instants, *tz))
    }
}

/// Ordered collection of equally long, uniquely named columns.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    /// Build a table.
    ///
    /// # Errors
    /// Returns `HorizonError::Data` for ragged columns or duplicate names.
    pub fn new(columns: Vec<Column>) -> Result<Self, HorizonError> {
        let mut seen = HashSet::with_capacity(columns.len());
        for c in &columns {
            if !seen.insert(c.name.as_str()) {
                return Err(HorizonError::Data(format!("duplicate column '{}'", c.name)));
            }
        }
        if let Some(first) = columns.first() {
            let height = first.len();
            if let Some(bad) = columns.iter().find(|c| c.len() != height) {
                return Err(HorizonError::Data(format!(
                    "column '{}' has {} rows, expected {height}",
                    bad.name,
                    bad.len()
                )));
            }
        }
        Ok(Self { columns })
    }

    /// Number of rows.
    #[must_use]
    pub fn height(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }

    /// Number of columns.
    #[must_use]
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Columns in order.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Column names in order.
    #[must_use]
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(Column::name).collect()
    }

    /// Column by name.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Column by name or a `MissingColumn` error.
    ///
    /// # Errors
    /// Returns `HorizonError::MissingColumn` when absent.
    pub fn try_column(&self, name: &str) -> Result<&Column, HorizonError> {
        self.column(name)
            .ok_or_else(|| HorizonError::missing_column(name))
    }

    /// Cell value; null when the row or column does not exist.
    #[must_use]
    pub fn value(&self, row: usize, column: &str) -> Value {
        self.column(column).map_or(Value::Null, |c| c.data.get(row))
    }

    /// Rows at the given indices, in the given order.
    #[must_use]
    pub fn take(&self, rows: &[usize]) -> Self {
        Self {
            columns: self
                .columns
                .iter()
                .map(|c| Column::new(c.name.clone(), c.data.take(rows)))
                .collect(),
        }
    }

    /// Stack tables vertically, aligning columns by name.
    ///
    /// Columns appear in order of first appearance; a table lacking a column
    /// contributes nulls for it.
    ///
    /// # Errors
    /// Returns `HorizonError::ColumnType` when one name carries different types.
    pub fn concat(tables: &[Self]) -> Result<Self, HorizonError> {
        let mut schema: Vec<(String, DataType)> = Vec::new();
        for t in tables {
            for c in &t.columns {
                match schema.iter().find(|(n, _)| *n == c.name) {
                    Some((_, dtype)) if *dtype != c.dtype() => {
                        return Err(HorizonError::column_type(
                            &c.name,
                            dtype.to_string(),
                            c.dtype().to_string(),
                        ));
                    }
                    Some(_) => {}
                    None => schema.push((c.name.clone(), c.dtype())),
                }
            }
        }
        let mut columns = Vec::with_capacity(schema.len());
        for (name, dtype) in schema {
            let mut data = ColumnData::nulls(dtype, 0);
            for t in tables {
                match t.column(&name) {
                    Some(c) => data.append(&c.data)?,
                    None => data.append(&ColumnData::nulls(dtype, t.height()))?,
                }
            }
            columns.push(Column::new(name, data));
        }
        Self::new(columns)
    }

    /// Stack `other` below `self`; see [`Table::concat`].
    ///
    /// # Errors
    /// Returns `HorizonError::ColumnType` when one name carries different types.
    pub fn vstack(&self, other: &Self) -> Result<Self, HorizonError> {
        Self::concat(&[self.clone(), other.clone()])
    }

    /// Group rows by the given key columns.
    ///
    /// # Errors
    /// See [`GroupedTable::new`].
    pub fn group_by<S: AsRef<str>>(&self, keys: &[S]) -> Result<GroupedTable, HorizonError> {
        GroupedTable::new(self.clone(), keys)
    }
}
