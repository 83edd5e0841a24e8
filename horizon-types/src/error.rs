use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the horizon workspace.
///
/// Input problems (bad arguments, missing or mistyped columns, unparseable
/// timestamps, sequences too short to infer a cadence) are reported before any
/// parallel work is dispatched. Failures inside a worker are tagged with the
/// group that produced them.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum HorizonError {
    /// Invalid input argument.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// A named column is not present in the table.
    #[error("missing column: {column}")]
    MissingColumn {
        /// Name of the column that was looked up.
        column: String,
    },

    /// A column exists but holds the wrong kind of values.
    #[error("column '{column}' has type {actual}, expected {expected}")]
    ColumnType {
        /// Name of the offending column.
        column: String,
        /// Type the operation requires (e.g. "timestamp").
        expected: String,
        /// Type actually found.
        actual: String,
    },

    /// A timestamp string could not be normalized.
    #[error("cannot parse timestamp '{input}': {reason}")]
    Parse {
        /// The raw input string.
        input: String,
        /// Why parsing failed.
        reason: String,
    },

    /// A frequency alias could not be parsed.
    #[error("invalid frequency: {0}")]
    Frequency(String),

    /// The cadence of a timestamp sequence cannot be determined.
    #[error("cannot infer frequency: {0}")]
    Inference(String),

    /// Table-level invariant violations (ragged columns, duplicate names, ...).
    #[error("data issue: {0}")]
    Data(String),

    /// Generating future timestamps for one group failed.
    #[error("group {group} failed: {source}")]
    Group {
        /// Rendered group key, e.g. `[id=H10]`.
        group: String,
        /// The underlying failure.
        source: Box<HorizonError>,
    },

    /// The worker pool could not be created.
    #[error("thread pool error: {0}")]
    ThreadPool(String),
}

impl HorizonError {
    /// Helper: build a `MissingColumn` error.
    pub fn missing_column(column: impl Into<String>) -> Self {
        Self::MissingColumn {
            column: column.into(),
        }
    }

    /// Helper: build a `ColumnType` error.
    pub fn column_type(
        column: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::ColumnType {
            column: column.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Helper: build a `Parse` error.
    pub fn parse(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Parse {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Helper: tag an error with the group it came from.
    pub fn group(group: impl Into<String>, source: Self) -> Self {
        Self::Group {
            group: group.into(),
            source: Box::new(source),
        }
    }

    /// Returns true for every error caused by the caller's input.
    ///
    /// `Inference` counts as an input error: the caller can always resolve it by
    /// supplying an explicit frequency. A `Group` error is classified by its source.
    #[must_use]
    pub fn is_input_error(&self) -> bool {
        match self {
            Self::InvalidArg(_)
            | Self::MissingColumn { .. }
            | Self::ColumnType { .. }
            | Self::Parse { .. }
            | Self::Frequency(_)
            | Self::Inference(_) => true,
            Self::Group { source, .. } => source.is_input_error(),
            Self::Data(_) | Self::ThreadPool(_) => false,
        }
    }

    /// Strip any `Group` wrappers and return the innermost error.
    #[must_use]
    pub fn root_cause(&self) -> &Self {
        match self {
            Self::Group { source, .. } => source.root_cause(),
            other => other,
        }
    }
}
