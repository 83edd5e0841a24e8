//! horizon-core
//!
//! Building blocks behind the grouped future-frame extension.
//!
//! - `types`: re-exports of the shared descriptors, config and error type.
//! - `timeseries`: timestamp series, frequency inference and future generation.
//! - `table`: a typed, nullable, column-oriented table and its grouping.
//! - `checks`: eager validation of arguments and columns.
//! - `parallel`: worker-count resolution, chunking and progress reporting.
//!
//! Calendar arithmetic (days, business days, months) runs on local wall-clock
//! time in the series zone; sub-daily steps run on absolute instants. Local
//! times that fall in a DST gap roll forward, ambiguous ones take the earlier
//! instant.
//!
//! Features
//! --------
//! - `tracing`: instrument inference and generation with `tracing` spans.
//! - `dataframe`: convert [`Table`] to and from polars `DataFrame`.
#![warn(missing_docs)]

/// Eager argument and column validation.
pub mod checks;
#[cfg(feature = "dataframe")]
mod dataframe;
/// Worker-count resolution, chunking and progress reporting.
pub mod parallel;
/// Typed, nullable, column-oriented tables.
pub mod table;
/// Timestamp series, inference and generation.
pub mod timeseries;
pub mod types;

pub use parallel::{
    LogProgress, Progress, ProgressObserver, SharedProgress, chunk_ranges, chunk_size,
    report_progress, resolve_thread_count,
};
pub use table::{Column, ColumnData, DataType, Group, GroupKey, GroupedTable, Table, Value};
pub use timeseries::future::{future_from_anchor, make_future_timestamps};
pub use timeseries::infer::{
    BusinessDayRule, DeltaSummary, FrequencyProfile, analyze_frequency, estimate_step_millis,
    infer_frequency, summarize_deltas,
};
pub use timeseries::series::{TimestampInput, TimestampSeries};
pub use types::*;
