//! Horizon extends time-series tables with future timestamps.
//!
//! Overview
//! - Infers the cadence of a timestamp column (sub-daily, daily, business-day,
//!   weekly, monthly, quarterly, yearly) or uses an explicit frequency.
//! - Projects `length_out` timestamps past the latest observation of every
//!   series, keeping the column's time zone.
//! - Works on plain tables (one series) and grouped tables (one series per
//!   group), spreading groups over a fixed-size worker pool.
//!
//! Key behaviors and trade-offs
//! - Shared frequency: by default the cadence is inferred once from the first
//!   group and reused for every group; cheaper and consistent, but a group with
//!   a different cadence is projected with the shared one. Set
//!   `shared_frequency = false` to infer per group.
//! - Business days: a weekday-only history with weekend skips projects business
//!   days; `force_regular` projects every calendar day instead.
//! - Ordering: original rows first (with `bind_data`), then future rows group
//!   by group in group order. Results do not depend on the worker count.
//!
//! Examples
//! Grouped extension with the builder:
//! ```rust,ignore
//! use horizon::{FutureFrameExt, Threads};
//!
//! let grouped = sales.group_by(&["id"])?;
//! let extended = grouped
//!     .future_frame("date")
//!     .length_out(12)
//!     .threads(Threads::All)
//!     .run()?;
//! ```
//!
//! One-shot call with an explicit configuration:
//! ```rust,ignore
//! use horizon::{future_frame, FutureFrameConfig, Frequency};
//!
//! let cfg = FutureFrameConfig {
//!     freq: Some(Frequency::MONTH_START),
//!     bind_data: false,
//!     ..FutureFrameConfig::with_length(3)
//! };
//! let future_rows = future_frame(&table, "date", &cfg)?;
//! ```
//!
//! Standalone timestamp generation:
//! ```rust
//! use horizon::{make_future_timestamps, Frequency};
//!
//! let next = make_future_timestamps("2011-01-01", 5, Some(Frequency::DAILY), false)?;
//! assert_eq!(next.len(), 5);
//! # Ok::<(), horizon::HorizonError>(())
//! ```
//!
//! See the `horizon-demos` workspace member (`demos/`) for runnable end-to-end demonstrations.
#![warn(missing_docs)]

mod builder;
pub(crate) mod core;
mod extend;

pub use builder::{FutureFrameBuilder, FutureFrameExt};
pub use core::{Groupable, future_frame, future_frame_with_observer};

// Re-export core types for convenience
pub use horizon_core::{
    BusinessDayRule, Column, ColumnData, DataType, DeltaSummary, Frequency, FrequencyProfile,
    FutureFrameConfig, Group, GroupKey, GroupedTable, HorizonError, LogProgress, PeriodAlign,
    Progress, ProgressObserver, Table, Threads, TimestampInput, TimestampSeries, Value,
    analyze_frequency, chunk_ranges, estimate_step_millis, future_from_anchor, infer_frequency,
    make_future_timestamps, report_progress, resolve_thread_count, summarize_deltas,
};
