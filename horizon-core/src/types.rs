//! Re-export of foundational types from `horizon-types`.
// Consolidated re-exports so downstream crates can depend on `horizon-core` only
pub use horizon_types::{Frequency, FutureFrameConfig, HorizonError, PeriodAlign, Threads};
