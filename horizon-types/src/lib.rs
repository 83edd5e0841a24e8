//! Shared frequency descriptors, configuration primitives and the unified error
//! type used across the horizon workspace.
#![warn(missing_docs)]

mod config;
mod error;
mod frequency;

pub use config::{FutureFrameConfig, Threads};
pub use error::HorizonError;
pub use frequency::{Frequency, PeriodAlign};
