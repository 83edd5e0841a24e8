//! Configuration types shared by the generator and the orchestrator.

use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

use crate::error::HorizonError;
use crate::frequency::Frequency;

/// Worker-count knob for parallel future generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Threads {
    /// Use every hardware thread reported by the platform.
    All,
    /// Use exactly this many workers. `1` runs on the caller thread.
    Count(NonZeroUsize),
}

impl Default for Threads {
    fn default() -> Self {
        Self::Count(NonZeroUsize::MIN)
    }
}

impl Threads {
    /// Map a loosely typed knob onto `Threads`.
    ///
    /// `None` and `-1` select [`Threads::All`]; positive values select that
    /// many workers.
    ///
    /// # Errors
    /// Returns `HorizonError::InvalidArg` for `0` and for negative values other than `-1`.
    pub fn from_knob(knob: Option<i64>) -> Result<Self, HorizonError> {
        match knob {
            None | Some(-1) => Ok(Self::All),
            Some(n) if n > 0 => usize::try_from(n)
                .ok()
                .and_then(NonZeroUsize::new)
                .map(Self::Count)
                .ok_or_else(|| HorizonError::InvalidArg(format!("threads={n} is out of range"))),
            Some(n) => Err(HorizonError::InvalidArg(format!(
                "threads must be positive, -1 or unset; got {n}"
            ))),
        }
    }

    /// Shorthand for a fixed worker count.
    ///
    /// # Errors
    /// Returns `HorizonError::InvalidArg` if `n` is zero.
    pub fn count(n: usize) -> Result<Self, HorizonError> {
        NonZeroUsize::new(n)
            .map(Self::Count)
            .ok_or_else(|| HorizonError::InvalidArg("threads must be at least 1".into()))
    }
}

/// Parameters of a `future_frame` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FutureFrameConfig {
    /// Number of future timestamps generated per series (must be positive).
    pub length_out: usize,
    /// Explicit step. When `None` the step is inferred from the data.
    pub freq: Option<Frequency>,
    /// Fill every calendar slot even if the history skips some (e.g. weekends).
    pub force_regular: bool,
    /// Prepend the original rows to the generated rows.
    pub bind_data: bool,
    /// Worker count for grouped input.
    pub threads: Threads,
    /// Emit progress events while chunks complete.
    pub show_progress: bool,
    /// Infer the step once from the first group and reuse it for every group.
    ///
    /// When `false`, each group infers its own step from its own timestamps.
    pub shared_frequency: bool,
}

impl Default for FutureFrameConfig {
    fn default() -> Self {
        Self {
            length_out: 1,
            freq: None,
            force_regular: false,
            bind_data: true,
            threads: Threads::default(),
            show_progress: false,
            shared_frequency: true,
        }
    }
}

impl FutureFrameConfig {
    /// Defaults with the given horizon length.
    #[must_use]
    pub fn with_length(length_out: usize) -> Self {
        Self {
            length_out,
            ..Self::default()
        }
    }
}
