use horizon_core::{
    Frequency, FutureFrameConfig, GroupedTable, HorizonError, LogProgress, ProgressObserver,
    Table, Threads,
};

use crate::core::{Groupable, future_frame_with_observer};

const DEFAULT_OBSERVER: LogProgress = LogProgress {
    label: "future_frame",
};

/// Builder for a single `future_frame` call.
///
/// Setters only record values; everything is validated in [`run`](Self::run).
///
/// ```rust,ignore
/// use horizon::{FutureFrameExt, Threads};
///
/// let extended = sales
///     .group_by(&["id"])?
///     .future_frame("date")
///     .length_out(12)
///     .threads(Threads::All)
///     .run()?;
/// ```
pub struct FutureFrameBuilder<'a> {
    data: Groupable<'a>,
    date_column: String,
    config: FutureFrameConfig,
    observer: &'a dyn ProgressObserver,
}

impl<'a> FutureFrameBuilder<'a> {
    /// Start from the default configuration.
    pub fn new(data: impl Into<Groupable<'a>>, date_column: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            date_column: date_column.into(),
            config: FutureFrameConfig::default(),
            observer: &DEFAULT_OBSERVER,
        }
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, config: FutureFrameConfig) -> Self {
        self.config = config;
        self
    }

    /// Number of future timestamps per series.
    #[must_use]
    pub const fn length_out(mut self, length_out: usize) -> Self {
        self.config.length_out = length_out;
        self
    }

    /// Use this step instead of inferring one.
    #[must_use]
    pub const fn freq(mut self, freq: Frequency) -> Self {
        self.config.freq = Some(freq);
        self
    }

    /// Never skip calendar slots, even if the history does.
    #[must_use]
    pub const fn force_regular(mut self, yes: bool) -> Self {
        self.config.force_regular = yes;
        self
    }

    /// Keep the original rows ahead of the generated ones.
    #[must_use]
    pub const fn bind_data(mut self, yes: bool) -> Self {
        self.config.bind_data = yes;
        self
    }

    /// Worker count for grouped input.
    #[must_use]
    pub const fn threads(mut self, threads: Threads) -> Self {
        self.config.threads = threads;
        self
    }

    /// Emit progress events as chunks complete.
    #[must_use]
    pub const fn show_progress(mut self, yes: bool) -> Self {
        self.config.show_progress = yes;
        self
    }

    /// Infer once from the first group (`true`) or per group (`false`).
    #[must_use]
    pub const fn shared_frequency(mut self, yes: bool) -> Self {
        self.config.shared_frequency = yes;
        self
    }

    /// Receive progress events here instead of the `tracing` log.
    #[must_use]
    pub fn observer(mut self, observer: &'a dyn ProgressObserver) -> Self {
        self.observer = observer;
        self
    }

    /// Configuration as currently set.
    #[must_use]
    pub const fn current_config(&self) -> &FutureFrameConfig {
        &self.config
    }

    /// Validate and execute.
    ///
    /// # Errors
    /// See [`crate::future_frame`].
    pub fn run(self) -> Result<Table, HorizonError> {
        future_frame_with_observer(self.data, &self.date_column, &self.config, self.observer)
    }
}

/// Method-call entry point on plain and grouped tables.
pub trait FutureFrameExt {
    /// Start a [`FutureFrameBuilder`] over this table.
    fn future_frame(&self, date_column: &str) -> FutureFrameBuilder<'_>;
}

impl FutureFrameExt for Table {
    fn future_frame(&self, date_column: &str) -> FutureFrameBuilder<'_> {
        FutureFrameBuilder::new(self, date_column)
    }
}

impl FutureFrameExt for GroupedTable {
    fn future_frame(&self, date_column: &str) -> FutureFrameBuilder<'_> {
        FutureFrameBuilder::new(self, date_column)
    }
}
