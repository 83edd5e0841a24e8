use std::ops::Range;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use horizon_core::checks::check_date_column;
use horizon_core::{
    Frequency, FutureFrameConfig, Group, GroupedTable, HorizonError, ProgressObserver,
    SharedProgress, Table, TimestampSeries, chunk_ranges, future_from_anchor, infer_frequency,
    make_future_timestamps, report_progress, resolve_thread_count,
};
use rayon::prelude::*;

use super::assemble::group_batch;

/// How each group obtains its step.
#[derive(Debug, Clone, Copy)]
enum Step {
    /// One frequency for every group (explicit, or inferred from the first group).
    Shared(Frequency),
    /// Every group infers from its own timestamps.
    PerGroup,
}

/// One unit of per-group work, prepared before dispatch.
struct Job<'a> {
    group: &'a Group,
    anchor: DateTime<Utc>,
    series: TimestampSeries,
}

struct Plan<'a> {
    grouped: &'a GroupedTable,
    date_column: &'a str,
    tz: Option<Tz>,
    step: Step,
    length_out: usize,
    force_regular: bool,
}

/// Future rows for every group, chunked across `config.threads` workers.
pub(crate) fn extend(
    grouped: &GroupedTable,
    date_column: &str,
    config: &FutureFrameConfig,
    observer: &dyn ProgressObserver,
) -> Result<Table, HorizonError> {
    let tz = check_date_column(grouped.table(), date_column)?;
    let jobs = prepare_jobs(grouped, date_column)?;

    let step = match (config.freq, config.shared_frequency) {
        (Some(freq), _) => Step::Shared(freq),
        (None, true) => {
            // Groups follow first-appearance order, so this is the first group.
            let first = jobs
                .first()
                .ok_or_else(|| HorizonError::InvalidArg("no groups to extend".into()))?;
            let freq = infer_frequency(&first.series, config.force_regular)
                .map_err(|e| HorizonError::group(grouped.describe(&first.group.key), e))?;
            Step::Shared(freq)
        }
        (None, false) => Step::PerGroup,
    };

    let plan = Plan {
        grouped,
        date_column,
        tz,
        step,
        length_out: config.length_out,
        force_regular: config.force_regular,
    };

    let threads = resolve_thread_count(config.threads);
    let ranges = chunk_ranges(jobs.len(), threads);

    #[cfg(feature = "tracing")]
    tracing::debug!(
        groups = jobs.len(),
        threads,
        chunks = ranges.len(),
        step = ?plan.step,
        "future_frame chunk plan"
    );

    let chunks: Vec<Table> = if threads <= 1 {
        report_progress(
            ranges.iter().map(|r| run_chunk(&plan, &jobs, r)),
            ranges.len(),
            config.show_progress,
            observer,
        )
        .collect::<Result<_, _>>()?
    } else {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .map_err(|e| {
                HorizonError::ThreadPool(format!("failed to build rayon thread pool: {e}"))
            })?;
        let progress = SharedProgress::new(ranges.len(), config.show_progress, observer);
        let results: Vec<Result<Table, HorizonError>> = pool.install(|| {
            ranges
                .par_iter()
                .map(|r| {
                    let out = run_chunk(&plan, &jobs, r);
                    progress.tick();
                    out
                })
                .collect()
        });
        // Submission order decides which failure is reported.
        results.into_iter().collect::<Result<_, _>>()?
    };

    Table::concat(&chunks)
}

/// Extract each group's timestamps and anchor in one pass over the groups.
fn prepare_jobs<'a>(
    grouped: &'a GroupedTable,
    date_column: &str,
) -> Result<Vec<Job<'a>>, HorizonError> {
    grouped
        .groups()
        .iter()
        .map(|group| {
            let series = grouped.group_series(group, date_column)?;
            let anchor = series.max().ok_or_else(|| {
                HorizonError::group(
                    grouped.describe(&group.key),
                    HorizonError::InvalidArg(format!("no non-null values in '{date_column}'")),
                )
            })?;
            Ok(Job {
                group,
                anchor,
                series,
            })
        })
        .collect()
}

fn run_chunk(
    plan: &Plan<'_>,
    jobs: &[Job<'_>],
    range: &Range<usize>,
) -> Result<Table, HorizonError> {
    let batches = jobs[range.clone()]
        .iter()
        .map(|job| {
            run_job(plan, job).map_err(|e| {
                let group = plan.grouped.describe(&job.group.key);
                #[cfg(feature = "tracing")]
                tracing::warn!(group = %group, error = %e, "future generation failed");
                HorizonError::group(group, e)
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Table::concat(&batches)
}

fn run_job(plan: &Plan<'_>, job: &Job<'_>) -> Result<Table, HorizonError> {
    let future = match plan.step {
        Step::Shared(freq) => future_from_anchor(job.anchor, plan.tz, plan.length_out, freq)?,
        Step::PerGroup => {
            make_future_timestamps(&job.series, plan.length_out, None, plan.force_regular)?
        }
    };
    group_batch(plan.grouped, job.group, plan.date_column, future)
}
