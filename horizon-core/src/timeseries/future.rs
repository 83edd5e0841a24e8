use chrono::{DateTime, Datelike, Days, Duration, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;

use super::calendar::{
    clamped_day_at, first_of_month_at, is_month_end, last_of_month_at, month_index,
    next_business_day, out_of_range, resolve_local, to_local,
};
use super::infer::infer_frequency;
use super::series::{TimestampInput, TimestampSeries};
use crate::types::{Frequency, HorizonError, PeriodAlign};

/// Most values reserved up front; longer horizons grow as they are filled.
const PREALLOC_LIMIT: usize = 4_096;

/// Generate `length_out` timestamps that continue `input` past its latest value.
///
/// The step is `freq` when given; otherwise it is inferred from the input
/// (`force_regular` only influences that inference). The result keeps the
/// input's time zone and is strictly increasing, with every value after the
/// latest input value.
///
/// # Errors
/// - `HorizonError::InvalidArg` when `length_out` is zero, the input is empty,
///   or a single timestamp is given without `freq`.
/// - `HorizonError::Parse` when string input cannot be parsed.
/// - `HorizonError::Inference` when the step cannot be inferred.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        name = "horizon_core::future::make_future_timestamps",
        skip(input),
        fields(freq = ?freq),
        err
    )
)]
pub fn make_future_timestamps(
    input: impl Into<TimestampInput>,
    length_out: usize,
    freq: Option<Frequency>,
    force_regular: bool,
) -> Result<TimestampSeries, HorizonError> {
    if length_out == 0 {
        return Err(HorizonError::InvalidArg(
            "length_out must be a positive integer".into(),
        ));
    }
    let series = input.into().into_series()?;
    let Some(anchor) = series.max() else {
        return Err(HorizonError::InvalidArg(
            "at least one timestamp is required".into(),
        ));
    };
    let freq = match freq {
        Some(f) => f,
        None if series.distinct_len() < 2 => {
            return Err(HorizonError::InvalidArg(
                "frequency must be provided for single-timestamp input".into(),
            ));
        }
        None => infer_frequency(&series, force_regular)?,
    };
    future_from_anchor(anchor, series.tz(), length_out, freq)
}

/// Step `length_out` times from `anchor` with an already resolved frequency.
///
/// Sub-daily steps move absolute instants; calendar steps move the wall clock
/// in `tz` and resolve the result back through the zone.
///
/// # Errors
/// Returns `HorizonError::InvalidArg` when a generated value leaves the
/// supported timestamp range.
pub fn future_from_anchor(
    anchor: DateTime<Utc>,
    tz: Option<Tz>,
    length_out: usize,
    freq: Frequency,
) -> Result<TimestampSeries, HorizonError> {
    if let Some(step) = freq.fixed_millis() {
        let last = horizon_len(length_out)?
            .checked_mul(step)
            .and_then(Duration::try_milliseconds)
            .and_then(|span| anchor.checked_add_signed(span));
        if last.is_none() {
            return Err(out_of_range("future timestamp"));
        }
        let mut out = Vec::with_capacity(length_out.min(PREALLOC_LIMIT));
        let mut cur = anchor;
        for _ in 0..length_out {
            cur = cur
                .checked_add_signed(Duration::milliseconds(step))
                .ok_or_else(|| out_of_range("future timestamp"))?;
            out.push(cur);
        }
        return Ok(TimestampSeries::from_utc(out, tz));
    }

    let local = to_local(anchor, tz);
    let values = match freq {
        Frequency::Days(n) => step_days(local, u64::from(n), length_out)?,
        Frequency::Weeks(n) => step_days(local, u64::from(n) * 7, length_out)?,
        Frequency::BusinessDays(n) => step_business_days(local, n, length_out)?,
        other => {
            let (months, align) = other.months().ok_or_else(|| {
                HorizonError::Frequency(format!("step {other} is not a usable calendar period"))
            })?;
            step_months(local, i64::from(months), align, length_out)?
        }
    };
    Ok(TimestampSeries::from_utc(
        values.into_iter().map(|v| resolve_local(v, tz)).collect(),
        tz,
    ))
}

fn horizon_len(length_out: usize) -> Result<i64, HorizonError> {
    i64::try_from(length_out).map_err(|_| out_of_range("horizon"))
}

/// Fail before generating anything when `length_out` steps of `days` cannot
/// be represented.
fn check_day_span(
    anchor: NaiveDateTime,
    days: u64,
    length_out: usize,
) -> Result<(), HorizonError> {
    u64::try_from(length_out)
        .ok()
        .and_then(|n| n.checked_mul(days))
        .and_then(|total| anchor.checked_add_days(Days::new(total)))
        .map(|_| ())
        .ok_or_else(|| out_of_range("future timestamp"))
}

fn step_days(
    anchor: NaiveDateTime,
    days: u64,
    length_out: usize,
) -> Result<Vec<NaiveDateTime>, HorizonError> {
    check_day_span(anchor, days, length_out)?;
    let mut out = Vec::with_capacity(length_out.min(PREALLOC_LIMIT));
    let mut cur = anchor;
    for _ in 0..length_out {
        cur = cur
            .checked_add_days(Days::new(days))
            .ok_or_else(|| out_of_range("future timestamp"))?;
        out.push(cur);
    }
    Ok(out)
}

fn step_business_days(
    anchor: NaiveDateTime,
    n: u32,
    length_out: usize,
) -> Result<Vec<NaiveDateTime>, HorizonError> {
    // Business days span at least as many calendar days.
    check_day_span(anchor, u64::from(n), length_out)?;
    let time = anchor.time();
    let mut date = anchor.date();
    let mut out = Vec::with_capacity(length_out.min(PREALLOC_LIMIT));
    for _ in 0..length_out {
        for _ in 0..n {
            date = next_business_day(date).ok_or_else(|| out_of_range("future timestamp"))?;
        }
        out.push(date.and_time(time));
    }
    Ok(out)
}

fn step_months(
    anchor: NaiveDateTime,
    step: i64,
    align: PeriodAlign,
    length_out: usize,
) -> Result<Vec<NaiveDateTime>, HorizonError> {
    let time = anchor.time();
    let date = anchor.date();
    let idx = month_index(date);
    let len = horizon_len(length_out)?;
    step.checked_mul(len)
        .and_then(|span| span.checked_add(idx))
        .and_then(|last| first_of_month_at(last.checked_add(1)?))
        .ok_or_else(|| out_of_range("future timestamp"))?;

    let first = first_on_grid(idx, step, date, align);

    let to_date = |i: i64| match align {
        // Offsets count from the anchor so a clamped month never shifts later ones.
        PeriodAlign::SameDay => clamped_day_at(idx + i * step, date.day()),
        PeriodAlign::Start => first_of_month_at(first + (i - 1) * step),
        PeriodAlign::End => last_of_month_at(first + (i - 1) * step),
    };
    (1..=len)
        .map(|i| {
            to_date(i)
                .map(|d| d.and_time(time))
                .ok_or_else(|| out_of_range("future timestamp"))
        })
        .collect()
}

/// Month index of the first period boundary strictly after the anchor date.
///
/// An anchor already on a boundary sets the phase of the grid. Otherwise the
/// grid follows the calendar: start boundaries fall on month indices divisible
/// by `step`, end boundaries on the month before such an index.
fn first_on_grid(idx: i64, step: i64, anchor: NaiveDate, align: PeriodAlign) -> i64 {
    let (on_offset, c, shift) = match align {
        PeriodAlign::End => (is_month_end(anchor), idx, 1),
        _ => (anchor.day() == 1, idx + 1, 0),
    };
    if on_offset {
        return idx + step;
    }
    c + (step - (c + shift).rem_euclid(step)) % step
}
