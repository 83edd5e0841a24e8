use chrono::{Datelike, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::calendar::{DAY_MS, is_business_day, is_month_end, is_weekend_skip, month_distance};
use super::series::TimestampSeries;
use crate::types::{Frequency, HorizonError, PeriodAlign};

/// Shortest dominant step (in days) that triggers the calendar-month test.
const MONTH_TEST_MIN_DAYS: i64 = 28;

/// Thresholds of the business-day heuristic.
///
/// A series reads as business-daily when its dominant step is exactly one day,
/// every observation falls on Monday through Friday, at least `min_weekend_skips`
/// deltas jump Friday → Monday, and at least `min_share_num / min_share_den` of
/// all deltas are either one day or such a weekend skip. The remainder tolerates
/// holidays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusinessDayRule {
    /// Numerator of the minimum share of 1-day or weekend-skip deltas.
    pub min_share_num: usize,
    /// Denominator of the minimum share.
    pub min_share_den: usize,
    /// Minimum number of Friday → Monday skips.
    pub min_weekend_skips: usize,
}

impl Default for BusinessDayRule {
    fn default() -> Self {
        Self {
            min_share_num: 4,
            min_share_den: 5,
            min_weekend_skips: 1,
        }
    }
}

impl BusinessDayRule {
    /// Apply the rule to sorted, distinct local values and their deltas.
    #[must_use]
    pub fn matches(&self, values: &[NaiveDateTime], deltas: &[i64], dominant: i64) -> bool {
        if dominant != DAY_MS || deltas.is_empty() {
            return false;
        }
        if !values.iter().all(|v| is_business_day(v.date())) {
            return false;
        }
        let mut skips = 0usize;
        let mut hits = 0usize;
        for (pair, &delta) in values.windows(2).zip(deltas) {
            if delta == DAY_MS {
                hits += 1;
            } else if delta == 3 * DAY_MS && is_weekend_skip(pair[0].date(), pair[1].date()) {
                hits += 1;
                skips += 1;
            }
        }
        // hits/total >= num/den  =>  hits * den >= total * num
        skips >= self.min_weekend_skips
            && hits.saturating_mul(self.min_share_den)
                >= deltas.len().saturating_mul(self.min_share_num)
    }
}

/// Descriptive statistics of successive deltas, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeltaSummary {
    /// Number of deltas.
    pub count: usize,
    /// Smallest delta.
    pub min: f64,
    /// First quartile.
    pub q25: f64,
    /// Median.
    pub median: f64,
    /// Arithmetic mean.
    pub mean: f64,
    /// Third quartile.
    pub q75: f64,
    /// Largest delta.
    pub max: f64,
}

/// Everything inference learned about a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrequencyProfile {
    /// Canonical descriptor.
    pub frequency: Frequency,
    /// True when every step matches the descriptor exactly.
    pub regular: bool,
    /// The dominant successive delta, in milliseconds.
    pub dominant_step_ms: i64,
    /// Delta statistics.
    pub summary: DeltaSummary,
}

/// Estimate the representative step (in milliseconds) of a set of deltas.
///
/// Returns the mode. When several deltas share the highest count the smallest
/// of them wins, so the result is always an observed cadence. Returns `None`
/// for empty input.
#[must_use]
pub fn estimate_step_millis(deltas: &[i64]) -> Option<i64> {
    let mut sorted: Vec<i64> = deltas.iter().copied().filter(|d| *d > 0).collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_unstable();
    Some(mode_smallest(&sorted))
}

/// Mode of an ascending slice; ties resolve to the first (smallest) run.
fn mode_smallest(sorted: &[i64]) -> i64 {
    let mut best = sorted[0];
    let mut best_count = 0usize;
    let mut cur = sorted[0];
    let mut cur_count = 0usize;
    for &d in sorted {
        if d == cur {
            cur_count += 1;
        } else {
            if cur_count > best_count {
                best = cur;
                best_count = cur_count;
            }
            cur = d;
            cur_count = 1;
        }
    }
    if cur_count > best_count {
        best = cur;
    }
    best
}

/// Sorted distinct local values with their successive deltas in milliseconds.
fn local_deltas(series: &TimestampSeries) -> Result<(Vec<NaiveDateTime>, Vec<i64>), HorizonError> {
    let mut values = series.local_values();
    values.sort_unstable();
    values.dedup();
    if values.len() < 2 {
        return Err(HorizonError::Inference(format!(
            "need at least 2 distinct timestamps, got {}",
            values.len()
        )));
    }
    let deltas = values
        .windows(2)
        .map(|w| (w[1] - w[0]).num_milliseconds())
        .collect();
    Ok((values, deltas))
}

/// Infer the canonical frequency of a timestamp sequence.
///
/// Input order and duplicates do not matter. When `force_regular` is set a
/// business-day cadence is reported as calendar days.
///
/// # Errors
/// Returns `HorizonError::Inference` for fewer than two distinct timestamps.
pub fn infer_frequency(
    series: &TimestampSeries,
    force_regular: bool,
) -> Result<Frequency, HorizonError> {
    analyze_frequency(series, force_regular).map(|p| p.frequency)
}

/// Infer the frequency together with its regularity and delta statistics.
///
/// # Errors
/// Returns `HorizonError::Inference` for fewer than two distinct timestamps.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        name = "horizon_core::infer::analyze_frequency",
        skip(series),
        fields(len = series.len(), force_regular = force_regular),
        err
    )
)]
pub fn analyze_frequency(
    series: &TimestampSeries,
    force_regular: bool,
) -> Result<FrequencyProfile, HorizonError> {
    let (values, deltas) = local_deltas(series)?;
    let summary = summarize(&deltas);
    let dominant = estimate_step_millis(&deltas)
        .ok_or_else(|| HorizonError::Inference("no positive deltas".into()))?;
    let all_equal = deltas.iter().all(|d| *d == dominant);

    let (frequency, regular) = if BusinessDayRule::default().matches(&values, &deltas, dominant) {
        let f = if force_regular {
            Frequency::BUSINESS_DAILY.regularized()
        } else {
            Frequency::BUSINESS_DAILY
        };
        (f, false)
    } else if dominant < DAY_MS {
        (Frequency::from_millis(dominant)?, all_equal)
    } else if let Some((freq, same_months)) = calendar_months(&values, dominant) {
        (freq, same_months)
    } else if dominant % DAY_MS == 0 {
        let days = whole(dominant / DAY_MS)?;
        let f = if days % 7 == 0 {
            Frequency::Weeks(days / 7)
        } else {
            Frequency::Days(days)
        };
        (f, all_equal)
    } else {
        (Frequency::from_millis(dominant)?, all_equal)
    };

    #[cfg(feature = "tracing")]
    tracing::debug!(
        frequency = %frequency,
        regular,
        dominant_step_ms = dominant,
        "inferred frequency"
    );

    Ok(FrequencyProfile {
        frequency,
        regular,
        dominant_step_ms: dominant,
        summary,
    })
}

/// Describe the successive deltas of a sequence (sorted, duplicates dropped).
///
/// # Errors
/// Returns `HorizonError::Inference` for fewer than two distinct timestamps.
pub fn summarize_deltas(series: &TimestampSeries) -> Result<DeltaSummary, HorizonError> {
    let (_, deltas) = local_deltas(series)?;
    Ok(summarize(&deltas))
}

fn whole(n: i64) -> Result<u32, HorizonError> {
    u32::try_from(n).map_err(|_| HorizonError::Inference(format!("step of {n} units is too large")))
}

/// Calendar-month test for long steps.
///
/// Returns the descriptor and whether every pair is exactly `k` months apart.
fn calendar_months(values: &[NaiveDateTime], dominant: i64) -> Option<(Frequency, bool)> {
    if dominant < MONTH_TEST_MIN_DAYS * DAY_MS {
        return None;
    }
    // Every value shares one time of day and one day-of-month, except where
    // a short month clamps that day to its last day.
    let time = values[0].time();
    let target_day = values.iter().map(Datelike::day).max().unwrap_or(1);
    let aligned = values.iter().all(|v| {
        v.time() == time
            && (v.day() == target_day || (v.day() < target_day && is_month_end(v.date())))
    });
    if !aligned {
        return None;
    }
    let mut distances: Vec<i64> = values
        .windows(2)
        .map(|w| month_distance(w[0].date(), w[1].date()))
        .collect();
    distances.sort_unstable();
    if distances[0] <= 0 {
        return None;
    }
    let k = mode_smallest(&distances);
    if dominant < MONTH_TEST_MIN_DAYS * k * DAY_MS || dominant > 31 * k * DAY_MS {
        return None;
    }
    let align = if values.iter().all(|v| v.day() == 1) {
        PeriodAlign::Start
    } else if values.iter().all(|v| is_month_end(v.date())) {
        PeriodAlign::End
    } else {
        PeriodAlign::SameDay
    };
    let n = u32::try_from(k).ok()?;
    let freq = if n % 12 == 0 {
        Frequency::Years { n: n / 12, align }
    } else if n % 3 == 0 {
        Frequency::Quarters { n: n / 3, align }
    } else {
        Frequency::Months { n, align }
    };
    let same_months = distances.iter().all(|d| *d == k);
    Some((freq, same_months))
}

#[allow(clippy::cast_precision_loss)]
fn summarize(deltas: &[i64]) -> DeltaSummary {
    let mut secs: Vec<f64> = deltas.iter().map(|d| *d as f64 / 1_000.0).collect();
    secs.sort_by(f64::total_cmp);
    let count = secs.len();
    let mean = if count == 0 {
        0.0
    } else {
        secs.iter().sum::<f64>() / count as f64
    };
    DeltaSummary {
        count,
        min: secs.first().copied().unwrap_or(0.0),
        q25: quantile(&secs, 0.25),
        median: quantile(&secs, 0.5),
        mean,
        q75: quantile(&secs, 0.75),
        max: secs.last().copied().unwrap_or(0.0),
    }
}

/// Linear-interpolation quantile of an ascending slice.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn quantile(sorted: &[f64], q: f64) -> f64 {
    match sorted.len() {
        0 => 0.0,
        1 => sorted[0],
        n => {
            let pos = q * (n - 1) as f64;
            let lo = pos.floor() as usize;
            let hi = pos.ceil() as usize;
            let frac = pos - lo as f64;
            sorted[lo] + (sorted[hi] - sorted[lo]) * frac
        }
    }
}
