//! Calendar primitives: local/UTC conversion, business days and month arithmetic.

use chrono::offset::LocalResult;
use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, TimeZone, Utc, Weekday};
use chrono_tz::Tz;

use crate::types::HorizonError;

/// Milliseconds in one calendar day.
pub const DAY_MS: i64 = 86_400_000;

/// Granularity used when rolling a non-existent local time past a DST gap.
const GAP_PROBE_MINUTES: i64 = 15;
/// Longest DST gap we try to roll over (6h covers every zone in the tz database).
const GAP_PROBE_LIMIT: i64 = 24;

/// Wall-clock value of `instant` in `tz` (UTC when `tz` is `None`).
#[must_use]
pub fn to_local(instant: DateTime<Utc>, tz: Option<Tz>) -> NaiveDateTime {
    match tz {
        Some(tz) => instant.with_timezone(&tz).naive_local(),
        None => instant.naive_utc(),
    }
}

/// Resolve a wall-clock value in `tz` to an instant.
///
/// Ambiguous local times (fall-back overlap) map to the earlier instant.
/// Non-existent local times (spring-forward gap) roll forward to the first
/// valid local time after the gap.
#[must_use]
pub fn resolve_local(local: NaiveDateTime, tz: Option<Tz>) -> DateTime<Utc> {
    let Some(tz) = tz else {
        return Utc.from_utc_datetime(&local);
    };
    match tz.from_local_datetime(&local) {
        LocalResult::Single(dt) => dt.with_timezone(&Utc),
        LocalResult::Ambiguous(dt1, _) => dt1.with_timezone(&Utc),
        LocalResult::None => {
            for k in 1..=GAP_PROBE_LIMIT {
                let Some(probe) =
                    local.checked_add_signed(Duration::minutes(k * GAP_PROBE_MINUTES))
                else {
                    break;
                };
                if let Some(dt) = tz.from_local_datetime(&probe).earliest() {
                    return dt.with_timezone(&Utc);
                }
            }
            // Fallback: read the wall clock as UTC
            Utc.from_utc_datetime(&local)
        }
    }
}

/// Monday through Friday.
#[must_use]
pub fn is_business_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// First business day strictly after `date`.
#[must_use]
pub fn next_business_day(date: NaiveDate) -> Option<NaiveDate> {
    let mut d = date.succ_opt()?;
    while !is_business_day(d) {
        d = d.succ_opt()?;
    }
    Some(d)
}

/// True when a successive pair of dates skips exactly one weekend (Friday → Monday).
#[must_use]
pub fn is_weekend_skip(from: NaiveDate, to: NaiveDate) -> bool {
    from.weekday() == Weekday::Fri && to.weekday() == Weekday::Mon && (to - from).num_days() == 3
}

/// Zero-based month index: `year * 12 + (month - 1)`.
#[must_use]
pub fn month_index(date: NaiveDate) -> i64 {
    i64::from(date.year()) * 12 + i64::from(date.month0())
}

/// Number of calendar months from `a` to `b` (ignores the day of month).
#[must_use]
pub fn month_distance(a: NaiveDate, b: NaiveDate) -> i64 {
    month_index(b) - month_index(a)
}

/// Number of days in the month with the given zero-based month index.
#[must_use]
pub fn days_in_month_at(index: i64) -> Option<u32> {
    let first = first_of_month_at(index)?;
    let next = first_of_month_at(index + 1)?;
    u32::try_from((next - first).num_days()).ok()
}

/// First day of the month with the given zero-based month index.
#[must_use]
pub fn first_of_month_at(index: i64) -> Option<NaiveDate> {
    let year = i32::try_from(index.div_euclid(12)).ok()?;
    let month = u32::try_from(index.rem_euclid(12)).ok()? + 1;
    NaiveDate::from_ymd_opt(year, month, 1)
}

/// Last day of the month with the given zero-based month index.
#[must_use]
pub fn last_of_month_at(index: i64) -> Option<NaiveDate> {
    first_of_month_at(index + 1)?.pred_opt()
}

/// `day` in the month with the given index, clamped to the month length.
#[must_use]
pub fn clamped_day_at(index: i64, day: u32) -> Option<NaiveDate> {
    let first = first_of_month_at(index)?;
    let last = days_in_month_at(index)?;
    first.with_day(day.clamp(1, last))
}

/// True when `date` is the last day of its month.
#[must_use]
pub fn is_month_end(date: NaiveDate) -> bool {
    date.succ_opt().is_some_and(|next| next.month() != date.month())
}

/// Map a chrono out-of-range condition to a caller-facing error.
pub(crate) fn out_of_range(what: &str) -> HorizonError {
    HorizonError::InvalidArg(format!("{what} is outside the supported timestamp range"))
}
