//! Timestamp sequences and the inputs accepted by the future generator.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

use super::calendar::{resolve_local, to_local};
use crate::types::HorizonError;

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M",
];
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%Y%m%d"];

/// An ordered collection of instants with an optional time zone.
///
/// A series without a zone is *naive*: its instants carry wall-clock values
/// with UTC as the carrier. Calendar reasoning always happens on the local
/// wall-clock reading returned by [`TimestampSeries::local_values`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TimestampSeries {
    instants: Vec<DateTime<Utc>>,
    tz: Option<Tz>,
}

impl TimestampSeries {
    /// Build a series from instants and an optional display zone.
    #[must_use]
    pub const fn from_utc(instants: Vec<DateTime<Utc>>, tz: Option<Tz>) -> Self {
        Self { instants, tz }
    }

    /// Build a naive series from wall-clock values.
    pub fn from_naive<I>(values: I) -> Self
    where
        I: IntoIterator<Item = NaiveDateTime>,
    {
        Self {
            instants: values
                .into_iter()
                .map(|v| Utc.from_utc_datetime(&v))
                .collect(),
            tz: None,
        }
    }

    /// Build a naive series from calendar dates at midnight.
    pub fn from_dates<I>(dates: I) -> Self
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        Self::from_naive(dates.into_iter().map(|d| d.and_time(chrono::NaiveTime::MIN)))
    }

    /// Build a zoned series from wall-clock values in `tz`.
    ///
    /// Ambiguous values take the earlier instant; values inside a DST gap roll
    /// forward past the gap.
    pub fn from_local<I>(values: I, tz: Tz) -> Self
    where
        I: IntoIterator<Item = NaiveDateTime>,
    {
        Self {
            instants: values
                .into_iter()
                .map(|v| resolve_local(v, Some(tz)))
                .collect(),
            tz: Some(tz),
        }
    }

    /// Build a zoned series from zoned values. The zone of the first value wins.
    pub fn from_zoned<I>(values: I) -> Self
    where
        I: IntoIterator<Item = DateTime<Tz>>,
    {
        let mut tz = None;
        let instants = values
            .into_iter()
            .map(|v| {
                tz.get_or_insert(v.timezone());
                v.with_timezone(&Utc)
            })
            .collect();
        Self { instants, tz }
    }

    /// Parse timestamp strings.
    ///
    /// Accepts `YYYY-MM-DD`, `YYYY-MM-DD HH:MM[:SS[.fff]]` (space or `T`
    /// separated) and RFC 3339 values with an offset. Offset values are
    /// converted to a UTC-zoned series; mixing offset and naive strings is
    /// rejected.
    ///
    /// # Errors
    /// Returns `HorizonError::Parse` naming the first string that cannot be parsed.
    pub fn parse<S: AsRef<str>>(items: &[S]) -> Result<Self, HorizonError> {
        let mut naive: Vec<NaiveDateTime> = Vec::with_capacity(items.len());
        let mut aware: Vec<DateTime<FixedOffset>> = Vec::new();
        for item in items {
            match parse_timestamp(item.as_ref())? {
                Parsed::Naive(v) => naive.push(v),
                Parsed::Offset(v) => aware.push(v),
            }
            if !naive.is_empty() && !aware.is_empty() {
                return Err(HorizonError::parse(
                    item.as_ref(),
                    "cannot mix offset-aware and naive timestamps",
                ));
            }
        }
        if aware.is_empty() {
            Ok(Self::from_naive(naive))
        } else {
            Ok(Self {
                instants: aware.into_iter().map(|v| v.with_timezone(&Utc)).collect(),
                tz: Some(chrono_tz::UTC),
            })
        }
    }

    /// Number of values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.instants.len()
    }

    /// True when the series holds no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.instants.is_empty()
    }

    /// Display zone, if any.
    #[must_use]
    pub const fn tz(&self) -> Option<Tz> {
        self.tz
    }

    /// Underlying instants in their stored order.
    #[must_use]
    pub fn instants(&self) -> &[DateTime<Utc>] {
        &self.instants
    }

    /// Consume the series and return its instants.
    #[must_use]
    pub fn into_instants(self) -> Vec<DateTime<Utc>> {
        self.instants
    }

    /// Wall-clock readings in the series zone, in stored order.
    #[must_use]
    pub fn local_values(&self) -> Vec<NaiveDateTime> {
        self.instants.iter().map(|&i| to_local(i, self.tz)).collect()
    }

    /// Latest instant (the anchor of a future projection).
    #[must_use]
    pub fn max(&self) -> Option<DateTime<Utc>> {
        self.instants.iter().max().copied()
    }

    /// Earliest instant.
    #[must_use]
    pub fn min(&self) -> Option<DateTime<Utc>> {
        self.instants.iter().min().copied()
    }

    /// Sorted copy with duplicates removed.
    #[must_use]
    pub fn sorted_unique(&self) -> Self {
        let mut instants = self.instants.clone();
        instants.sort_unstable();
        instants.dedup();
        Self {
            instants,
            tz: self.tz,
        }
    }

    /// Number of distinct instants.
    #[must_use]
    pub fn distinct_len(&self) -> usize {
        self.sorted_unique().len()
    }

    /// True when every value is strictly greater than the previous one.
    #[must_use]
    pub fn is_strictly_increasing(&self) -> bool {
        self.instants.windows(2).all(|w| w[0] < w[1])
    }
}

enum Parsed {
    Naive(NaiveDateTime),
    Offset(DateTime<FixedOffset>),
}

fn parse_timestamp(raw: &str) -> Result<Parsed, HorizonError> {
    let s = raw.trim();
    if s.is_empty() {
        return Err(HorizonError::parse(raw, "empty string"));
    }
    if let Ok(v) = DateTime::parse_from_rfc3339(s) {
        return Ok(Parsed::Offset(v));
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(v) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(Parsed::Naive(v));
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(Parsed::Naive(d.and_time(chrono::NaiveTime::MIN)));
        }
    }
    Err(HorizonError::parse(
        raw,
        "expected YYYY-MM-DD, YYYY-MM-DD HH:MM[:SS] or RFC 3339",
    ))
}

/// Anything the future generator accepts as its anchor sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimestampInput {
    /// One instant with an optional zone.
    Single {
        /// The instant.
        instant: DateTime<Utc>,
        /// Display zone.
        tz: Option<Tz>,
    },
    /// Raw strings, normalized with [`TimestampSeries::parse`].
    Strings(Vec<String>),
    /// An already typed sequence.
    Series(TimestampSeries),
}

impl TimestampInput {
    /// Normalize the input into a series.
    ///
    /// # Errors
    /// Returns `HorizonError::Parse` when a string cannot be parsed.
    pub fn into_series(self) -> Result<TimestampSeries, HorizonError> {
        match self {
            Self::Single { instant, tz } => Ok(TimestampSeries::from_utc(vec![instant], tz)),
            Self::Strings(items) => TimestampSeries::parse(&items),
            Self::Series(series) => Ok(series),
        }
    }
}

impl From<TimestampSeries> for TimestampInput {
    fn from(value: TimestampSeries) -> Self {
        Self::Series(value)
    }
}

impl From<&TimestampSeries> for TimestampInput {
    fn from(value: &TimestampSeries) -> Self {
        Self::Series(value.clone())
    }
}

impl From<DateTime<Utc>> for TimestampInput {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Single {
            instant: value,
            tz: None,
        }
    }
}

impl From<DateTime<Tz>> for TimestampInput {
    fn from(value: DateTime<Tz>) -> Self {
        Self::Single {
            instant: value.with_timezone(&Utc),
            tz: Some(value.timezone()),
        }
    }
}

impl From<NaiveDateTime> for TimestampInput {
    fn from(value: NaiveDateTime) -> Self {
        Self::Single {
            instant: Utc.from_utc_datetime(&value),
            tz: None,
        }
    }
}

impl From<NaiveDate> for TimestampInput {
    fn from(value: NaiveDate) -> Self {
        Self::from(value.and_time(chrono::NaiveTime::MIN))
    }
}

impl From<&str> for TimestampInput {
    fn from(value: &str) -> Self {
        Self::Strings(vec![value.to_string()])
    }
}

impl From<String> for TimestampInput {
    fn from(value: String) -> Self {
        Self::Strings(vec![value])
    }
}

impl From<Vec<String>> for TimestampInput {
    fn from(value: Vec<String>) -> Self {
        Self::Strings(value)
    }
}

impl From<Vec<&str>> for TimestampInput {
    fn from(value: Vec<&str>) -> Self {
        Self::Strings(value.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for TimestampInput {
    fn from(value: &[&str]) -> Self {
        Self::Strings(value.iter().map(|s| (*s).to_string()).collect())
    }
}
