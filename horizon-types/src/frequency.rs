//! Canonical frequency descriptors.
//!
//! A [`Frequency`] names the step between consecutive observations of a time
//! series. Descriptors print as pandas-style offset aliases (`"D"`, `"B"`,
//! `"15min"`, `"MS"`, `"QE"`, ...) and serialize as those strings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::HorizonError;

/// Where calendar-period frequencies (months, quarters, years) place their dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PeriodAlign {
    /// First day of the period (`MS`, `QS`, `YS`).
    Start,
    /// Last day of the period (`ME`, `QE`, `YE`).
    End,
    /// Same day-of-month as the anchor, clamped to the month length.
    SameDay,
}

/// Canonical step between consecutive observations.
///
/// Sub-daily variants are fixed durations applied to absolute instants; every
/// other variant is calendar arithmetic on local wall-clock time. Multiples are
/// always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Frequency {
    /// `n` milliseconds.
    Millis(u32),
    /// `n` seconds.
    Seconds(u32),
    /// `n` minutes.
    Minutes(u32),
    /// `n` hours.
    Hours(u32),
    /// `n` calendar days.
    Days(u32),
    /// `n` business days (Monday through Friday).
    BusinessDays(u32),
    /// `n` weeks.
    Weeks(u32),
    /// `n` months.
    Months {
        /// Multiple.
        n: u32,
        /// Placement within the month.
        align: PeriodAlign,
    },
    /// `n` quarters.
    Quarters {
        /// Multiple.
        n: u32,
        /// Placement within the quarter.
        align: PeriodAlign,
    },
    /// `n` years.
    Years {
        /// Multiple.
        n: u32,
        /// Placement within the year.
        align: PeriodAlign,
    },
}

impl Frequency {
    /// One calendar day.
    pub const DAILY: Self = Self::Days(1);
    /// One business day.
    pub const BUSINESS_DAILY: Self = Self::BusinessDays(1);
    /// One hour.
    pub const HOURLY: Self = Self::Hours(1);
    /// One week.
    pub const WEEKLY: Self = Self::Weeks(1);
    /// Month start.
    pub const MONTH_START: Self = Self::Months {
        n: 1,
        align: PeriodAlign::Start,
    };
    /// Month end.
    pub const MONTH_END: Self = Self::Months {
        n: 1,
        align: PeriodAlign::End,
    };
    /// Quarter start.
    pub const QUARTER_START: Self = Self::Quarters {
        n: 1,
        align: PeriodAlign::Start,
    };
    /// Year start.
    pub const YEAR_START: Self = Self::Years {
        n: 1,
        align: PeriodAlign::Start,
    };

    /// Build the closest sub-daily descriptor for an exact duration in milliseconds.
    ///
    /// Picks the largest unit (hours, minutes, seconds, milliseconds) that divides
    /// the duration exactly.
    ///
    /// # Errors
    /// Returns `HorizonError::Frequency` if the duration is not positive or does
    /// not fit the multiple.
    pub fn from_millis(millis: i64) -> Result<Self, HorizonError> {
        if millis <= 0 {
            return Err(HorizonError::Frequency(format!(
                "duration must be positive, got {millis}ms"
            )));
        }
        let fit = |n: i64| {
            u32::try_from(n).map_err(|_| {
                HorizonError::Frequency(format!("duration of {millis}ms is too large"))
            })
        };
        if millis % 3_600_000 == 0 {
            Ok(Self::Hours(fit(millis / 3_600_000)?))
        } else if millis % 60_000 == 0 {
            Ok(Self::Minutes(fit(millis / 60_000)?))
        } else if millis % 1_000 == 0 {
            Ok(Self::Seconds(fit(millis / 1_000)?))
        } else {
            Ok(Self::Millis(fit(millis)?))
        }
    }

    /// The multiple carried by this descriptor.
    #[must_use]
    pub const fn multiple(&self) -> u32 {
        match *self {
            Self::Millis(n)
            | Self::Seconds(n)
            | Self::Minutes(n)
            | Self::Hours(n)
            | Self::Days(n)
            | Self::BusinessDays(n)
            | Self::Weeks(n)
            | Self::Months { n, .. }
            | Self::Quarters { n, .. }
            | Self::Years { n, .. } => n,
        }
    }

    /// Fixed step length in milliseconds for sub-daily descriptors.
    ///
    /// Returns `None` for calendar descriptors (days and longer), whose length
    /// depends on the local calendar.
    #[must_use]
    pub fn fixed_millis(&self) -> Option<i64> {
        match *self {
            Self::Millis(n) => Some(i64::from(n)),
            Self::Seconds(n) => Some(i64::from(n) * 1_000),
            Self::Minutes(n) => Some(i64::from(n) * 60_000),
            Self::Hours(n) => Some(i64::from(n) * 3_600_000),
            _ => None,
        }
    }

    /// Returns false only for descriptors that skip calendar slots (business days).
    #[must_use]
    pub const fn is_regular(&self) -> bool {
        !matches!(self, Self::BusinessDays(_))
    }

    /// Closest descriptor that never skips a calendar slot.
    ///
    /// Business days become calendar days; everything else is returned unchanged.
    #[must_use]
    pub const fn regularized(self) -> Self {
        match self {
            Self::BusinessDays(n) => Self::Days(n),
            other => other,
        }
    }

    /// Number of months per step for calendar-period descriptors.
    ///
    /// Returns `None` for other descriptors and when the month count does not
    /// fit in a `u32`.
    #[must_use]
    pub const fn months(&self) -> Option<(u32, PeriodAlign)> {
        let (n, per, align) = match *self {
            Self::Months { n, align } => (n, 1, align),
            Self::Quarters { n, align } => (n, 3, align),
            Self::Years { n, align } => (n, 12, align),
            _ => return None,
        };
        match n.checked_mul(per) {
            Some(months) => Some((months, align)),
            None => None,
        }
    }
}

fn unit_alias(freq: &Frequency) -> &'static str {
    use PeriodAlign::{End, SameDay, Start};
    match freq {
        Frequency::Millis(_) => "ms",
        Frequency::Seconds(_) => "s",
        Frequency::Minutes(_) => "min",
        Frequency::Hours(_) => "h",
        Frequency::Days(_) => "D",
        Frequency::BusinessDays(_) => "B",
        Frequency::Weeks(_) => "W",
        Frequency::Months { align: Start, .. } => "MS",
        Frequency::Months { align: End, .. } => "ME",
        Frequency::Months { align: SameDay, .. } => "MD",
        Frequency::Quarters { align: Start, .. } => "QS",
        Frequency::Quarters { align: End, .. } => "QE",
        Frequency::Quarters { align: SameDay, .. } => "QD",
        Frequency::Years { align: Start, .. } => "YS",
        Frequency::Years { align: End, .. } => "YE",
        Frequency::Years { align: SameDay, .. } => "YD",
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.multiple();
        if n == 1 {
            f.write_str(unit_alias(self))
        } else {
            write!(f, "{n}{}", unit_alias(self))
        }
    }
}

impl FromStr for Frequency {
    type Err = HorizonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        let digits = raw.chars().take_while(char::is_ascii_digit).count();
        let (num, unit) = raw.split_at(digits);
        let n: u32 = if num.is_empty() {
            1
        } else {
            num.parse()
                .map_err(|_| HorizonError::Frequency(format!("bad multiple in '{s}'")))?
        };
        if n == 0 {
            return Err(HorizonError::Frequency(format!(
                "multiple must be at least 1 in '{s}'"
            )));
        }
        // Anchored aliases such as "W-SUN" or "QS-OCT" step from the series
        // anchor, so the suffix carries no extra information here.
        let unit = unit.split_once('-').map_or(unit, |(head, _)| head);

        use PeriodAlign::{End, SameDay, Start};
        let freq = match unit {
            "ms" | "L" => Self::Millis(n),
            "s" | "S" | "sec" => Self::Seconds(n),
            "min" | "T" => Self::Minutes(n),
            "h" | "H" => Self::Hours(n),
            "D" | "d" => Self::Days(n),
            "B" => Self::BusinessDays(n),
            "W" => Self::Weeks(n),
            "MS" => Self::Months { n, align: Start },
            "M" | "ME" => Self::Months { n, align: End },
            "MD" => Self::Months { n, align: SameDay },
            "QS" => Self::Quarters { n, align: Start },
            "Q" | "QE" => Self::Quarters { n, align: End },
            "QD" => Self::Quarters { n, align: SameDay },
            "YS" | "AS" => Self::Years { n, align: Start },
            "Y" | "A" | "YE" => Self::Years { n, align: End },
            "YD" => Self::Years { n, align: SameDay },
            _ => {
                return Err(HorizonError::Frequency(format!(
                    "unknown frequency alias '{s}'"
                )));
            }
        };
        Ok(freq)
    }
}

impl TryFrom<String> for Frequency {
    type Error = HorizonError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl TryFrom<&str> for Frequency {
    type Error = HorizonError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Frequency> for String {
    fn from(value: Frequency) -> Self {
        value.to_string()
    }
}
