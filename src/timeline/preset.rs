use chrono::{DateTime, Local, NaiveDate, TimeDelta, TimeZone, Utc};

use crate::error::ValidationError;

use super::range::TimeRange;

/// Window loaded when coverage mode is entered.
pub const DEFAULT_PRESET_HOURS: u32 = 24;

/// A named way of picking the coverage window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangePreset {
    /// The last `n` hours up to now.
    Hours(u32),
    /// One local calendar day.
    Date(NaiveDate),
}

impl Default for RangePreset {
    fn default() -> Self {
        RangePreset::Hours(DEFAULT_PRESET_HOURS)
    }
}

impl RangePreset {
    /// # Errors
    ///
    /// Returns an error for zero hours or a date without a local midnight.
    pub fn resolve(self, now: DateTime<Utc>) -> Result<TimeRange, ValidationError> {
        match self {
            RangePreset::Hours(0) => Err(ValidationError::PresetHoursZero),
            RangePreset::Hours(hours) => {
                let lookback = TimeDelta::try_hours(i64::from(hours))
                    .ok_or(ValidationError::RangeOverflow)?;
                TimeRange::ending_at(now, lookback)
            }
            RangePreset::Date(day) => day_range(day, &Local),
        }
    }

    #[must_use]
    pub fn label(self) -> String {
        match self {
            RangePreset::Hours(hours) => format!("{hours}h"),
            RangePreset::Date(day) => day.format("%Y-%m-%d").to_string(),
        }
    }
}

/// `[day 00:00:00, day 23:59:59]` in the given zone, converted to UTC.
///
/// # Errors
///
/// Returns `AmbiguousLocalDate` when either end does not exist in `tz`.
pub fn day_range<Tz: TimeZone>(day: NaiveDate, tz: &Tz) -> Result<TimeRange, ValidationError> {
    let ambiguous = || ValidationError::AmbiguousLocalDate {
        value: day.to_string(),
    };
    let start = day
        .and_hms_opt(0, 0, 0)
        .and_then(|naive| naive.and_local_timezone(tz.clone()).earliest())
        .ok_or_else(ambiguous)?;
    let end = day
        .and_hms_opt(23, 59, 59)
        .and_then(|naive| naive.and_local_timezone(tz.clone()).latest())
        .ok_or_else(ambiguous)?;
    TimeRange::new(start.with_timezone(&Utc), end.with_timezone(&Utc))
}

#[must_use]
pub fn format_range_label(range: &TimeRange) -> String {
    format!(
        "{} -> {}",
        range.since().format("%b %d %H:%M"),
        range.until().format("%b %d %H:%M")
    )
}

#[must_use]
pub fn format_cutoff_label(cutoff: DateTime<Utc>) -> String {
    cutoff.format("%b %d %H:%M:%S").to_string()
}
