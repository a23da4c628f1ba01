use chrono::{DateTime, TimeDelta, Utc};

use crate::error::ValidationError;

/// Upper bound of the scrub cursor; `SCRUB_MAX` maps onto `TimeRange::until`.
pub const SCRUB_MAX: u16 = 1000;

const NANOS_PER_SECOND: i128 = 1_000_000_000;

/// Closed time interval `[since, until]`.
///
/// `since == until` is allowed as a degenerate, zero-length window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    since: DateTime<Utc>,
    until: DateTime<Utc>,
}

impl TimeRange {
    /// Builds a range, rejecting an end that precedes the start.
    ///
    /// # Errors
    ///
    /// Returns `RangeStartAfterEnd` when `since > until`.
    pub fn new(since: DateTime<Utc>, until: DateTime<Utc>) -> Result<Self, ValidationError> {
        if since > until {
            return Err(ValidationError::RangeStartAfterEnd {
                since: since.to_rfc3339(),
                until: until.to_rfc3339(),
            });
        }
        Ok(Self { since, until })
    }

    /// Range of `lookback` ending at `until`.
    ///
    /// # Errors
    ///
    /// Returns `RangeOverflow` when the start falls outside the calendar.
    pub fn ending_at(until: DateTime<Utc>, lookback: TimeDelta) -> Result<Self, ValidationError> {
        let since = until
            .checked_sub_signed(lookback)
            .ok_or(ValidationError::RangeOverflow)?;
        Self::new(since, until)
    }

    #[must_use]
    pub const fn since(&self) -> DateTime<Utc> {
        self.since
    }

    #[must_use]
    pub const fn until(&self) -> DateTime<Utc> {
        self.until
    }

    #[must_use]
    pub fn span(&self) -> TimeDelta {
        self.until.signed_duration_since(self.since)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.since == self.until
    }
}

/// Normalized playback cursor in `[0, SCRUB_MAX]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScrubPosition(u16);

impl ScrubPosition {
    pub const START: Self = Self(0);
    pub const END: Self = Self(SCRUB_MAX);

    /// # Errors
    ///
    /// Returns `ScrubOutOfRange` for values above `SCRUB_MAX`.
    pub fn new(value: u16) -> Result<Self, ValidationError> {
        if value > SCRUB_MAX {
            return Err(ValidationError::ScrubOutOfRange {
                value: u64::from(value),
                max: SCRUB_MAX,
            });
        }
        Ok(Self(value))
    }

    #[must_use]
    pub const fn get(self) -> u16 {
        self.0
    }
}

impl Default for ScrubPosition {
    fn default() -> Self {
        Self::END
    }
}

impl std::str::FromStr for ScrubPosition {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let value: u64 = trimmed
            .parse()
            .map_err(|err| ValidationError::InvalidScrubNumber {
                value: trimmed.to_owned(),
                source: err,
            })?;
        let narrowed = u16::try_from(value).map_err(|_err| ValidationError::ScrubOutOfRange {
            value,
            max: SCRUB_MAX,
        })?;
        Self::new(narrowed)
    }
}

/// Maps a scrub position linearly onto `range`.
///
/// Works in whole nanoseconds with floor division, so the result never
/// decreases as `position` grows and `SCRUB_MAX` lands exactly on `until`.
/// A zero-length range always yields `since`.
#[must_use]
pub fn scrub_to_instant(range: &TimeRange, position: ScrubPosition) -> DateTime<Utc> {
    let span = range.span();
    let span_ns = i128::from(span.num_seconds())
        .saturating_mul(NANOS_PER_SECOND)
        .saturating_add(i128::from(span.subsec_nanos()))
        .max(0);
    if span_ns == 0 {
        return range.since;
    }
    let offset_ns = span_ns
        .saturating_mul(i128::from(position.get()))
        .checked_div(i128::from(SCRUB_MAX))
        .unwrap_or(0);
    let seconds = offset_ns.checked_div(NANOS_PER_SECOND).unwrap_or(0);
    let nanos = offset_ns.checked_rem(NANOS_PER_SECOND).unwrap_or(0);
    let offset = i64::try_from(seconds)
        .ok()
        .zip(u32::try_from(nanos).ok())
        .and_then(|(secs, subsec)| TimeDelta::new(secs, subsec))
        .unwrap_or(span);
    range
        .since
        .checked_add_signed(offset)
        .map_or(range.until, |instant| instant.min(range.until))
}
