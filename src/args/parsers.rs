use std::time::Duration;

use chrono::{DateTime, NaiveDate, Utc};

use crate::error::ValidationError;

/// Parses `<number>[ms|s|m|h]`; a bare number means seconds.
pub(crate) fn parse_duration_arg(s: &str) -> Result<Duration, ValidationError> {
    let value = s.trim();
    if value.is_empty() {
        return Err(ValidationError::DurationEmpty);
    }

    let digits_len = value.chars().take_while(char::is_ascii_digit).count();
    if digits_len == 0 {
        return Err(ValidationError::InvalidDurationFormat {
            value: value.to_owned(),
        });
    }
    let (num_part, unit_part) = value.split_at(digits_len);
    let number: u64 = num_part
        .parse()
        .map_err(|err| ValidationError::InvalidDurationNumber {
            value: value.to_owned(),
            source: err,
        })?;

    let seconds_per_unit: u64 = match unit_part {
        "ms" => return non_zero(Duration::from_millis(number)),
        "" | "s" => 1,
        "m" => 60,
        "h" => 3600,
        other => {
            return Err(ValidationError::InvalidDurationUnit {
                unit: other.to_owned(),
            });
        }
    };
    let secs = number
        .checked_mul(seconds_per_unit)
        .ok_or(ValidationError::DurationOverflow)?;
    non_zero(Duration::from_secs(secs))
}

const fn non_zero(duration: Duration) -> Result<Duration, ValidationError> {
    if duration.is_zero() {
        Err(ValidationError::DurationZero)
    } else {
        Ok(duration)
    }
}

pub(crate) fn parse_positive_u32(s: &str) -> Result<u32, ValidationError> {
    match s.trim().parse::<u32>() {
        Ok(0) => Err(ValidationError::Message {
            message: "Value must be >= 1.".to_owned(),
        }),
        Ok(value) => Ok(value),
        Err(err) => Err(ValidationError::Message {
            message: format!("Invalid number '{}': {}", s.trim(), err),
        }),
    }
}

pub(crate) fn parse_date_arg(s: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_err| ValidationError::InvalidDate {
        value: s.to_owned(),
    })
}

pub(crate) fn parse_timestamp_arg(s: &str) -> Result<DateTime<Utc>, ValidationError> {
    DateTime::parse_from_rfc3339(s.trim())
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|_err| ValidationError::InvalidTimestamp {
            value: s.to_owned(),
        })
}

pub(crate) fn parse_bool_env(s: &str) -> Result<bool, ValidationError> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" | "on" => Ok(true),
        "0" | "false" | "no" | "n" | "off" => Ok(false),
        _ => Err(ValidationError::Message {
            message: format!("Invalid boolean '{}'.", s),
        }),
    }
}
