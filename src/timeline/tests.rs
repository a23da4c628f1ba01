use chrono::{DateTime, NaiveDate, TimeDelta, TimeZone, Utc};

use super::{
    DEFAULT_PRESET_HOURS, RangePreset, SCRUB_MAX, ScrubPosition, TimeRange, day_range,
    format_range_label, scrub_to_instant,
};

fn at(hour: u32, minute: u32) -> Result<DateTime<Utc>, String> {
    Utc.with_ymd_and_hms(2026, 2, 10, hour, minute, 0)
        .single()
        .ok_or_else(|| "invalid test timestamp".to_owned())
}

fn one_hour() -> Result<TimeRange, String> {
    TimeRange::new(at(8, 0)?, at(9, 0)?).map_err(|err| err.to_string())
}

fn scrub(value: u16) -> Result<ScrubPosition, String> {
    ScrubPosition::new(value).map_err(|err| err.to_string())
}

#[test]
fn range_rejects_end_before_start() -> Result<(), String> {
    if TimeRange::new(at(9, 0)?, at(8, 0)?).is_ok() {
        return Err("Expected inverted range to be rejected".to_owned());
    }
    Ok(())
}

#[test]
fn scrub_endpoints_map_to_range_bounds() -> Result<(), String> {
    let range = one_hour()?;
    if scrub_to_instant(&range, ScrubPosition::START) != range.since() {
        return Err("Position 0 should map to since".to_owned());
    }
    if scrub_to_instant(&range, ScrubPosition::END) != range.until() {
        return Err("SCRUB_MAX should map to until".to_owned());
    }
    let midpoint = scrub_to_instant(&range, scrub(500)?);
    if midpoint != at(8, 30)? {
        return Err(format!("Unexpected midpoint {}", midpoint));
    }
    Ok(())
}

#[test]
fn scrub_is_monotonic_across_every_position() -> Result<(), String> {
    let odd_range = TimeRange::new(at(8, 0)?, at(8, 0)? + TimeDelta::milliseconds(7_919))
        .map_err(|err| err.to_string())?;
    for range in [one_hour()?, odd_range] {
        let mut previous = range.since();
        for value in 0..=SCRUB_MAX {
            let instant = scrub_to_instant(&range, scrub(value)?);
            if instant < previous {
                return Err(format!("Cutoff went backwards at position {}", value));
            }
            if instant > range.until() {
                return Err(format!("Cutoff overshot range at position {}", value));
            }
            previous = instant;
        }
    }
    Ok(())
}

#[test]
fn zero_length_range_always_yields_since() -> Result<(), String> {
    let instant = at(12, 0)?;
    let range = TimeRange::new(instant, instant).map_err(|err| err.to_string())?;
    if !range.is_empty() {
        return Err("Expected zero-length range".to_owned());
    }
    for value in [0, 1, 500, 999, SCRUB_MAX] {
        if scrub_to_instant(&range, scrub(value)?) != instant {
            return Err(format!("Position {} did not map to since", value));
        }
    }
    Ok(())
}

#[test]
fn sub_millisecond_range_still_ends_at_until() -> Result<(), String> {
    let since = at(8, 0)?;
    let until = since + TimeDelta::microseconds(500);
    let range = TimeRange::new(since, until).map_err(|err| err.to_string())?;
    if scrub_to_instant(&range, ScrubPosition::END) != until {
        return Err("SCRUB_MAX should map to until".to_owned());
    }
    if scrub_to_instant(&range, ScrubPosition::START) != since {
        return Err("Position 0 should map to since".to_owned());
    }
    let midpoint = scrub_to_instant(&range, scrub(500)?);
    if midpoint != since + TimeDelta::microseconds(250) {
        return Err(format!("Unexpected midpoint {}", midpoint));
    }
    Ok(())
}

#[test]
fn scrub_position_rejects_values_above_max() -> Result<(), String> {
    if ScrubPosition::new(SCRUB_MAX.saturating_add(1)).is_ok() {
        return Err("Expected 1001 to be rejected".to_owned());
    }
    if "70000".parse::<ScrubPosition>().is_ok() {
        return Err("Expected out-of-u16 value to be rejected".to_owned());
    }
    if "abc".parse::<ScrubPosition>().is_ok() {
        return Err("Expected non-number to be rejected".to_owned());
    }
    let parsed: ScrubPosition = " 250 ".parse().map_err(|err: crate::error::ValidationError| err.to_string())?;
    if parsed.get() != 250 {
        return Err(format!("Unexpected parsed position {}", parsed.get()));
    }
    if ScrubPosition::default() != ScrubPosition::END {
        return Err("Default scrub should be the range end".to_owned());
    }
    Ok(())
}

#[test]
fn hours_preset_ends_now() -> Result<(), String> {
    let now = at(10, 0)?;
    let range = RangePreset::Hours(6)
        .resolve(now)
        .map_err(|err| err.to_string())?;
    if range.until() != now || range.since() != at(4, 0)? {
        return Err(format!("Unexpected range {}", format_range_label(&range)));
    }
    if RangePreset::default() != RangePreset::Hours(DEFAULT_PRESET_HOURS) {
        return Err("Default preset should be 24 hours".to_owned());
    }
    if RangePreset::Hours(0).resolve(now).is_ok() {
        return Err("Expected zero-hour preset to be rejected".to_owned());
    }
    Ok(())
}

#[test]
fn day_range_covers_the_calendar_day() -> Result<(), String> {
    let day = NaiveDate::from_ymd_opt(2026, 1, 15).ok_or("invalid date")?;
    let range = day_range(day, &Utc).map_err(|err| err.to_string())?;
    let expected_start = Utc
        .with_ymd_and_hms(2026, 1, 15, 0, 0, 0)
        .single()
        .ok_or("invalid start")?;
    if range.since() != expected_start {
        return Err(format!("Unexpected day start {}", range.since()));
    }
    let expected_span = TimeDelta::hours(23) + TimeDelta::minutes(59) + TimeDelta::seconds(59);
    if range.span() != expected_span {
        return Err(format!("Unexpected day span {}", range.span()));
    }
    Ok(())
}

#[test]
fn preset_labels_are_compact() -> Result<(), String> {
    let day = NaiveDate::from_ymd_opt(2026, 1, 15).ok_or("invalid date")?;
    if RangePreset::Hours(48).label() != "48h" {
        return Err("Unexpected hours label".to_owned());
    }
    if RangePreset::Date(day).label() != "2026-01-15" {
        return Err("Unexpected date label".to_owned());
    }
    Ok(())
}
