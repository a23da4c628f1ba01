use std::time::Duration;

use chrono::{DateTime, NaiveDate, TimeDelta};
use clap::Parser;

use super::coverage::coverage_preset;
use super::output::snapshot_document;
use super::playback_settings;
use super::trail::trail_target;
use crate::args::{Command, PlowArgs};
use crate::controller::{PlaybackController, PlaybackSettings};
use crate::error::{AppError, AppResult};
use crate::fetch::HttpTrackSource;
use crate::render::SnapshotSurface;
use crate::timeline::RangePreset;

#[test]
fn settings_follow_arguments() -> AppResult<()> {
    let args = PlowArgs::try_parse_from([
        "plowtrack",
        "--trail-lookback",
        "15m",
        "--trail-limit",
        "300",
        "--recent-window",
        "2h",
        "--default-hours",
        "8",
        "stats",
    ])?;
    let settings = playback_settings(&args)?;
    if settings.refresh_interval.is_some() {
        return Err(AppError::validation("Refresh should be off by default"));
    }
    if settings.trail_lookback != TimeDelta::minutes(15) || settings.trail_limit != 300 {
        return Err(AppError::validation("Unexpected trail settings"));
    }
    if settings.recent_window != TimeDelta::hours(2) {
        return Err(AppError::validation("Unexpected recent window"));
    }
    if settings.default_preset != RangePreset::Hours(8) {
        return Err(AppError::validation("Unexpected default preset"));
    }
    Ok(())
}

#[test]
fn coverage_preset_prefers_date_then_hours() -> AppResult<()> {
    let with_date = PlowArgs::try_parse_from(["plowtrack", "coverage", "--date", "2026-01-15"])?;
    let with_hours = PlowArgs::try_parse_from(["plowtrack", "coverage", "--hours", "3"])?;
    let bare = PlowArgs::try_parse_from(["plowtrack", "coverage"])?;
    let fallback = RangePreset::Hours(24);
    let day = NaiveDate::from_ymd_opt(2026, 1, 15).ok_or_else(|| AppError::validation("invalid test date"))?;

    let resolved: Vec<RangePreset> = [with_date, with_hours, bare]
        .iter()
        .filter_map(|args| match &args.command {
            Command::Coverage(command) => Some(coverage_preset(command, fallback)),
            Command::Trail(_) | Command::Watch(_) | Command::Stats => None,
        })
        .collect();
    if resolved != [RangePreset::Date(day), RangePreset::Hours(3), fallback] {
        return Err(AppError::validation(format!(
            "Unexpected presets {:?}",
            resolved
        )));
    }
    Ok(())
}

#[test]
fn snapshot_document_of_idle_controller() -> AppResult<()> {
    let source = HttpTrackSource::new("http://127.0.0.1:9", Duration::from_secs(1))?;
    let controller =
        PlaybackController::new(source, SnapshotSurface::new(), PlaybackSettings::default());
    let document = snapshot_document(&controller, None);

    if document.get("mode").and_then(serde_json::Value::as_str) != Some("realtime") {
        return Err(AppError::validation(format!("Unexpected mode in {}", document)));
    }
    if document.get("scrub").and_then(serde_json::Value::as_u64) != Some(1000) {
        return Err(AppError::validation("Scrub should default to the end"));
    }
    let layers = document
        .pointer("/surface/layers")
        .and_then(serde_json::Value::as_object)
        .ok_or_else(|| AppError::validation("Missing layers"))?;
    if !layers.is_empty() || !document.get("range").is_some_and(serde_json::Value::is_null) {
        return Err(AppError::validation("Idle controller should have nothing drawn"));
    }
    Ok(())
}

#[test]
fn trail_target_needs_a_live_vehicle_only_without_reference() -> AppResult<()> {
    let reference = DateTime::from_timestamp(1_770_710_400, 0)
        .ok_or_else(|| AppError::validation("invalid test timestamp"))?;

    let historical = trail_target(None, "412", Some(reference))?;
    if historical.vehicle_id != "412" || historical.timestamp != reference {
        return Err(AppError::validation(format!(
            "Unexpected historical target {:?}",
            historical
        )));
    }
    if trail_target(None, "412", None).is_ok() {
        return Err(AppError::validation(
            "A vehicle that is not reporting needs --at",
        ));
    }

    let live = trail_target(Some(historical.clone()), "412", None)?;
    if live != historical {
        return Err(AppError::validation("Live vehicle should pass through"));
    }
    let earlier = reference - TimeDelta::hours(3);
    let moved = trail_target(Some(historical), "412", Some(earlier))?;
    if moved.timestamp != earlier {
        return Err(AppError::validation("--at should anchor a live vehicle too"));
    }
    Ok(())
}
