use chrono::{DateTime, TimeDelta, TimeZone, Utc};

use super::wire::{CoverageResponse, HistoryResponse, VehiclesResponse};
use super::{Coordinate, SourceStats, TrackError, VehicleTrack, filter_recent};

fn at(hour: u32, minute: u32) -> Result<DateTime<Utc>, String> {
    Utc.with_ymd_and_hms(2026, 2, 10, hour, minute, 0)
        .single()
        .ok_or_else(|| "invalid test timestamp".to_owned())
}

#[test]
fn track_rejects_length_mismatch() -> Result<(), String> {
    let result = VehicleTrack::new(
        "7".to_owned(),
        "LOADER".to_owned(),
        vec![Coordinate::new(0.0, 0.0), Coordinate::new(1.0, 1.0)],
        vec![at(8, 0)?],
    );
    match result {
        Err(TrackError::LengthMismatch {
            coordinates: 2,
            timestamps: 1,
        }) => Ok(()),
        other => Err(format!("Unexpected result {:?}", other)),
    }
}

#[test]
fn track_rejects_time_running_backwards() -> Result<(), String> {
    let result = VehicleTrack::new(
        "7".to_owned(),
        "LOADER".to_owned(),
        vec![
            Coordinate::new(0.0, 0.0),
            Coordinate::new(1.0, 1.0),
            Coordinate::new(2.0, 2.0),
        ],
        vec![at(8, 0)?, at(8, 5)?, at(8, 1)?],
    );
    match result {
        Err(TrackError::TimestampsDecrease { index: 2 }) => Ok(()),
        other => Err(format!("Unexpected result {:?}", other)),
    }
}

#[test]
fn track_errors_read_as_std_errors() -> Result<(), String> {
    let err: Box<dyn std::error::Error> = Box::new(TrackError::LengthMismatch {
        coordinates: 2,
        timestamps: 1,
    });
    if err.to_string() != "2 coordinates but 1 timestamps" {
        return Err(format!("Unexpected message {}", err));
    }
    let decrease = TrackError::TimestampsDecrease { index: 4 }.to_string();
    if decrease != "timestamp 4 precedes its predecessor" {
        return Err(format!("Unexpected message {}", decrease));
    }
    Ok(())
}

#[test]
fn track_accepts_repeated_timestamps() -> Result<(), String> {
    let track = VehicleTrack::new(
        "7".to_owned(),
        "LOADER".to_owned(),
        vec![Coordinate::new(0.0, 0.0), Coordinate::new(1.0, 1.0)],
        vec![at(8, 0)?, at(8, 0)?],
    )
    .map_err(|err| err.to_string())?;
    if track.points().count() != 2 {
        return Err("Expected two points".to_owned());
    }
    Ok(())
}

#[test]
fn coverage_response_skips_malformed_tracks() -> Result<(), String> {
    let body = r#"{
  "type": "FeatureCollection",
  "features": [
    {
      "type": "Feature",
      "geometry": { "type": "LineString", "coordinates": [[-52.71, 47.56], [-52.70, 47.57]] },
      "properties": {
        "vehicle_id": "101",
        "vehicle_type": "SA PLOW TRUCK",
        "timestamps": ["2026-02-10T08:00:00Z", "2026-02-10T08:00:06+00:00"]
      }
    },
    {
      "type": "Feature",
      "geometry": { "type": "LineString", "coordinates": [[-52.71, 47.56]] },
      "properties": { "vehicle_id": "102", "vehicle_type": "GRADER", "timestamps": [] }
    }
  ]
}"#;
    let response: CoverageResponse = serde_json::from_str(body).map_err(|err| err.to_string())?;
    let dataset = response.into_dataset();
    if dataset.len() != 1 {
        return Err(format!("Expected one valid track, got {}", dataset.len()));
    }
    let track = dataset.tracks().first().ok_or("missing track")?;
    if track.vehicle_id() != "101" || track.vehicle_type() != "SA PLOW TRUCK" {
        return Err(format!("Unexpected track {:?}", track));
    }
    if dataset.point_count() != 2 {
        return Err(format!("Unexpected point count {}", dataset.point_count()));
    }
    Ok(())
}

#[test]
fn empty_coverage_response_is_an_empty_dataset() -> Result<(), String> {
    let response: CoverageResponse =
        serde_json::from_str(r#"{"type": "FeatureCollection"}"#).map_err(|err| err.to_string())?;
    if !response.into_dataset().is_empty() {
        return Err("Expected empty dataset".to_owned());
    }
    Ok(())
}

#[test]
fn history_response_is_sorted_oldest_first() -> Result<(), String> {
    let body = r#"{
  "features": [
    { "geometry": { "coordinates": [2.0, 2.0] }, "properties": { "timestamp": "2026-02-10T08:02:00Z" } },
    { "geometry": { "coordinates": [1.0, 1.0] }, "properties": { "timestamp": "2026-02-10T08:01:00Z" } }
  ]
}"#;
    let response: HistoryResponse = serde_json::from_str(body).map_err(|err| err.to_string())?;
    let history = response.into_history();
    let first = history.first().ok_or("missing first point")?;
    if first.timestamp != at(8, 1)? || first.position != Coordinate::new(1.0, 1.0) {
        return Err(format!("Unexpected first point {:?}", first));
    }
    Ok(())
}

#[test]
fn vehicles_response_fills_optional_fields() -> Result<(), String> {
    let body = r#"{
  "features": [
    {
      "geometry": { "coordinates": [-52.7, 47.5] },
      "properties": { "vehicle_id": "9", "timestamp": "2026-02-10T08:00:00Z", "speed": 31.5, "bearing": 270 }
    }
  ]
}"#;
    let response: VehiclesResponse = serde_json::from_str(body).map_err(|err| err.to_string())?;
    let vehicles = response.into_vehicles();
    let vehicle = vehicles.first().ok_or("missing vehicle")?;
    if vehicle.vehicle_id != "9" || vehicle.bearing != 270 || !vehicle.description.is_empty() {
        return Err(format!("Unexpected vehicle {:?}", vehicle));
    }
    Ok(())
}

#[test]
fn filter_recent_drops_stale_vehicles() -> Result<(), String> {
    let body = r#"{
  "features": [
    { "geometry": { "coordinates": [0.0, 0.0] }, "properties": { "vehicle_id": "fresh", "timestamp": "2026-02-10T07:00:00Z" } },
    { "geometry": { "coordinates": [0.0, 0.0] }, "properties": { "vehicle_id": "stale", "timestamp": "2026-02-08T07:00:00Z" } }
  ]
}"#;
    let response: VehiclesResponse = serde_json::from_str(body).map_err(|err| err.to_string())?;
    let kept = filter_recent(response.into_vehicles(), at(9, 0)?, TimeDelta::hours(24));
    let ids: Vec<&str> = kept.iter().map(|vehicle| vehicle.vehicle_id.as_str()).collect();
    if ids != ["fresh"] {
        return Err(format!("Unexpected vehicles {:?}", ids));
    }
    Ok(())
}

#[test]
fn stats_tolerate_missing_bounds() -> Result<(), String> {
    let stats: SourceStats = serde_json::from_str(r#"{"total_positions": 0, "total_vehicles": 0}"#)
        .map_err(|err| err.to_string())?;
    if stats.earliest.is_some() || stats.db_size_bytes.is_some() {
        return Err(format!("Unexpected stats {:?}", stats));
    }
    Ok(())
}
