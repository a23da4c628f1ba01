use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TrackError;

/// `(lon, lat)` in the data source's reference system.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lon: f64,
    pub lat: f64,
}

impl Coordinate {
    #[must_use]
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    #[must_use]
    pub const fn to_pair(self) -> [f64; 2] {
        [self.lon, self.lat]
    }
}

/// One vehicle's path through a coverage window.
///
/// `coordinates[i]` was recorded at `timestamps[i]`; timestamps never decrease.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleTrack {
    vehicle_id: String,
    vehicle_type: String,
    coordinates: Vec<Coordinate>,
    timestamps: Vec<DateTime<Utc>>,
}

impl VehicleTrack {
    /// # Errors
    ///
    /// Returns a `TrackError` when lengths differ or time runs backwards.
    pub fn new(
        vehicle_id: String,
        vehicle_type: String,
        coordinates: Vec<Coordinate>,
        timestamps: Vec<DateTime<Utc>>,
    ) -> Result<Self, TrackError> {
        if coordinates.len() != timestamps.len() {
            return Err(TrackError::LengthMismatch {
                coordinates: coordinates.len(),
                timestamps: timestamps.len(),
            });
        }
        if let Some(offset) = timestamps
            .windows(2)
            .position(|pair| matches!(pair, [earlier, later] if later < earlier))
        {
            return Err(TrackError::TimestampsDecrease {
                index: offset.saturating_add(1),
            });
        }
        Ok(Self {
            vehicle_id,
            vehicle_type,
            coordinates,
            timestamps,
        })
    }

    #[must_use]
    pub fn vehicle_id(&self) -> &str {
        &self.vehicle_id
    }

    #[must_use]
    pub fn vehicle_type(&self) -> &str {
        &self.vehicle_type
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.coordinates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }

    /// Points paired with their timestamps, oldest first.
    pub fn points(&self) -> impl Iterator<Item = (Coordinate, DateTime<Utc>)> + '_ {
        self.coordinates
            .iter()
            .copied()
            .zip(self.timestamps.iter().copied())
    }
}

/// Every track active in one loaded time window.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoverageDataset {
    tracks: Vec<VehicleTrack>,
}

impl CoverageDataset {
    #[must_use]
    pub const fn new(tracks: Vec<VehicleTrack>) -> Self {
        Self { tracks }
    }

    #[must_use]
    pub fn tracks(&self) -> &[VehicleTrack] {
        &self.tracks
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    #[must_use]
    pub fn point_count(&self) -> usize {
        self.tracks.iter().map(VehicleTrack::len).sum()
    }
}

/// Latest reported state of one live vehicle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleStatus {
    pub vehicle_id: String,
    pub vehicle_type: String,
    pub description: String,
    pub speed: f64,
    pub bearing: i32,
    pub timestamp: DateTime<Utc>,
    pub position: Coordinate,
}

/// One sample of a vehicle's recent history.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistoryPoint {
    pub position: Coordinate,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceStats {
    pub total_positions: u64,
    pub total_vehicles: u64,
    pub earliest: Option<DateTime<Utc>>,
    pub latest: Option<DateTime<Utc>>,
    pub db_size_bytes: Option<u64>,
}

/// Keeps vehicles that reported strictly within `window` before `now`.
#[must_use]
pub fn filter_recent(
    vehicles: Vec<VehicleStatus>,
    now: DateTime<Utc>,
    window: TimeDelta,
) -> Vec<VehicleStatus> {
    let Some(cutoff) = now.checked_sub_signed(window) else {
        return vehicles;
    };
    vehicles
        .into_iter()
        .filter(|vehicle| vehicle.timestamp > cutoff)
        .collect()
}
