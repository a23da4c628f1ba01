use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};

use crate::error::{FetchError, ValidationError};
use crate::timeline::TimeRange;
use crate::tracks::{CoverageDataset, HistoryPoint, SourceStats, VehicleStatus};

/// Lookback of a vehicle trail.
pub const DEFAULT_TRAIL_LOOKBACK: TimeDelta = TimeDelta::minutes(10);
/// Maximum number of history points requested for a trail.
pub const DEFAULT_TRAIL_LIMIT: u32 = 2000;

/// Window and point budget for one vehicle-history request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryWindow {
    pub range: TimeRange,
    pub limit: u32,
}

impl HistoryWindow {
    /// Trail window ending at `reference` when given, otherwise at `now`.
    ///
    /// # Errors
    ///
    /// Returns an error when the lookback underflows the calendar.
    pub fn ending_at(
        reference: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
        lookback: TimeDelta,
        limit: u32,
    ) -> Result<Self, ValidationError> {
        let until = reference.unwrap_or(now);
        Ok(Self {
            range: TimeRange::ending_at(until, lookback)?,
            limit,
        })
    }
}

/// Read access to the vehicle data source.
#[async_trait(?Send)]
pub trait TrackSourcePort {
    /// Current position of every vehicle known to the source.
    async fn vehicles(&self) -> Result<Vec<VehicleStatus>, FetchError>;

    /// Recent positions of one vehicle, oldest first.
    async fn history(
        &self,
        vehicle_id: &str,
        window: &HistoryWindow,
    ) -> Result<Vec<HistoryPoint>, FetchError>;

    /// Every track active within `range`.
    async fn coverage(&self, range: &TimeRange) -> Result<CoverageDataset, FetchError>;

    async fn stats(&self) -> Result<SourceStats, FetchError>;
}
