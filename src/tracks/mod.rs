//! Vehicle track data as delivered by the data source.
mod types;
pub(crate) mod wire;

#[cfg(test)]
mod tests;

pub use crate::error::TrackError;
pub use types::{
    Coordinate, CoverageDataset, HistoryPoint, SourceStats, VehicleStatus, VehicleTrack,
    filter_recent,
};
