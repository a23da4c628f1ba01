//! JSON shapes returned by the data source endpoints.
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::warn;

use super::types::{Coordinate, CoverageDataset, HistoryPoint, VehicleStatus, VehicleTrack};

#[derive(Debug, Deserialize)]
pub(crate) struct FeatureCollection<G, P> {
    #[serde(default = "Vec::new")]
    pub(crate) features: Vec<Feature<G, P>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Feature<G, P> {
    pub(crate) geometry: G,
    pub(crate) properties: P,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PointGeometry {
    pub(crate) coordinates: [f64; 2],
}

#[derive(Debug, Deserialize)]
pub(crate) struct LineGeometry {
    #[serde(default)]
    pub(crate) coordinates: Vec<[f64; 2]>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct VehicleProperties {
    pub(crate) vehicle_id: String,
    #[serde(default)]
    pub(crate) vehicle_type: String,
    #[serde(default)]
    pub(crate) description: String,
    #[serde(default)]
    pub(crate) speed: f64,
    #[serde(default)]
    pub(crate) bearing: i32,
    pub(crate) timestamp: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct HistoryProperties {
    pub(crate) timestamp: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CoverageProperties {
    pub(crate) vehicle_id: String,
    #[serde(default)]
    pub(crate) vehicle_type: String,
    #[serde(default)]
    pub(crate) timestamps: Vec<DateTime<Utc>>,
}

pub(crate) type VehiclesResponse = FeatureCollection<PointGeometry, VehicleProperties>;
pub(crate) type HistoryResponse = FeatureCollection<PointGeometry, HistoryProperties>;
pub(crate) type CoverageResponse = FeatureCollection<LineGeometry, CoverageProperties>;

const fn coordinate([lon, lat]: [f64; 2]) -> Coordinate {
    Coordinate::new(lon, lat)
}

impl VehiclesResponse {
    pub(crate) fn into_vehicles(self) -> Vec<VehicleStatus> {
        self.features
            .into_iter()
            .map(|feature| VehicleStatus {
                vehicle_id: feature.properties.vehicle_id,
                vehicle_type: feature.properties.vehicle_type,
                description: feature.properties.description,
                speed: feature.properties.speed,
                bearing: feature.properties.bearing,
                timestamp: feature.properties.timestamp,
                position: coordinate(feature.geometry.coordinates),
            })
            .collect()
    }
}

impl HistoryResponse {
    /// History points ordered oldest first.
    pub(crate) fn into_history(self) -> Vec<HistoryPoint> {
        let mut points: Vec<HistoryPoint> = self
            .features
            .into_iter()
            .map(|feature| HistoryPoint {
                position: coordinate(feature.geometry.coordinates),
                timestamp: feature.properties.timestamp,
            })
            .collect();
        points.sort_by_key(|point| point.timestamp);
        points
    }
}

impl CoverageResponse {
    /// Builds the dataset, dropping tracks whose shape is inconsistent.
    pub(crate) fn into_dataset(self) -> CoverageDataset {
        let mut tracks = Vec::with_capacity(self.features.len());
        for feature in self.features {
            let vehicle_id = feature.properties.vehicle_id;
            let coordinates = feature
                .geometry
                .coordinates
                .into_iter()
                .map(coordinate)
                .collect();
            match VehicleTrack::new(
                vehicle_id.clone(),
                feature.properties.vehicle_type,
                coordinates,
                feature.properties.timestamps,
            ) {
                Ok(track) => tracks.push(track),
                Err(err) => warn!(vehicle_id = %vehicle_id, "Skipping malformed track: {}", err),
            }
        }
        CoverageDataset::new(tracks)
    }
}
