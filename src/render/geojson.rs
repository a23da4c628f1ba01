//! GeoJSON encoding of rendered feature sets.
use serde_json::{Value, json};

use super::surface::FeatureSet;
use crate::tracks::{Coordinate, VehicleStatus};

fn point(position: Coordinate, properties: Value) -> Value {
    json!({
        "type": "Feature",
        "geometry": { "type": "Point", "coordinates": position.to_pair() },
        "properties": properties,
    })
}

fn line(from: Coordinate, to: Coordinate, properties: Value) -> Value {
    json!({
        "type": "Feature",
        "geometry": {
            "type": "LineString",
            "coordinates": [from.to_pair(), to.to_pair()],
        },
        "properties": properties,
    })
}

fn vehicle(status: &VehicleStatus) -> Value {
    point(
        status.position,
        json!({
            "vehicle_id": status.vehicle_id,
            "vehicle_type": status.vehicle_type,
            "description": status.description,
            "speed": status.speed,
            "bearing": status.bearing,
            "timestamp": status.timestamp,
        }),
    )
}

/// Encodes a feature set as a GeoJSON `FeatureCollection`.
#[must_use]
pub fn feature_collection(data: &FeatureSet) -> Value {
    let features: Vec<Value> = match data {
        FeatureSet::Vehicles(vehicles) => vehicles.iter().map(vehicle).collect(),
        FeatureSet::Segments(segments) => segments
            .iter()
            .map(|segment| {
                line(
                    segment.from,
                    segment.to,
                    json!({ "seg_opacity": segment.opacity, "seg_color": segment.color }),
                )
            })
            .collect(),
        FeatureSet::HeatPoints(points) => points
            .iter()
            .map(|heat| point(heat.position, json!({})))
            .collect(),
        FeatureSet::TrailPoints(points) => points
            .iter()
            .map(|trail| {
                point(
                    trail.position,
                    json!({
                        "timestamp": trail.timestamp,
                        "trail_opacity": trail.opacity,
                        "stroke_opacity": trail.stroke_opacity,
                    }),
                )
            })
            .collect(),
        FeatureSet::TrailSegments(segments) => segments
            .iter()
            .map(|segment| {
                line(
                    segment.from,
                    segment.to,
                    json!({ "seg_opacity": segment.opacity }),
                )
            })
            .collect(),
    };
    json!({ "type": "FeatureCollection", "features": features })
}
