use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use super::opacity::{Opacity, ramp};
use super::surface::{FeatureSet, LayerId, MapSurfacePort, remove_if_present, upsert_layer};
use crate::tracks::{Coordinate, HistoryPoint};

pub const TRAIL_OPACITY_FLOOR: Opacity = Opacity::from_millionths(150_000);
pub const TRAIL_OPACITY_SPAN: Opacity = Opacity::from_millionths(550_000);
/// Opacity of a trail made of a single point.
pub const SINGLE_POINT_OPACITY: Opacity = Opacity::from_millionths(700_000);

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrailPoint {
    pub position: Coordinate,
    pub timestamp: DateTime<Utc>,
    pub opacity: Opacity,
    pub stroke_opacity: Opacity,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrailSegment {
    pub from: Coordinate,
    pub to: Coordinate,
    pub opacity: Opacity,
}

/// Ages history points from faint (oldest) to strong (newest).
#[must_use]
pub fn trail_points(history: &[HistoryPoint]) -> Vec<TrailPoint> {
    let last = i64::try_from(history.len().saturating_sub(1)).unwrap_or(i64::MAX);
    history
        .iter()
        .zip(0_i64..)
        .map(|(point, index)| {
            let opacity = if last == 0 {
                SINGLE_POINT_OPACITY
            } else {
                ramp(TRAIL_OPACITY_FLOOR, TRAIL_OPACITY_SPAN, index, last)
            };
            TrailPoint {
                position: point.position,
                timestamp: point.timestamp,
                opacity,
                stroke_opacity: opacity.scale(4, 5),
            }
        })
        .collect()
}

/// Segment `i -> i+1` takes the opacity of point `i`.
#[must_use]
pub fn trail_segments(points: &[TrailPoint]) -> Vec<TrailSegment> {
    points
        .windows(2)
        .filter_map(|pair| match pair {
            [from, to] => Some(TrailSegment {
                from: from.position,
                to: to.position,
                opacity: from.opacity,
            }),
            _ => None,
        })
        .collect()
}

/// Whether trail data replaces what is drawn or refreshes it in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrailUpdate {
    /// First display for a selection.
    Replace,
    /// Periodic refresh of the current selection.
    Refresh,
}

/// Draws the selected vehicle's recent history.
#[derive(Debug, Default)]
pub struct TrailRenderer {
    points: usize,
}

impl TrailRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of points currently drawn.
    #[must_use]
    pub const fn shown_points(&self) -> usize {
        self.points
    }

    /// Applies a history result; an empty result leaves the trail untouched.
    ///
    /// Returns whether the surface was updated.
    pub fn apply<M>(&mut self, history: &[HistoryPoint], update: TrailUpdate, surface: &mut M) -> bool
    where
        M: MapSurfacePort + ?Sized,
    {
        if history.is_empty() {
            debug!(?update, "Empty trail history; keeping current trail");
            return false;
        }
        if update == TrailUpdate::Replace {
            Self::remove_layers(surface);
        }
        let points = trail_points(history);
        let segments = trail_segments(&points);
        self.points = points.len();
        upsert_layer(surface, LayerId::VehicleTrailLine, FeatureSet::TrailSegments(segments));
        upsert_layer(surface, LayerId::VehicleTrailDots, FeatureSet::TrailPoints(points));
        true
    }

    pub fn clear<M>(&mut self, surface: &mut M)
    where
        M: MapSurfacePort + ?Sized,
    {
        self.points = 0;
        Self::remove_layers(surface);
    }

    fn remove_layers<M>(surface: &mut M)
    where
        M: MapSurfacePort + ?Sized,
    {
        remove_if_present(surface, LayerId::VehicleTrailLine);
        remove_if_present(surface, LayerId::VehicleTrailDots);
    }
}
