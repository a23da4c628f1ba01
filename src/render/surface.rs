use serde::Serialize;

use super::coverage::{HeatPoint, RenderedSegment};
use super::palette::TRAIL_COLOR;
use super::trail::{TrailPoint, TrailSegment};
use crate::tracks::VehicleStatus;

/// Every layer the engine draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayerId {
    VehicleCircles,
    VehicleTrailLine,
    VehicleTrailDots,
    CoverageLines,
    CoverageHeatmap,
}

impl LayerId {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            LayerId::VehicleCircles => "vehicle-circles",
            LayerId::VehicleTrailLine => "vehicle-trail-line",
            LayerId::VehicleTrailDots => "vehicle-trail-dots",
            LayerId::CoverageLines => "coverage-lines",
            LayerId::CoverageHeatmap => "coverage-heatmap",
        }
    }

    /// Static drawing description of the layer.
    #[must_use]
    pub const fn spec(self) -> LayerSpec {
        match self {
            LayerId::VehicleCircles => LayerSpec {
                id: self,
                kind: LayerKind::Circle {
                    radius: 7,
                    stroke_width: 2,
                },
                below: None,
            },
            LayerId::VehicleTrailLine => LayerSpec {
                id: self,
                kind: LayerKind::Line {
                    width: 3,
                    fixed_color: Some(TRAIL_COLOR),
                },
                below: Some(LayerId::VehicleCircles),
            },
            LayerId::VehicleTrailDots => LayerSpec {
                id: self,
                kind: LayerKind::Circle {
                    radius: 4,
                    stroke_width: 1,
                },
                below: Some(LayerId::VehicleCircles),
            },
            LayerId::CoverageLines => LayerSpec {
                id: self,
                kind: LayerKind::Line {
                    width: 3,
                    fixed_color: None,
                },
                below: None,
            },
            LayerId::CoverageHeatmap => LayerSpec {
                id: self,
                kind: LayerKind::Heatmap(HEATMAP_STYLE),
                below: None,
            },
        }
    }
}

/// `(zoom, value)` interpolation stop.
pub type ZoomStop = (u8, f64);

/// Density styling; the surface derives intensity from point count per area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HeatmapStyle {
    pub weight: f64,
    pub opacity: f64,
    pub intensity: &'static [ZoomStop],
    pub radius: &'static [ZoomStop],
    /// `(density, color)` ramp.
    pub color_ramp: &'static [(f64, &'static str)],
}

pub const HEATMAP_STYLE: HeatmapStyle = HeatmapStyle {
    weight: 0.5,
    opacity: 0.75,
    intensity: &[(10, 0.5), (12, 1.0), (15, 2.0)],
    radius: &[(10, 3.0), (12, 8.0), (14, 15.0), (16, 25.0)],
    color_ramp: &[
        (0.0, "rgba(0,0,0,0)"),
        (0.15, "#2563eb"),
        (0.35, "#60a5fa"),
        (0.55, "#fbbf24"),
        (0.75, "#f97316"),
        (1.0, "#ef4444"),
    ],
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LayerKind {
    /// Per-feature color and opacity unless `fixed_color` is set.
    Line {
        width: u8,
        fixed_color: Option<&'static str>,
    },
    Circle {
        radius: u8,
        stroke_width: u8,
    },
    Heatmap(HeatmapStyle),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LayerSpec {
    pub id: LayerId,
    pub kind: LayerKind,
    /// Layer this one is inserted beneath, when present.
    pub below: Option<LayerId>,
}

/// Data bound to one layer for one render cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureSet {
    Vehicles(Vec<VehicleStatus>),
    Segments(Vec<RenderedSegment>),
    HeatPoints(Vec<HeatPoint>),
    TrailPoints(Vec<TrailPoint>),
    TrailSegments(Vec<TrailSegment>),
}

impl FeatureSet {
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            FeatureSet::Vehicles(items) => items.len(),
            FeatureSet::Segments(items) => items.len(),
            FeatureSet::HeatPoints(items) => items.len(),
            FeatureSet::TrailPoints(items) => items.len(),
            FeatureSet::TrailSegments(items) => items.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Capability set of a map rendering surface.
///
/// Operations on layers that do not exist are ignored by implementations.
pub trait MapSurfacePort {
    fn has_layer(&self, layer: LayerId) -> bool;
    fn add_layer(&mut self, spec: LayerSpec, data: FeatureSet);
    fn set_data(&mut self, layer: LayerId, data: FeatureSet);
    fn set_visible(&mut self, layer: LayerId, visible: bool);
    fn remove_layer(&mut self, layer: LayerId);
}

/// Replaces the layer's data, creating the layer on first use.
pub fn upsert_layer<M>(surface: &mut M, layer: LayerId, data: FeatureSet)
where
    M: MapSurfacePort + ?Sized,
{
    if surface.has_layer(layer) {
        surface.set_data(layer, data);
    } else {
        surface.add_layer(layer.spec(), data);
    }
}

pub fn set_visible_if_present<M>(surface: &mut M, layer: LayerId, visible: bool)
where
    M: MapSurfacePort + ?Sized,
{
    if surface.has_layer(layer) {
        surface.set_visible(layer, visible);
    }
}

pub fn remove_if_present<M>(surface: &mut M, layer: LayerId)
where
    M: MapSurfacePort + ?Sized,
{
    if surface.has_layer(layer) {
        surface.remove_layer(layer);
    }
}
