use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use super::opacity::{Opacity, ramp};
use super::palette::vehicle_color;
use super::surface::{
    FeatureSet, LayerId, MapSurfacePort, remove_if_present, set_visible_if_present, upsert_layer,
};
use crate::timeline::{ScrubPosition, TimeRange, scrub_to_instant};
use crate::tracks::{Coordinate, CoverageDataset};

/// Opacity of the oldest visible segment.
pub const SEGMENT_OPACITY_FLOOR: Opacity = Opacity::from_millionths(150_000);
/// Opacity added across the window; the newest segment reaches `0.80`.
pub const SEGMENT_OPACITY_SPAN: Opacity = Opacity::from_millionths(650_000);

/// How a loaded coverage dataset is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CoverageView {
    #[default]
    Lines,
    Heatmap,
}

impl CoverageView {
    #[must_use]
    pub const fn layer(self) -> LayerId {
        match self {
            CoverageView::Lines => LayerId::CoverageLines,
            CoverageView::Heatmap => LayerId::CoverageHeatmap,
        }
    }

    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            CoverageView::Lines => CoverageView::Heatmap,
            CoverageView::Heatmap => CoverageView::Lines,
        }
    }
}

impl std::str::FromStr for CoverageView {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lines" | "line" => Ok(CoverageView::Lines),
            "heatmap" | "heat" => Ok(CoverageView::Heatmap),
            other => Err(format!("Unknown coverage view '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RenderedSegment {
    pub from: Coordinate,
    pub to: Coordinate,
    pub opacity: Opacity,
    pub color: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HeatPoint {
    pub position: Coordinate,
}

fn millis_between(later: DateTime<Utc>, earlier: DateTime<Utc>) -> i64 {
    later.signed_duration_since(earlier).num_milliseconds()
}

/// Line segments whose end point was recorded at or before `cutoff`.
///
/// Segment `i` is aged by how far `timestamps[i]` sits between the range
/// start and the cutoff.
#[must_use]
pub fn line_segments(
    dataset: &CoverageDataset,
    range: &TimeRange,
    cutoff: DateTime<Utc>,
) -> Vec<RenderedSegment> {
    let window_ms = millis_between(cutoff, range.since());
    let mut segments = Vec::new();
    for track in dataset.tracks() {
        let color = vehicle_color(track.vehicle_type());
        let points: Vec<(Coordinate, DateTime<Utc>)> = track.points().collect();
        segments.extend(points.windows(2).filter_map(|pair| match pair {
            [(from, started), (to, ended)] if *ended <= cutoff => Some(RenderedSegment {
                from: *from,
                to: *to,
                opacity: ramp(
                    SEGMENT_OPACITY_FLOOR,
                    SEGMENT_OPACITY_SPAN,
                    millis_between(*started, range.since()),
                    window_ms,
                ),
                color,
            }),
            _ => None,
        }));
    }
    segments
}

/// Every recorded point at or before `cutoff`; density does the styling.
#[must_use]
pub fn heat_points(dataset: &CoverageDataset, cutoff: DateTime<Utc>) -> Vec<HeatPoint> {
    dataset
        .tracks()
        .iter()
        .flat_map(|track| track.points())
        .filter(|(_, recorded)| *recorded <= cutoff)
        .map(|(position, _)| HeatPoint { position })
        .collect()
}

/// Range and dataset committed together by a successful load.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedCoverage {
    pub range: TimeRange,
    pub dataset: CoverageDataset,
}

/// Summary of one render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlaybackFrame {
    pub cutoff: DateTime<Utc>,
    pub view: CoverageView,
    pub features: usize,
}

/// Owns the loaded coverage window and draws it at the scrub cursor.
#[derive(Debug, Default)]
pub struct PlaybackRenderer {
    loaded: Option<LoadedCoverage>,
    scrub: ScrubPosition,
}

impl PlaybackRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Commits a new window; the cursor returns to the end of it.
    pub fn replace(&mut self, range: TimeRange, dataset: CoverageDataset) {
        self.loaded = Some(LoadedCoverage { range, dataset });
        self.scrub = ScrubPosition::END;
    }

    pub fn discard(&mut self) {
        self.loaded = None;
        self.scrub = ScrubPosition::END;
    }

    #[must_use]
    pub const fn loaded(&self) -> Option<&LoadedCoverage> {
        self.loaded.as_ref()
    }

    #[must_use]
    pub const fn scrub(&self) -> ScrubPosition {
        self.scrub
    }

    pub const fn set_scrub(&mut self, position: ScrubPosition) {
        self.scrub = position;
    }

    /// Instant the cursor currently points at, when a window is loaded.
    #[must_use]
    pub fn cutoff(&self) -> Option<DateTime<Utc>> {
        self.loaded
            .as_ref()
            .map(|loaded| scrub_to_instant(&loaded.range, self.scrub))
    }

    /// Draws the active view and hides the other one.
    ///
    /// Returns `None` without touching the surface when nothing is loaded.
    pub fn render<M>(&self, view: CoverageView, surface: &mut M) -> Option<PlaybackFrame>
    where
        M: MapSurfacePort + ?Sized,
    {
        let Some(loaded) = self.loaded.as_ref() else {
            debug!("No coverage loaded; skipping render");
            return None;
        };
        let cutoff = scrub_to_instant(&loaded.range, self.scrub);
        let features = match view {
            CoverageView::Lines => {
                FeatureSet::Segments(line_segments(&loaded.dataset, &loaded.range, cutoff))
            }
            CoverageView::Heatmap => FeatureSet::HeatPoints(heat_points(&loaded.dataset, cutoff)),
        };
        let count = features.len();
        upsert_layer(surface, view.layer(), features);
        surface.set_visible(view.layer(), true);
        set_visible_if_present(surface, view.other().layer(), false);
        Some(PlaybackFrame {
            cutoff,
            view,
            features: count,
        })
    }

    pub fn clear_layers<M>(surface: &mut M)
    where
        M: MapSurfacePort + ?Sized,
    {
        remove_if_present(surface, LayerId::CoverageLines);
        remove_if_present(surface, LayerId::CoverageHeatmap);
    }
}
