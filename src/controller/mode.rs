use serde::Serialize;

use crate::render::CoverageView;

/// Top-level display state of the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViewMode {
    /// Live vehicle positions, refreshed periodically.
    #[default]
    Realtime,
    CoverageLines,
    CoverageHeatmap,
}

impl ViewMode {
    #[must_use]
    pub const fn coverage_view(self) -> Option<CoverageView> {
        match self {
            ViewMode::Realtime => None,
            ViewMode::CoverageLines => Some(CoverageView::Lines),
            ViewMode::CoverageHeatmap => Some(CoverageView::Heatmap),
        }
    }

    #[must_use]
    pub const fn is_coverage(self) -> bool {
        self.coverage_view().is_some()
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ViewMode::Realtime => "realtime",
            ViewMode::CoverageLines => "coverage-lines",
            ViewMode::CoverageHeatmap => "coverage-heatmap",
        }
    }
}

impl From<CoverageView> for ViewMode {
    fn from(view: CoverageView) -> Self {
        match view {
            CoverageView::Lines => ViewMode::CoverageLines,
            CoverageView::Heatmap => ViewMode::CoverageHeatmap,
        }
    }
}
