//! Surface-agnostic rendering of coverage playback and vehicle trails.
mod coverage;
mod geojson;
mod opacity;
mod palette;
mod snapshot;
mod surface;
mod trail;


pub use coverage::{
    CoverageView, HeatPoint, LoadedCoverage, PlaybackFrame, PlaybackRenderer, RenderedSegment,
    SEGMENT_OPACITY_FLOOR, SEGMENT_OPACITY_SPAN, heat_points, line_segments,
};
pub use geojson::feature_collection;
pub use opacity::{OPACITY_SCALE, Opacity, ramp};
pub use palette::{
    DEFAULT_VEHICLE_COLOR, GRADER_COLOR, LOADER_COLOR, PLOW_TRUCK_COLOR, TRAIL_COLOR,
    vehicle_color,
};
pub use snapshot::{SnapshotLayer, SnapshotSurface, SurfaceOp};
pub use surface::{
    FeatureSet, HEATMAP_STYLE, HeatmapStyle, LayerId, LayerKind, LayerSpec, MapSurfacePort,
    ZoomStop, remove_if_present, set_visible_if_present, upsert_layer,
};
pub use trail::{
    SINGLE_POINT_OPACITY, TRAIL_OPACITY_FLOOR, TRAIL_OPACITY_SPAN, TrailPoint, TrailRenderer,
    TrailSegment, TrailUpdate, trail_points, trail_segments,
};
