use std::path::Path;

use serde_json::{Value, json};

use crate::controller::PlaybackController;
use crate::error::AppResult;
use crate::fetch::TrackSourcePort;
use crate::render::{PlaybackFrame, SnapshotSurface};
use crate::timeline::{format_cutoff_label, format_range_label};

/// Writes pretty JSON to `path`, or to stdout when no path is given.
pub(super) fn write_document(document: &Value, path: Option<&Path>) -> AppResult<()> {
    let rendered = serde_json::to_string_pretty(document)?;
    match path {
        Some(path) => {
            std::fs::write(path, rendered)?;
            tracing::info!(path = %path.display(), "Snapshot written");
        }
        None => println!("{}", rendered),
    }
    Ok(())
}

/// JSON view of a controller and every layer on its snapshot surface.
pub(super) fn snapshot_document<S>(
    controller: &PlaybackController<S, SnapshotSurface>,
    frame: Option<&PlaybackFrame>,
) -> Value
where
    S: TrackSourcePort + 'static,
{
    let range = controller.loaded_range().map(|range| {
        json!({
            "since": range.since(),
            "until": range.until(),
            "label": format_range_label(&range),
        })
    });
    let cutoff = controller.cutoff();
    json!({
        "mode": controller.mode(),
        "preset": controller.preset().label(),
        "range": range,
        "scrub": controller.scrub().get(),
        "cutoff": cutoff,
        "cutoff_label": cutoff.map(format_cutoff_label),
        "frame": frame,
        "tracks": controller.loaded_tracks(),
        "vehicles": controller.vehicles().len(),
        "selected_vehicle": controller.selected_vehicle(),
        "surface": controller.with_surface(SnapshotSurface::to_json),
    })
}
