use tracing::info;

use crate::args::{CoverageArgs, PlowArgs};
use crate::controller::{LoadOutcome, PlaybackController};
use crate::error::{AppError, AppResult};
use crate::fetch::HttpTrackSource;
use crate::render::SnapshotSurface;
use crate::timeline::{RangePreset, format_range_label};

use super::output::{snapshot_document, write_document};
use super::playback_settings;

/// `--date` wins over `--hours`; neither falls back to the default window.
pub(super) const fn coverage_preset(command: &CoverageArgs, fallback: RangePreset) -> RangePreset {
    match (command.date, command.hours) {
        (Some(day), _) => RangePreset::Date(day),
        (None, Some(hours)) => RangePreset::Hours(hours),
        (None, None) => fallback,
    }
}

pub(super) async fn run_coverage(
    source: HttpTrackSource,
    args: &PlowArgs,
    command: &CoverageArgs,
) -> AppResult<()> {
    let mut settings = playback_settings(args)?;
    settings.default_preset = coverage_preset(command, settings.default_preset);
    let controller = PlaybackController::new(source, SnapshotSurface::new(), settings);

    let report = match controller.enter_coverage(command.view).await? {
        LoadOutcome::Loaded(report) => report,
        outcome @ (LoadOutcome::Superseded | LoadOutcome::Ignored) => {
            return Err(AppError::validation(format!(
                "Coverage load did not complete: {:?}",
                outcome
            )));
        }
    };
    info!(
        range = %format_range_label(&report.range),
        tracks = report.tracks,
        points = report.points,
        "Coverage window ready"
    );

    let frame = controller.set_scrub(command.scrub);
    if let Some(frame) = frame.as_ref() {
        info!(
            scrub = command.scrub.get(),
            features = frame.features,
            "Rendered {:?} view",
            frame.view
        );
    }
    controller.stop();
    write_document(
        &snapshot_document(&controller, frame.as_ref()),
        command.output.as_deref(),
    )
}
