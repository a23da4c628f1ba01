use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::args::{PlowArgs, TrailArgs};
use crate::controller::PlaybackController;
use crate::error::{AppError, AppResult, ValidationError};
use crate::fetch::HttpTrackSource;
use crate::render::SnapshotSurface;
use crate::tracks::{Coordinate, VehicleStatus};

use super::output::{snapshot_document, write_document};
use super::playback_settings;

pub(super) async fn run_trail(
    source: HttpTrackSource,
    args: &PlowArgs,
    command: &TrailArgs,
) -> AppResult<()> {
    let controller =
        PlaybackController::new(source, SnapshotSurface::new(), playback_settings(args)?);
    controller.start().await?;

    let vehicle = trail_target(
        controller.vehicle(&command.vehicle_id),
        &command.vehicle_id,
        command.at,
    )?;

    let outcome = controller.select_vehicle(&vehicle).await?;
    info!(vehicle = %vehicle.vehicle_id, "Trail {:?}", outcome);
    controller.stop();
    write_document(
        &snapshot_document(&controller, None),
        command.output.as_deref(),
    )
}

/// The vehicle whose trail is drawn.
///
/// Without `at` the vehicle must be reporting live, and its own timestamp
/// anchors the window. With `at` the id alone is enough, so vehicles that
/// stopped reporting can still be traced.
pub(super) fn trail_target(
    live: Option<VehicleStatus>,
    vehicle_id: &str,
    at: Option<DateTime<Utc>>,
) -> AppResult<VehicleStatus> {
    match (live, at) {
        (Some(mut vehicle), Some(reference)) => {
            vehicle.timestamp = reference;
            Ok(vehicle)
        }
        (Some(vehicle), None) => Ok(vehicle),
        (None, Some(reference)) => {
            debug!(vehicle = %vehicle_id, "Not reporting live; tracing from --at");
            Ok(VehicleStatus {
                vehicle_id: vehicle_id.to_owned(),
                vehicle_type: String::new(),
                description: String::new(),
                speed: 0.0,
                bearing: 0,
                timestamp: reference,
                position: Coordinate::new(0.0, 0.0),
            })
        }
        (None, None) => Err(AppError::validation(ValidationError::UnknownVehicle {
            vehicle_id: vehicle_id.to_owned(),
        })),
    }
}
