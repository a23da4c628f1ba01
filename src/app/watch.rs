use tokio::time::{MissedTickBehavior, interval};
use tracing::{info, warn};

use crate::args::{PlowArgs, WatchArgs};
use crate::controller::PlaybackController;
use crate::error::AppResult;
use crate::fetch::HttpTrackSource;
use crate::render::{LayerId, SnapshotSurface};
use crate::system::shutdown::{setup_signal_shutdown_handler, shutdown_channel};

use super::playback_settings;

pub(super) async fn run_watch(
    source: HttpTrackSource,
    args: &PlowArgs,
    command: &WatchArgs,
) -> AppResult<()> {
    let period = command.interval.unwrap_or(args.refresh_interval);
    let mut settings = playback_settings(args)?;
    settings.refresh_interval = Some(period);
    let controller = PlaybackController::new(source, SnapshotSurface::new(), settings);

    let (shutdown_tx, mut shutdown_rx) = shutdown_channel();
    let signal_handle = setup_signal_shutdown_handler(&shutdown_tx);

    let shown = controller.start().await?;
    info!(vehicles = shown, "Watching live vehicles; press Ctrl+C to stop");

    if let Some(vehicle_id) = command.follow.as_deref() {
        match controller.vehicle(vehicle_id) {
            Some(vehicle) => {
                let outcome = controller.select_vehicle(&vehicle).await?;
                info!(vehicle = vehicle_id, "Following: {:?}", outcome);
            }
            None => warn!(vehicle = vehicle_id, "Vehicle to follow is not reporting"),
        }
    }

    let mut status = interval(period);
    status.set_missed_tick_behavior(MissedTickBehavior::Skip);
    status.tick().await;
    loop {
        tokio::select! {
            _ = shutdown_rx.recv() => break,
            _ = status.tick() => {
                let trail_points = controller.with_surface(|surface| {
                    surface
                        .layer(LayerId::VehicleTrailDots)
                        .map_or(0, |layer| layer.data.len())
                });
                info!(
                    vehicles = controller.vehicles().len(),
                    following = ?controller.selected_vehicle(),
                    trail_points,
                    "Live status"
                );
            }
        }
    }

    info!("Stopping");
    controller.stop();
    drop(shutdown_tx.send(()));
    signal_handle.await?;
    Ok(())
}
