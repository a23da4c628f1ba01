use std::cell::RefCell;
use std::rc::Rc;

use chrono::{DateTime, Utc};
use tracing::{debug, error, info};

use super::mode::ViewMode;
use super::refresh::RefreshTask;
use super::settings::PlaybackSettings;
use crate::error::{AppError, AppResult};
use crate::fetch::{FetchOutcome, FetchPurpose, FetchSlot, HistoryWindow, TrackSourcePort};
use crate::render::{
    CoverageView, FeatureSet, LayerId, MapSurfacePort, PlaybackFrame, PlaybackRenderer,
    TrailRenderer, TrailUpdate, set_visible_if_present, upsert_layer,
};
use crate::timeline::{
    RangePreset, ScrubPosition, TimeRange, format_cutoff_label, format_range_label,
};
use crate::tracks::{VehicleStatus, filter_recent};

/// Result of a coverage load request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded(LoadReport),
    /// A newer load was issued before this one resolved.
    Superseded,
    /// The controller is not in a coverage mode.
    Ignored,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub range: TimeRange,
    pub tracks: usize,
    pub points: usize,
    pub frame: Option<PlaybackFrame>,
}

/// Result of a trail request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrailOutcome {
    /// Trail drawn with this many points.
    Drawn(usize),
    /// History came back empty; the drawn trail was kept.
    Empty,
    Superseded,
    /// No selection, or not in realtime mode.
    Ignored,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Selection {
    vehicle_id: String,
    reference: DateTime<Utc>,
}

struct State<M> {
    mode: ViewMode,
    surface: M,
    playback: PlaybackRenderer,
    trail: TrailRenderer,
    preset: RangePreset,
    vehicles: Vec<VehicleStatus>,
    selected: Option<Selection>,
    refresh: Option<RefreshTask>,
}

struct Shared<S, M> {
    source: S,
    settings: PlaybackSettings,
    coverage_slot: FetchSlot,
    trail_slot: FetchSlot,
    state: RefCell<State<M>>,
}

/// Drives mode transitions, coverage loads, scrubbing and the vehicle trail.
///
/// Cloning yields another handle to the same controller. All state lives on
/// the current thread; borrows of it never span an `.await`, so a fetch that
/// resolves after being superseded has nothing to write into.
pub struct PlaybackController<S, M> {
    shared: Rc<Shared<S, M>>,
}

impl<S, M> Clone for PlaybackController<S, M> {
    fn clone(&self) -> Self {
        Self {
            shared: Rc::clone(&self.shared),
        }
    }
}

impl<S, M> PlaybackController<S, M>
where
    S: TrackSourcePort + 'static,
    M: MapSurfacePort + 'static,
{
    #[must_use]
    pub fn new(source: S, surface: M, settings: PlaybackSettings) -> Self {
        Self {
            shared: Rc::new(Shared {
                source,
                settings,
                coverage_slot: FetchSlot::new(FetchPurpose::Coverage),
                trail_slot: FetchSlot::new(FetchPurpose::Trail),
                state: RefCell::new(State {
                    mode: ViewMode::Realtime,
                    surface,
                    playback: PlaybackRenderer::new(),
                    trail: TrailRenderer::new(),
                    preset: settings.default_preset,
                    vehicles: Vec::new(),
                    selected: None,
                    refresh: None,
                }),
            }),
        }
    }

    /// Loads live vehicles and starts the periodic refresh.
    ///
    /// # Errors
    ///
    /// Returns an error when the vehicle fetch fails; the refresh task is not
    /// started in that case.
    pub async fn start(&self) -> AppResult<usize> {
        let vehicles = self.fetch_recent_vehicles().await?;
        let count = vehicles.len();
        {
            let mut state = self.shared.state.borrow_mut();
            state.mode = ViewMode::Realtime;
            show_vehicles(&mut state, vehicles);
        }
        self.restart_refresh();
        info!(vehicles = count, "Realtime view started");
        Ok(count)
    }

    /// Moves to `target`, fetching only when coverage is entered from realtime.
    ///
    /// # Errors
    ///
    /// Propagates fetch failures of the transition.
    pub async fn switch_mode(&self, target: ViewMode) -> AppResult<Option<LoadOutcome>> {
        match target.coverage_view() {
            None => {
                self.enter_realtime().await?;
                Ok(None)
            }
            Some(view) if self.mode().is_coverage() => {
                self.set_view(view);
                Ok(None)
            }
            Some(view) => self.enter_coverage(view).await.map(Some),
        }
    }

    /// Leaves realtime for coverage playback and loads the default preset.
    ///
    /// Already in coverage, this only switches the view.
    ///
    /// # Errors
    ///
    /// Returns an error when the preset cannot be resolved or the coverage
    /// fetch fails. The controller stays in coverage mode with nothing loaded.
    pub async fn enter_coverage(&self, view: CoverageView) -> AppResult<LoadOutcome> {
        if self.mode().is_coverage() {
            self.set_view(view);
            return Ok(LoadOutcome::Ignored);
        }
        self.shared.coverage_slot.cancel();
        self.close_detail();
        let preset = {
            let mut state = self.shared.state.borrow_mut();
            state.refresh = None;
            PlaybackRenderer::clear_layers(&mut state.surface);
            set_visible_if_present(&mut state.surface, LayerId::VehicleCircles, false);
            state.playback.discard();
            state.preset = self.shared.settings.default_preset;
            state.mode = ViewMode::from(view);
            state.preset
        };
        info!(mode = ViewMode::from(view).as_str(), "Entered coverage");
        self.apply_preset(preset).await
    }

    /// Returns to live vehicles, dropping the loaded coverage.
    ///
    /// # Errors
    ///
    /// Returns an error when the immediate vehicle refresh fails; the mode
    /// change itself has already happened.
    pub async fn enter_realtime(&self) -> AppResult<()> {
        if !self.mode().is_coverage() {
            return Ok(());
        }
        self.shared.coverage_slot.cancel();
        {
            let mut state = self.shared.state.borrow_mut();
            PlaybackRenderer::clear_layers(&mut state.surface);
            state.playback.discard();
            state.mode = ViewMode::Realtime;
            set_visible_if_present(&mut state.surface, LayerId::VehicleCircles, true);
        }
        self.restart_refresh();
        info!("Entered realtime");
        self.refresh_tick().await?;
        Ok(())
    }

    /// Redraws the loaded dataset in another view; never fetches.
    pub fn set_view(&self, view: CoverageView) -> Option<PlaybackFrame> {
        let mut state = self.shared.state.borrow_mut();
        if !state.mode.is_coverage() {
            debug!("Not in coverage; ignoring view change");
            return None;
        }
        state.mode = ViewMode::from(view);
        render_coverage(&mut state)
    }

    /// Resolves `preset` and loads it.
    ///
    /// # Errors
    ///
    /// Returns an error when the preset is invalid or the fetch fails.
    pub async fn apply_preset(&self, preset: RangePreset) -> AppResult<LoadOutcome> {
        if !self.mode().is_coverage() {
            debug!(preset = %preset.label(), "Not in coverage; ignoring preset");
            return Ok(LoadOutcome::Ignored);
        }
        let range = preset.resolve((self.shared.settings.now)())?;
        self.shared.state.borrow_mut().preset = preset;
        self.load_range(range).await
    }

    /// Fetches `range` and commits it, superseding any pending load.
    ///
    /// # Errors
    ///
    /// Returns an error when the fetch fails; the previously loaded range,
    /// dataset and layers stay in place.
    pub async fn load_range(&self, range: TimeRange) -> AppResult<LoadOutcome> {
        if !self.mode().is_coverage() {
            debug!("Not in coverage; ignoring range load");
            return Ok(LoadOutcome::Ignored);
        }
        let label = format_range_label(&range);
        debug!(range = %label, "Loading coverage");
        let shared = &self.shared;
        let dataset = match shared.coverage_slot.run(shared.source.coverage(&range)).await {
            FetchOutcome::Cancelled => {
                debug!(range = %label, "Coverage load superseded");
                return Ok(LoadOutcome::Superseded);
            }
            FetchOutcome::Completed(result) => result.map_err(|err| {
                error!(range = %label, "Coverage load failed: {}", err);
                AppError::from(err)
            })?,
        };

        let mut state = shared.state.borrow_mut();
        if !state.mode.is_coverage() {
            debug!(range = %label, "Left coverage during load; dropping result");
            return Ok(LoadOutcome::Ignored);
        }
        let tracks = dataset.len();
        let points = dataset.point_count();
        state.playback.replace(range, dataset);
        let frame = render_coverage(&mut state);
        info!(range = %label, tracks, points, "Coverage loaded");
        Ok(LoadOutcome::Loaded(LoadReport {
            range,
            tracks,
            points,
            frame,
        }))
    }

    /// Moves the playback cursor and redraws.
    pub fn set_scrub(&self, position: ScrubPosition) -> Option<PlaybackFrame> {
        let mut state = self.shared.state.borrow_mut();
        state.playback.set_scrub(position);
        let frame = render_coverage(&mut state);
        if let Some(frame) = frame.as_ref() {
            debug!(cutoff = %format_cutoff_label(frame.cutoff), "Scrubbed");
        }
        frame
    }

    /// Selects a live vehicle and draws its recent trail.
    ///
    /// # Errors
    ///
    /// Returns an error when the history fetch fails.
    pub async fn select_vehicle(&self, vehicle: &VehicleStatus) -> AppResult<TrailOutcome> {
        if self.mode().is_coverage() {
            debug!(vehicle = %vehicle.vehicle_id, "In coverage; ignoring selection");
            return Ok(TrailOutcome::Ignored);
        }
        self.shared.state.borrow_mut().selected = Some(Selection {
            vehicle_id: vehicle.vehicle_id.clone(),
            reference: vehicle.timestamp,
        });
        info!(vehicle = %vehicle.vehicle_id, "Vehicle selected");
        self.show_trail(TrailUpdate::Replace).await
    }

    /// Clears the selection and its trail.
    pub fn close_detail(&self) {
        self.shared.trail_slot.cancel();
        let mut state = self.shared.state.borrow_mut();
        let state = &mut *state;
        if let Some(selection) = state.selected.take() {
            debug!(vehicle = %selection.vehicle_id, "Vehicle detail closed");
        }
        state.trail.clear(&mut state.surface);
    }

    /// One cycle of the live refresh.
    ///
    /// Returns the number of vehicles shown, or `None` outside realtime.
    ///
    /// # Errors
    ///
    /// Returns an error when the vehicle or trail fetch fails.
    pub async fn refresh_tick(&self) -> AppResult<Option<usize>> {
        if self.mode().is_coverage() {
            return Ok(None);
        }
        let vehicles = self.fetch_recent_vehicles().await?;
        let count = vehicles.len();
        let follow_trail = {
            let mut state = self.shared.state.borrow_mut();
            if state.mode.is_coverage() {
                debug!("Entered coverage during refresh; dropping vehicles");
                return Ok(None);
            }
            let selected = state.selected.as_ref().map(|selection| {
                vehicles
                    .iter()
                    .find(|vehicle| vehicle.vehicle_id == selection.vehicle_id)
                    .map(|vehicle| vehicle.timestamp)
            });
            show_vehicles(&mut state, vehicles);
            match selected {
                Some(Some(reference)) => {
                    if let Some(selection) = state.selected.as_mut() {
                        selection.reference = reference;
                    }
                    true
                }
                Some(None) => {
                    drop(state);
                    info!("Selected vehicle no longer reporting");
                    self.close_detail();
                    false
                }
                None => false,
            }
        };
        if follow_trail {
            self.show_trail(TrailUpdate::Refresh).await?;
        }
        debug!(vehicles = count, "Refreshed vehicles");
        Ok(Some(count))
    }

    /// Stops the refresh and cancels pending fetches.
    pub fn stop(&self) {
        self.shared.coverage_slot.cancel();
        self.shared.trail_slot.cancel();
        self.shared.state.borrow_mut().refresh = None;
    }

    #[must_use]
    pub fn mode(&self) -> ViewMode {
        self.shared.state.borrow().mode
    }

    #[must_use]
    pub fn preset(&self) -> RangePreset {
        self.shared.state.borrow().preset
    }

    #[must_use]
    pub fn scrub(&self) -> ScrubPosition {
        self.shared.state.borrow().playback.scrub()
    }

    #[must_use]
    pub fn cutoff(&self) -> Option<DateTime<Utc>> {
        self.shared.state.borrow().playback.cutoff()
    }

    #[must_use]
    pub fn loaded_range(&self) -> Option<TimeRange> {
        self.shared
            .state
            .borrow()
            .playback
            .loaded()
            .map(|loaded| loaded.range)
    }

    #[must_use]
    pub fn loaded_tracks(&self) -> usize {
        self.shared
            .state
            .borrow()
            .playback
            .loaded()
            .map_or(0, |loaded| loaded.dataset.len())
    }

    #[must_use]
    pub fn vehicles(&self) -> Vec<VehicleStatus> {
        self.shared.state.borrow().vehicles.clone()
    }

    #[must_use]
    pub fn vehicle(&self, vehicle_id: &str) -> Option<VehicleStatus> {
        self.shared
            .state
            .borrow()
            .vehicles
            .iter()
            .find(|vehicle| vehicle.vehicle_id == vehicle_id)
            .cloned()
    }

    #[must_use]
    pub fn selected_vehicle(&self) -> Option<String> {
        self.shared
            .state
            .borrow()
            .selected
            .as_ref()
            .map(|selection| selection.vehicle_id.clone())
    }

    #[must_use]
    pub fn is_refreshing(&self) -> bool {
        self.shared
            .state
            .borrow()
            .refresh
            .as_ref()
            .is_some_and(|task| !task.is_finished())
    }

    #[must_use]
    pub fn source(&self) -> &S {
        &self.shared.source
    }

    /// Runs `inspect` against the surface.
    pub fn with_surface<R>(&self, inspect: impl FnOnce(&M) -> R) -> R {
        inspect(&self.shared.state.borrow().surface)
    }

    async fn fetch_recent_vehicles(&self) -> AppResult<Vec<VehicleStatus>> {
        let settings = &self.shared.settings;
        let vehicles = self.shared.source.vehicles().await?;
        Ok(filter_recent(
            vehicles,
            (settings.now)(),
            settings.recent_window,
        ))
    }

    async fn show_trail(&self, update: TrailUpdate) -> AppResult<TrailOutcome> {
        let Some(selection) = self.shared.state.borrow().selected.clone() else {
            return Ok(TrailOutcome::Ignored);
        };
        let settings = &self.shared.settings;
        let window = HistoryWindow::ending_at(
            Some(selection.reference),
            (settings.now)(),
            settings.trail_lookback,
            settings.trail_limit,
        )?;
        let shared = &self.shared;
        let history = match shared
            .trail_slot
            .run(shared.source.history(&selection.vehicle_id, &window))
            .await
        {
            FetchOutcome::Cancelled => return Ok(TrailOutcome::Superseded),
            FetchOutcome::Completed(result) => result?,
        };

        let mut state = shared.state.borrow_mut();
        let state = &mut *state;
        let still_selected = state
            .selected
            .as_ref()
            .is_some_and(|current| current.vehicle_id == selection.vehicle_id);
        if !still_selected {
            return Ok(TrailOutcome::Ignored);
        }
        if state.trail.apply(&history, update, &mut state.surface) {
            Ok(TrailOutcome::Drawn(history.len()))
        } else {
            Ok(TrailOutcome::Empty)
        }
    }

    fn restart_refresh(&self) {
        let Some(period) = self.shared.settings.refresh_interval else {
            return;
        };
        let owner = Rc::downgrade(&self.shared);
        let task = RefreshTask::start(period, move || {
            let shared = owner.upgrade()?;
            Some(async move {
                let controller = PlaybackController { shared };
                if let Err(err) = controller.refresh_tick().await {
                    error!("Vehicle refresh failed: {}", err);
                }
            })
        });
        self.shared.state.borrow_mut().refresh = Some(task);
    }
}

fn show_vehicles<M>(state: &mut State<M>, vehicles: Vec<VehicleStatus>)
where
    M: MapSurfacePort,
{
    upsert_layer(
        &mut state.surface,
        LayerId::VehicleCircles,
        FeatureSet::Vehicles(vehicles.clone()),
    );
    state.surface.set_visible(LayerId::VehicleCircles, true);
    state.vehicles = vehicles;
}

fn render_coverage<M>(state: &mut State<M>) -> Option<PlaybackFrame>
where
    M: MapSurfacePort,
{
    let view = state.mode.coverage_view()?;
    state.playback.render(view, &mut state.surface)
}
