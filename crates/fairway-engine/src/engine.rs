//! Overlay engine.
//!
//! `OverlayEngine` owns the current hole visit, the latest position fix and
//! the calibration store. Commands queue up between ticks; each tick applies
//! them, advances the marker animation and returns an `OverlaySnapshot`.
//! Completely headless, so the whole flow runs in tests.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use fairway_core::commands::OverlayCommand;
use fairway_core::constants::{
    DEFAULT_RENDER_HEIGHT, DEFAULT_RENDER_WIDTH, DOUBLE_TAP_MS, MAX_LATERAL_YARDS,
    SMOOTHING_DURATION_MS, TARGET_ENDPOINT_GUARD_PX,
};
use fairway_core::enums::GpsStatus;
use fairway_core::events::OverlayEvent;
use fairway_core::state::OverlaySnapshot;
use fairway_core::types::{HoleKey, HoleReference, LiveFix, RenderSize};
use fairway_overlay::visibility::VisibilityThresholds;

use crate::session::HoleSession;
use crate::snapshot;
use crate::store::{get_hole_defaults, set_hole_defaults, HoleStore, MemoryStore, StoreError};

/// Tunables for the overlay. Every field has a default, so a partial JSON
/// file only overrides what it names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Diagram size used for the target placement guard.
    pub render_size: RenderSize,
    /// Minimum pixel distance between a new target and either anchor.
    pub target_guard_px: f64,
    /// Lateral marker offset limit (yards each side).
    pub max_lateral_yards: f64,
    pub visibility: VisibilityThresholds,
    pub smoothing_ms: f64,
    /// Two taps on the target within this window clear it.
    pub double_tap_ms: i64,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            render_size: RenderSize::new(DEFAULT_RENDER_WIDTH, DEFAULT_RENDER_HEIGHT),
            target_guard_px: TARGET_ENDPOINT_GUARD_PX,
            max_lateral_yards: MAX_LATERAL_YARDS,
            visibility: VisibilityThresholds::default(),
            smoothing_ms: SMOOTHING_DURATION_MS,
            double_tap_ms: DOUBLE_TAP_MS,
        }
    }
}

impl OverlayConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// The overlay engine.
pub struct OverlayEngine<S: HoleStore = MemoryStore> {
    config: OverlayConfig,
    store: S,
    session: Option<HoleSession>,
    fix: Option<LiveFix>,
    gps_status: GpsStatus,
    render_size: RenderSize,
    command_queue: VecDeque<OverlayCommand>,
    events: Vec<OverlayEvent>,
}

impl OverlayEngine<MemoryStore> {
    /// Engine with a throwaway in-memory store.
    pub fn in_memory(config: OverlayConfig) -> Self {
        Self::new(config, MemoryStore::new())
    }
}

impl<S: HoleStore> OverlayEngine<S> {
    pub fn new(config: OverlayConfig, store: S) -> Self {
        let render_size = config.render_size;
        Self {
            config,
            store,
            session: None,
            fix: None,
            gps_status: GpsStatus::default(),
            render_size,
            command_queue: VecDeque::new(),
            events: Vec::new(),
        }
    }

    /// Begin a visit to `hole`. Whatever belonged to the previous visit
    /// (target, auto-hide state, marker animation) is dropped here.
    pub fn enter_hole(&mut self, key: HoleKey, hole: HoleReference) {
        let saved = match get_hole_defaults(&self.store, &key) {
            Ok(saved) => saved,
            Err(e) => {
                warn!(hole = %key, error = %e, "could not read saved calibration, using defaults");
                None
            }
        };
        let loaded = saved.is_some();
        info!(hole = %key, par = hole.par, loaded, "entering hole");

        self.command_queue.clear();
        let mut session = HoleSession::new(key.clone(), hole, saved, self.config.smoothing_ms);
        if let Some(reason) = session.refresh(
            self.fix.as_ref(),
            self.config.max_lateral_yards,
            self.config.visibility,
        ) {
            self.events.push(OverlayEvent::TargetAutoHidden { reason });
        }
        self.session = Some(session);
        self.events.push(OverlayEvent::HoleEntered { hole_key: key, loaded });
    }

    /// Accept a position fix. Only the most recent fix matters; one that is
    /// older than the fix already held is ignored.
    pub fn ingest_fix(&mut self, fix: LiveFix) {
        if !fix.point.is_finite() {
            warn!(lat = fix.point.lat, lon = fix.point.lon, "ignoring non-finite fix");
            return;
        }
        if let Some(held) = &self.fix {
            if fix.received_at_epoch_ms < held.received_at_epoch_ms {
                debug!(
                    received = fix.received_at_epoch_ms,
                    held = held.received_at_epoch_ms,
                    "dropping out-of-order fix"
                );
                return;
            }
        }
        self.fix = Some(fix);
        self.gps_status = GpsStatus::Locked;
        self.refresh();
    }

    /// Location provider failed. Live outputs become unavailable until the
    /// next fix.
    pub fn report_fix_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        warn!(error = %message, "location error");
        self.fix = None;
        self.gps_status = GpsStatus::Error(message.clone());
        self.events.push(OverlayEvent::FixLost { message });
        self.refresh();
    }

    /// Set the provider status directly, e.g. `Unsupported`. Any status
    /// other than `Locked` drops the held fix.
    pub fn set_gps_status(&mut self, status: GpsStatus) {
        if status != GpsStatus::Locked {
            self.fix = None;
        }
        self.gps_status = status;
        self.refresh();
    }

    /// Queue a command for the next tick.
    pub fn queue_command(&mut self, command: OverlayCommand) {
        self.command_queue.push_back(command);
    }

    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = OverlayCommand>) {
        self.command_queue.extend(commands);
    }

    /// Apply queued commands, advance the marker by `elapsed_ms` and return
    /// the resulting snapshot.
    pub fn tick(&mut self, elapsed_ms: f64) -> OverlaySnapshot {
        self.process_commands();
        if let Some(session) = self.session.as_mut() {
            session.tick(elapsed_ms);
        }
        let events = std::mem::take(&mut self.events);
        snapshot::build_snapshot(self.session.as_ref(), self.fix.as_ref(), &self.gps_status, events)
    }

    /// Current state without applying commands, advancing time or draining
    /// events.
    pub fn state(&self) -> OverlaySnapshot {
        snapshot::build_snapshot(self.session.as_ref(), self.fix.as_ref(), &self.gps_status, Vec::new())
    }

    /// Persist the current hole's anchors and target.
    pub fn save_defaults(&mut self) -> Result<(), StoreError> {
        let Some(session) = self.session.as_mut() else {
            debug!("save requested with no hole in play");
            return Ok(());
        };
        let key = session.key().clone();
        match set_hole_defaults(&mut self.store, &key, session.record()) {
            Ok(()) => {
                session.mark_saved();
                info!(hole = %key, "saved calibration");
                self.events.push(OverlayEvent::CalibrationSaved { hole_key: key });
                Ok(())
            }
            Err(e) => {
                warn!(hole = %key, error = %e, "failed to save calibration");
                self.events.push(OverlayEvent::SaveFailed {
                    hole_key: key,
                    message: e.to_string(),
                });
                Err(e)
            }
        }
    }

    pub fn clear_target(&mut self) {
        if let Some(session) = self.session.as_mut() {
            if session.target().active {
                session.clear_target();
                info!(hole = %session.key(), "target cleared");
                self.events.push(OverlayEvent::TargetCleared);
            }
        }
        self.refresh();
    }

    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    pub fn session(&self) -> Option<&HoleSession> {
        self.session.as_ref()
    }

    pub fn fix(&self) -> Option<&LiveFix> {
        self.fix.as_ref()
    }

    pub fn gps_status(&self) -> &GpsStatus {
        &self.gps_status
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn render_size(&self) -> RenderSize {
        self.render_size
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    fn handle_command(&mut self, command: OverlayCommand) {
        match command {
            OverlayCommand::SetRenderSize { size } => {
                if size.is_valid() {
                    self.render_size = size;
                } else {
                    debug!(width = size.width, height = size.height, "ignoring invalid render size");
                }
                return;
            }
            OverlayCommand::SaveCalibration => {
                // Failure is already logged and reported as an event.
                let _ = self.save_defaults();
                return;
            }
            OverlayCommand::ClearTarget => {
                self.clear_target();
                return;
            }
            _ => {}
        }

        let Some(session) = self.session.as_mut() else {
            debug!(?command, "no hole in play, dropping command");
            return;
        };

        match command {
            OverlayCommand::DragAnchor { anchor, point } => {
                session.drag_anchor(anchor, point);
            }
            OverlayCommand::PlaceTarget { point } => {
                match session.place_target(&point, &self.render_size, self.config.target_guard_px) {
                    Some(placed) => {
                        info!(hole = %session.key(), x = placed.x, y = placed.y, "target placed");
                        self.events.push(OverlayEvent::TargetPlaced { point: placed });
                    }
                    None => {
                        debug!(x = point.x, y = point.y, "target too close to an anchor");
                        self.events.push(OverlayEvent::TargetRejected { point });
                    }
                }
            }
            OverlayCommand::DragTarget { point } => {
                session.drag_target(point);
            }
            OverlayCommand::TapTarget { at_ms } => {
                if session.tap_target(at_ms, self.config.double_tap_ms) {
                    info!(hole = %session.key(), "target cleared by double tap");
                    self.events.push(OverlayEvent::TargetCleared);
                }
            }
            OverlayCommand::SetRenderSize { .. }
            | OverlayCommand::SaveCalibration
            | OverlayCommand::ClearTarget => {}
        }
        self.refresh();
    }

    /// Re-run projection and auto-hide for the current visit.
    fn refresh(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if let Some(reason) = session.refresh(
            self.fix.as_ref(),
            self.config.max_lateral_yards,
            self.config.visibility,
        ) {
            info!(hole = %session.key(), ?reason, "target overlay auto-hidden");
            self.events.push(OverlayEvent::TargetAutoHidden { reason });
        }
    }
}
