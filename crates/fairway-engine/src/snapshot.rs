//! Snapshot builder: reads the current visit and fix and assembles an
//! `OverlaySnapshot`. Read-only.

use fairway_core::enums::{GpsStatus, TargetOverlay, VisibilityState};
use fairway_core::events::OverlayEvent;
use fairway_core::state::{CalibrationView, LiveView, OverlaySnapshot, TargetView, YardageView};
use fairway_core::types::LiveFix;
use fairway_geo::{distance_meters, meters_to_yards, round_yards};
use fairway_overlay::visibility::target_overlay;

use crate::projector;
use crate::session::HoleSession;

pub fn build_snapshot(
    session: Option<&HoleSession>,
    fix: Option<&LiveFix>,
    gps_status: &GpsStatus,
    events: Vec<OverlayEvent>,
) -> OverlaySnapshot {
    let Some(session) = session else {
        return OverlaySnapshot {
            gps_status: gps_status.clone(),
            events,
            ..Default::default()
        };
    };

    let scale = session.scale();
    let target = session.target();

    OverlaySnapshot {
        hole_key: Some(session.key().clone()),
        par: Some(session.hole().par),
        calibration: Some(build_calibration(session)),
        target: Some(TargetView {
            point: target.point,
            active: target.active,
            geo: projector::target_geo(session.hole(), &session.calibration().calibration, target),
        }),
        live: build_live(session),
        yardages: build_yardages(session, fix),
        visibility: session.visibility(),
        target_overlay: target_overlay(session.visibility(), target.active, scale.is_some()),
        gps_status: gps_status.clone(),
        events,
    }
}

fn build_calibration(session: &HoleSession) -> CalibrationView {
    let state = session.calibration();
    CalibrationView {
        tee: state.calibration.tee,
        green: state.calibration.green,
        mode: state.mode,
        yards_per_norm_unit: session.scale().map(|s| s.yards_per_norm_unit()),
    }
}

fn build_live(session: &HoleSession) -> Option<LiveView> {
    let projection = session.projection()?;
    Some(LiveView {
        position: session.marker().unwrap_or(projection.position),
        projected: projection.position,
        along_track_fraction: projection.along_track_fraction,
        along_track_yards: projection.along_track_yards,
        cross_track_yards: projection.cross_track_yards,
        cross_track_yards_clamped: projection.cross_track_yards_clamped,
        accuracy_meters: projection.accuracy_meters,
    })
}

fn build_yardages(session: &HoleSession, fix: Option<&LiveFix>) -> YardageView {
    let hole = session.hole();
    let legs = session.target_legs();
    YardageView {
        tee_to_green: round_yards(meters_to_yards(distance_meters(&hole.tee, &hole.green))),
        you_to_green: fix
            .and_then(|f| projector::you_to_green_yards(f, hole))
            .and_then(round_yards),
        tee_to_target: legs.and_then(|l| round_yards(l.tee_to_target_yards)),
        target_to_green: legs.and_then(|l| round_yards(l.target_to_green_yards)),
    }
}

/// True when the target should be drawn this frame.
pub fn target_drawn(snapshot: &OverlaySnapshot) -> bool {
    snapshot.target_overlay == TargetOverlay::Visible && snapshot.visibility == VisibilityState::Showing
}
