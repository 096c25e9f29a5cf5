//! Live-position projector.
//!
//! Maps a geodetic fix onto the diagram using only the hole's tee/green
//! reference and the two anchors: progress along the hole places the marker
//! on segment `A–C`, and the signed cross-track distance offsets it
//! perpendicular to that segment.

use fairway_core::types::{GeoPoint, HoleReference, LiveFix, NormPoint};
use fairway_geo::{
    along_track_fraction, cross_track_meters, distance_meters, meters_to_yards,
    point_along_great_circle,
};
use fairway_overlay::{derive_scale, Calibration, Target, TargetLegs};

/// Everything derived from one fix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LiveProjection {
    /// Marker position on the diagram.
    pub position: NormPoint,
    /// Point on `A–C` before the lateral offset.
    pub projected: NormPoint,
    pub along_track_fraction: f64,
    pub along_track_yards: f64,
    /// Signed, right of tee→green positive. Not clamped.
    pub cross_track_yards: f64,
    /// Lateral distance actually used for drawing.
    pub cross_track_yards_clamped: f64,
    pub you_to_green_yards: f64,
    pub accuracy_meters: f64,
}

/// Project `fix` onto the diagram.
///
/// `None` when the hole's tee and green coincide or the fix is not finite.
/// With no usable scale the marker stays on `A–C` with no lateral offset.
pub fn project(
    fix: &LiveFix,
    hole: &HoleReference,
    calibration: &Calibration,
    max_lateral_yards: f64,
) -> Option<LiveProjection> {
    let t = along_track_fraction(&hole.tee, &hole.green, &fix.point)?;
    let cross_m = cross_track_meters(&hole.tee, &hole.green, &fix.point)?;

    let tee_to_green_yards = meters_to_yards(distance_meters(&hole.tee, &hole.green));
    let cross_track_yards = meters_to_yards(cross_m);
    let limit = max_lateral_yards.abs();
    let cross_track_yards_clamped = cross_track_yards.clamp(-limit, limit);

    let projected = calibration.tee.lerp(&calibration.green, t);
    let position = match (derive_scale(calibration, hole), calibration.direction()) {
        (Some(scale), Some(dir)) => {
            // In y-down image space, perp() of the travel direction points
            // to the viewer's right.
            let offset = dir.perp() * scale.to_norm(cross_track_yards_clamped);
            NormPoint::from_vec(projected.to_vec() + offset)
        }
        _ => projected,
    };

    Some(LiveProjection {
        position,
        projected,
        along_track_fraction: t,
        along_track_yards: t * tee_to_green_yards,
        cross_track_yards,
        cross_track_yards_clamped,
        you_to_green_yards: meters_to_yards(distance_meters(&fix.point, &hole.green)),
        accuracy_meters: fix.accuracy_meters,
    })
}

/// Live distance to the green in yards, independent of any calibration.
pub fn you_to_green_yards(fix: &LiveFix, hole: &HoleReference) -> Option<f64> {
    if !fix.point.is_finite() || !hole.green.is_finite() {
        return None;
    }
    Some(meters_to_yards(distance_meters(&fix.point, &hole.green)))
}

/// Geodetic location of an active target: its parameter along `A–C` applied
/// to the great circle from tee to green.
pub fn target_geo(hole: &HoleReference, calibration: &Calibration, target: &Target) -> Option<GeoPoint> {
    if !target.active || calibration.direction().is_none() {
        return None;
    }
    let t = calibration.project_parameter(&target.point);
    let total = distance_meters(&hole.tee, &hole.green);
    if !total.is_finite() {
        return None;
    }
    Some(point_along_great_circle(&hole.tee, &hole.green, t * total))
}

/// Target legs for a hole, with the scale derived from its reference.
pub fn target_legs(hole: &HoleReference, calibration: &Calibration, target: &Target) -> Option<TargetLegs> {
    TargetLegs::compute(calibration, target, derive_scale(calibration, hole))
}
