//! Spherical geodesy primitives.
//!
//! Pure functions on a sphere of radius [`EARTH_RADIUS_M`]. Functions that
//! measure against a reference line return `None` when the line is too short
//! to have a direction.

use std::f64::consts::PI;

use fairway_core::constants::{EARTH_RADIUS_M, GEO_DEGENERATE_M};
use fairway_core::types::GeoPoint;

use crate::projection::LocalFrame;

/// Great-circle distance in meters (haversine).
pub fn distance_meters(p1: &GeoPoint, p2: &GeoPoint) -> f64 {
    let phi1 = p1.lat.to_radians();
    let phi2 = p2.lat.to_radians();
    let d_phi = (p2.lat - p1.lat).to_radians();
    let d_lambda = (p2.lon - p1.lon).to_radians();

    let s = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_M * s.sqrt().min(1.0).asin()
}

/// Initial bearing from `from` toward `to`, in `(-π, π]` (0 = North, clockwise).
pub fn bearing_radians(from: &GeoPoint, to: &GeoPoint) -> f64 {
    let phi1 = from.lat.to_radians();
    let phi2 = to.lat.to_radians();
    let d_lambda = (to.lon - from.lon).to_radians();

    let y = d_lambda.sin() * phi2.cos();
    let x = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * d_lambda.cos();
    let theta = y.atan2(x);
    if theta <= -PI {
        theta + 2.0 * PI
    } else {
        theta
    }
}

/// Point `distance_m` meters from `p1` toward `p2` on the great circle
/// through both, by spherical linear interpolation.
///
/// The distance is clamped to `[0, distance_meters(p1, p2)]`; coincident
/// endpoints return `p1`.
pub fn point_along_great_circle(p1: &GeoPoint, p2: &GeoPoint, distance_m: f64) -> GeoPoint {
    let d = distance_meters(p1, p2);
    if !d.is_finite() || d <= 0.0 {
        return *p1;
    }

    let t = if distance_m.is_nan() {
        0.0
    } else {
        distance_m.clamp(0.0, d)
    };
    let f = t / d;

    let delta = d / EARTH_RADIUS_M;
    let sin_delta = delta.sin();
    if sin_delta.abs() < 1e-12 {
        return *p1;
    }

    let a = ((1.0 - f) * delta).sin() / sin_delta;
    let b = (f * delta).sin() / sin_delta;

    let (phi1, lambda1) = (p1.lat.to_radians(), p1.lon.to_radians());
    let (phi2, lambda2) = (p2.lat.to_radians(), p2.lon.to_radians());

    let x = a * phi1.cos() * lambda1.cos() + b * phi2.cos() * lambda2.cos();
    let y = a * phi1.cos() * lambda1.sin() + b * phi2.cos() * lambda2.sin();
    let z = a * phi1.sin() + b * phi2.sin();

    let phi = z.atan2((x * x + y * y).sqrt());
    let lambda = y.atan2(x);

    GeoPoint::new(phi.to_degrees(), lambda.to_degrees())
}

/// Signed perpendicular distance (meters) of `point` from the line
/// `reference_from -> reference_to`. Positive = right of the direction of travel.
///
/// Computed in a flat frame centered at `reference_from`. `None` when the
/// reference is no longer than [`GEO_DEGENERATE_M`].
pub fn cross_track_meters(
    reference_from: &GeoPoint,
    reference_to: &GeoPoint,
    point: &GeoPoint,
) -> Option<f64> {
    if !reference_is_usable(reference_from, reference_to) || !point.is_finite() {
        return None;
    }

    let frame = LocalFrame::new(*reference_from);
    let dir = frame.to_local(reference_to);
    let rel = frame.to_local(point);

    let len = dir.length();
    if len <= GEO_DEGENERATE_M {
        return None;
    }

    // Right-hand normal of (east, north) travel is (north, -east).
    Some((rel.x * dir.y - rel.y * dir.x) / len)
}

/// Progress of `point` along `reference_from -> reference_to` as a fraction
/// of the reference length, clamped to `[0, 1]`.
///
/// Uses the bearing difference and the great-circle distance rather than a
/// flat projection. `None` when the reference is no longer than
/// [`GEO_DEGENERATE_M`].
pub fn along_track_fraction(
    reference_from: &GeoPoint,
    reference_to: &GeoPoint,
    point: &GeoPoint,
) -> Option<f64> {
    if !reference_is_usable(reference_from, reference_to) || !point.is_finite() {
        return None;
    }

    let reference_len = distance_meters(reference_from, reference_to);
    let from_to_point = distance_meters(reference_from, point);
    if from_to_point == 0.0 {
        return Some(0.0);
    }

    let d_bearing = bearing_radians(reference_from, point) - bearing_radians(reference_from, reference_to);
    let along = d_bearing.cos() * from_to_point;

    Some((along / reference_len).clamp(0.0, 1.0))
}

fn reference_is_usable(from: &GeoPoint, to: &GeoPoint) -> bool {
    if !from.is_finite() || !to.is_finite() {
        return false;
    }
    let d = distance_meters(from, to);
    d.is_finite() && d > GEO_DEGENERATE_M
}
