//! Local flat frame: converts between lat/lon and meters around an origin.
//!
//! Equirectangular projection centered on a reference point (usually the
//! tee). At golf-hole scale (well under 1 km) the error is negligible.

use glam::DVec2;

use fairway_core::constants::EARTH_RADIUS_M;
use fairway_core::types::GeoPoint;

/// Meters per degree of latitude on the haversine sphere.
const METERS_PER_DEGREE: f64 = EARTH_RADIUS_M * std::f64::consts::PI / 180.0;

/// Flat east/north frame anchored at an origin.
///
/// The origin maps to (0, 0). x = East, y = North, both in meters.
#[derive(Debug, Clone, Copy)]
pub struct LocalFrame {
    origin: GeoPoint,
    /// Cached cos(origin latitude) for longitude scaling.
    cos_origin_lat: f64,
}

impl LocalFrame {
    pub fn new(origin: GeoPoint) -> Self {
        Self {
            origin,
            cos_origin_lat: origin.lat.to_radians().cos(),
        }
    }

    /// Convert lat/lon to east/north meters relative to the origin.
    pub fn to_local(&self, point: &GeoPoint) -> DVec2 {
        DVec2::new(
            (point.lon - self.origin.lon) * self.lon_scale(),
            (point.lat - self.origin.lat) * METERS_PER_DEGREE,
        )
    }

    /// Convert east/north meters back to lat/lon.
    pub fn to_geo(&self, local: DVec2) -> GeoPoint {
        GeoPoint::new(
            self.origin.lat + local.y / METERS_PER_DEGREE,
            self.origin.lon + local.x / self.lon_scale(),
        )
    }

    pub fn origin(&self) -> GeoPoint {
        self.origin
    }

    /// Meters per degree of longitude at the origin latitude.
    pub fn lon_scale(&self) -> f64 {
        METERS_PER_DEGREE * self.cos_origin_lat
    }
}
