//! Fundamental geometric types shared by every layer.

use std::fmt;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_PAR_CYCLE;

/// Geodetic position in WGS84-style decimal degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Both coordinates are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }
}

/// Position within the hole-diagram image, each axis in `[0, 1]`.
/// Origin top-left, x right, y down.
///
/// Every constructor clamps, and deserialization goes through the same
/// clamp, so a `NormPoint` never holds an out-of-range coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawNormPoint")]
pub struct NormPoint {
    pub x: f64,
    pub y: f64,
}

/// Unchecked wire form of a [`NormPoint`].
#[derive(Debug, Clone, Copy, Deserialize)]
struct RawNormPoint {
    x: f64,
    y: f64,
}

impl From<RawNormPoint> for NormPoint {
    fn from(raw: RawNormPoint) -> Self {
        NormPoint::new(raw.x, raw.y)
    }
}

/// Clamp into `[0, 1]`. NaN maps to the image center line.
pub fn clamp_unit(v: f64) -> f64 {
    if v.is_nan() {
        0.5
    } else {
        v.clamp(0.0, 1.0)
    }
}

impl NormPoint {
    /// Clamp both axes into `[0, 1]`.
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x: clamp_unit(x),
            y: clamp_unit(y),
        }
    }

    /// Like [`NormPoint::new`], but refuses NaN instead of centering it.
    pub fn try_new(x: f64, y: f64) -> Option<Self> {
        if x.is_nan() || y.is_nan() {
            return None;
        }
        Some(Self::new(x, y))
    }

    pub fn from_vec(v: DVec2) -> Self {
        Self::new(v.x, v.y)
    }

    pub fn to_vec(self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    /// Euclidean distance in normalized units.
    pub fn distance_to(&self, other: &NormPoint) -> f64 {
        self.to_vec().distance(other.to_vec())
    }

    /// Linear interpolation toward `other`; `t` is clamped to `[0, 1]`.
    pub fn lerp(&self, other: &NormPoint, t: f64) -> NormPoint {
        NormPoint::from_vec(self.to_vec().lerp(other.to_vec(), t.clamp(0.0, 1.0)))
    }

    pub fn midpoint(&self, other: &NormPoint) -> NormPoint {
        self.lerp(other, 0.5)
    }

    /// Pixel position for a given render size.
    pub fn to_px(&self, size: &RenderSize) -> DVec2 {
        DVec2::new(self.x * size.width, self.y * size.height)
    }
}

/// Rendered size of the diagram in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderSize {
    pub width: f64,
    pub height: f64,
}

impl RenderSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// A render size is usable only when both sides are positive and finite.
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Geodetic reference for one hole, as supplied by the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HoleReference {
    pub tee: GeoPoint,
    pub green: GeoPoint,
    pub par: u8,
}

impl HoleReference {
    pub fn new(tee: GeoPoint, green: GeoPoint, par: u8) -> Self {
        Self { tee, green, par }
    }

    /// Build a reference, filling in the par from the hole number when the
    /// catalog has none.
    pub fn with_par_or_default(
        tee: GeoPoint,
        green: GeoPoint,
        par: Option<u8>,
        hole_number: u32,
    ) -> Self {
        Self {
            tee,
            green,
            par: par.unwrap_or_else(|| default_par(hole_number)),
        }
    }
}

/// Default par for a hole with no catalog par: cycles 4, 3, 5 by hole number.
pub fn default_par(hole_number: u32) -> u8 {
    let idx = hole_number.max(1) as usize - 1;
    DEFAULT_PAR_CYCLE[idx % DEFAULT_PAR_CYCLE.len()]
}

/// Stable identity of one hole: `<ClubWithoutSpaces>-<Nine>-<HH>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HoleKey(String);

impl HoleKey {
    pub fn new(club: &str, nine: &str, hole_number: u32) -> Self {
        let club: String = club.split_whitespace().collect();
        Self(format!("{club}-{nine}-{hole_number:02}"))
    }

    /// Wrap an already-formatted key (e.g. one read back from a store).
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HoleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Most recent position report from the location provider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LiveFix {
    pub point: GeoPoint,
    /// Horizontal accuracy radius (meters).
    pub accuracy_meters: f64,
    pub received_at_epoch_ms: i64,
}

impl LiveFix {
    pub fn new(point: GeoPoint, accuracy_meters: f64, received_at_epoch_ms: i64) -> Self {
        Self {
            point,
            accuracy_meters,
            received_at_epoch_ms,
        }
    }
}
