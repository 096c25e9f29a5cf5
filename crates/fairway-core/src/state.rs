//! Overlay snapshot — everything the presentation layer draws in one frame.

use serde::{Deserialize, Serialize};

use crate::constants::UNAVAILABLE_PLACEHOLDER;
use crate::enums::*;
use crate::events::OverlayEvent;
use crate::types::{GeoPoint, HoleKey, NormPoint};

/// Complete overlay state handed to the presentation layer after each tick.
///
/// Every yardage is `None` when it cannot be computed; render it with
/// [`format_yards`], never as zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OverlaySnapshot {
    pub hole_key: Option<HoleKey>,
    pub par: Option<u8>,
    pub calibration: Option<CalibrationView>,
    pub target: Option<TargetView>,
    pub live: Option<LiveView>,
    pub yardages: YardageView,
    pub visibility: VisibilityState,
    pub target_overlay: TargetOverlay,
    pub gps_status: GpsStatus,
    pub events: Vec<OverlayEvent>,
}

/// Anchors and the scale they produce.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CalibrationView {
    /// `A`.
    pub tee: NormPoint,
    /// `C`.
    pub green: NormPoint,
    pub mode: CalibrationMode,
    pub yards_per_norm_unit: Option<f64>,
}

/// Target point `B`. Present even when inactive so a re-activation keeps
/// the last placement.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TargetView {
    pub point: NormPoint,
    pub active: bool,
    /// Target projected onto the tee-green great circle.
    pub geo: Option<GeoPoint>,
}

/// Live fix mapped into image space.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LiveView {
    /// Smoothed marker position to draw.
    pub position: NormPoint,
    /// Latest projected position the marker is easing toward.
    pub projected: NormPoint,
    /// Progress from tee (0) to green (1).
    pub along_track_fraction: f64,
    pub along_track_yards: f64,
    /// Signed lateral deviation, positive = right of the tee-green line.
    pub cross_track_yards: f64,
    /// Lateral deviation after the display clamp.
    pub cross_track_yards_clamped: f64,
    pub accuracy_meters: f64,
}

/// Whole-yard distances shown on the diagram.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct YardageView {
    pub tee_to_green: Option<u32>,
    pub you_to_green: Option<u32>,
    pub tee_to_target: Option<u32>,
    pub target_to_green: Option<u32>,
}

/// Render a yardage, or the placeholder when unavailable.
pub fn format_yards(yards: Option<u32>) -> String {
    match yards {
        Some(y) => y.to_string(),
        None => UNAVAILABLE_PLACEHOLDER.to_string(),
    }
}
