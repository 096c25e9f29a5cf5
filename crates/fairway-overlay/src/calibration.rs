//! Two-point calibration: tee anchor `A` and green anchor `C` on the diagram.
//!
//! The anchors and the geodetic tee-green distance together fix the scale
//! between yards and normalized image units. Nothing else about the image
//! (rotation, aspect) is assumed.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use fairway_core::constants::{DEFAULT_GREEN_ANCHOR, DEFAULT_TEE_ANCHOR, NORM_EPSILON};
use fairway_core::enums::{Anchor, CalibrationMode};
use fairway_core::types::{HoleReference, NormPoint};
use fairway_geo::{distance_meters, meters_to_yards};

/// Anchor positions for one hole.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Calibration {
    /// `A`: the tee.
    pub tee: NormPoint,
    /// `C`: the green.
    pub green: NormPoint,
}

impl Default for Calibration {
    /// Standard vertical layout: tee low center, green high center.
    fn default() -> Self {
        Self {
            tee: NormPoint::new(DEFAULT_TEE_ANCHOR.0, DEFAULT_TEE_ANCHOR.1),
            green: NormPoint::new(DEFAULT_GREEN_ANCHOR.0, DEFAULT_GREEN_ANCHOR.1),
        }
    }
}

impl Calibration {
    pub fn new(tee: NormPoint, green: NormPoint) -> Self {
        Self { tee, green }
    }

    pub fn anchor(&self, which: Anchor) -> NormPoint {
        match which {
            Anchor::Tee => self.tee,
            Anchor::Green => self.green,
        }
    }

    /// Copy with one anchor moved. The point is clamped on construction.
    pub fn with_anchor(mut self, which: Anchor, point: NormPoint) -> Self {
        let point = NormPoint::new(point.x, point.y);
        match which {
            Anchor::Tee => self.tee = point,
            Anchor::Green => self.green = point,
        }
        self
    }

    /// Normalized distance `‖C − A‖`.
    pub fn separation(&self) -> f64 {
        self.tee.distance_to(&self.green)
    }

    /// Unit vector from tee toward green in image space, if the anchors
    /// are far enough apart to define one.
    pub fn direction(&self) -> Option<DVec2> {
        let v = self.green.to_vec() - self.tee.to_vec();
        if v.length() <= NORM_EPSILON {
            return None;
        }
        Some(v.normalize())
    }

    /// Parameter `t ∈ [0, 1]` of the point on segment `A–C` closest to `point`.
    /// Coincident anchors give 0.
    pub fn project_parameter(&self, point: &NormPoint) -> f64 {
        let a = self.tee.to_vec();
        let ab = self.green.to_vec() - a;
        let ab2 = ab.length_squared();
        if ab2 == 0.0 {
            return 0.0;
        }
        ((point.to_vec() - a).dot(ab) / ab2).clamp(0.0, 1.0)
    }

    /// Closest point on segment `A–C`.
    pub fn closest_point(&self, point: &NormPoint) -> NormPoint {
        self.tee.lerp(&self.green, self.project_parameter(point))
    }
}

/// Linear yards per normalized image unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleFactor {
    yards_per_norm_unit: f64,
}

impl ScaleFactor {
    pub fn yards_per_norm_unit(&self) -> f64 {
        self.yards_per_norm_unit
    }

    /// Yards spanned by a normalized distance.
    pub fn to_yards(&self, norm_distance: f64) -> f64 {
        norm_distance * self.yards_per_norm_unit
    }

    /// Normalized distance spanned by a yardage.
    pub fn to_norm(&self, yards: f64) -> f64 {
        yards / self.yards_per_norm_unit
    }
}

/// Scale from a known tee-green yardage, or `None` when the anchors
/// coincide or the yardage is not a finite positive number.
pub fn scale_from_yards(calibration: &Calibration, tee_to_green_yards: f64) -> Option<ScaleFactor> {
    let separation = calibration.separation();
    if separation <= NORM_EPSILON {
        return None;
    }
    if !tee_to_green_yards.is_finite() || tee_to_green_yards <= 0.0 {
        return None;
    }
    let yards_per_norm_unit = tee_to_green_yards / separation;
    yards_per_norm_unit
        .is_finite()
        .then_some(ScaleFactor { yards_per_norm_unit })
}

/// Scale for a hole: geodetic tee-green yards over the anchor separation.
pub fn derive_scale(calibration: &Calibration, hole: &HoleReference) -> Option<ScaleFactor> {
    let yards = meters_to_yards(distance_meters(&hole.tee, &hole.green));
    scale_from_yards(calibration, yards)
}

/// Calibration plus where it came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CalibrationState {
    pub calibration: Calibration,
    pub mode: CalibrationMode,
}

impl CalibrationState {
    /// Calibration restored from the store.
    pub fn loaded(calibration: Calibration) -> Self {
        Self {
            calibration,
            mode: CalibrationMode::Loaded,
        }
    }

    /// Move an anchor. Always allowed; the point is clamped, never rejected.
    pub fn drag_anchor(&mut self, which: Anchor, point: NormPoint) {
        self.calibration = self.calibration.with_anchor(which, point);
        self.mode = CalibrationMode::UserPlaced;
    }

    pub fn mark_saved(&mut self) {
        self.mode = CalibrationMode::Saved;
    }
}
