//! Target waypoint `B`, splitting the hole into tee→target and target→green.

use serde::{Deserialize, Serialize};

use fairway_core::types::{NormPoint, RenderSize};

use crate::calibration::{Calibration, ScaleFactor};

/// Target point and whether it is in use.
///
/// Only `active` decides whether a target exists; `point` survives a clear
/// so a later re-activation starts from the last placement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub point: NormPoint,
    pub active: bool,
}

impl Target {
    /// Inactive target parked at the midpoint of the anchors.
    pub fn parked(calibration: &Calibration) -> Self {
        Self {
            point: calibration.tee.midpoint(&calibration.green),
            active: false,
        }
    }

    pub fn clear(&mut self) {
        self.active = false;
    }

    /// Move an active target. Free movement (it may leave the `A–C` line),
    /// clamped into the image. Returns false when no target is active.
    pub fn drag(&mut self, point: NormPoint) -> bool {
        if !self.active {
            return false;
        }
        self.point = NormPoint::new(point.x, point.y);
        true
    }
}

/// Place a target from a tap at `click`.
///
/// The tap is projected onto segment `A–C`. Placement is refused (`None`)
/// when the projected point is within `guard_px` of either anchor at the
/// given render size.
pub fn place_target(
    calibration: &Calibration,
    click: &NormPoint,
    render: &RenderSize,
    guard_px: f64,
) -> Option<Target> {
    let projected = calibration.closest_point(click);

    let p = projected.to_px(render);
    let near_tee = p.distance(calibration.tee.to_px(render)) < guard_px;
    let near_green = p.distance(calibration.green.to_px(render)) < guard_px;
    if near_tee || near_green {
        return None;
    }

    Some(Target {
        point: projected,
        active: true,
    })
}

/// Leg yardages through the target, from image distances and the scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetLegs {
    pub tee_to_target_yards: f64,
    pub target_to_green_yards: f64,
}

impl TargetLegs {
    /// `None` when the target is inactive or there is no scale.
    pub fn compute(
        calibration: &Calibration,
        target: &Target,
        scale: Option<ScaleFactor>,
    ) -> Option<TargetLegs> {
        if !target.active {
            return None;
        }
        let scale = scale?;
        Some(TargetLegs {
            tee_to_target_yards: scale.to_yards(calibration.tee.distance_to(&target.point)),
            target_to_green_yards: scale.to_yards(target.point.distance_to(&calibration.green)),
        })
    }
}
