//! One visit to one hole.
//!
//! All per-hole state lives here so that switching holes drops it in one
//! move: calibration, target, auto-hide state, double-tap tracking and the
//! marker animation.

use fairway_core::enums::{Anchor, AutoHideReason, VisibilityState};
use fairway_core::types::{HoleKey, HoleReference, LiveFix, NormPoint, RenderSize};
use fairway_overlay::visibility::{evaluate, VisibilityContext, VisibilityThresholds};
use fairway_overlay::{
    derive_scale, place_target, Calibration, CalibrationState, ScaleFactor, Smoother, Target,
    TargetLegs,
};

use crate::projector::{self, LiveProjection};
use crate::store::HoleRecord;

#[derive(Debug, Clone)]
pub struct HoleSession {
    key: HoleKey,
    hole: HoleReference,
    calibration: CalibrationState,
    target: Target,
    visibility: VisibilityState,
    smoother: Smoother,
    projection: Option<LiveProjection>,
    last_target_tap_ms: Option<i64>,
}

impl HoleSession {
    /// Start a visit, restoring a saved record when there is one.
    pub fn new(key: HoleKey, hole: HoleReference, saved: Option<HoleRecord>, smoothing_ms: f64) -> Self {
        let (calibration, target) = match saved {
            Some(record) => {
                let (cal, target) = record.restore(&Calibration::default());
                (CalibrationState::loaded(cal), target)
            }
            None => {
                let state = CalibrationState::default();
                let target = Target::parked(&state.calibration);
                (state, target)
            }
        };

        Self {
            key,
            hole,
            calibration,
            target,
            visibility: VisibilityState::Showing,
            smoother: Smoother::new(smoothing_ms),
            projection: None,
            last_target_tap_ms: None,
        }
    }

    pub fn key(&self) -> &HoleKey {
        &self.key
    }

    pub fn hole(&self) -> &HoleReference {
        &self.hole
    }

    pub fn calibration(&self) -> &CalibrationState {
        &self.calibration
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    pub fn visibility(&self) -> VisibilityState {
        self.visibility
    }

    pub fn projection(&self) -> Option<&LiveProjection> {
        self.projection.as_ref()
    }

    pub fn marker(&self) -> Option<NormPoint> {
        self.smoother.current()
    }

    /// Recomputed on every call so it always reflects the current anchors.
    pub fn scale(&self) -> Option<ScaleFactor> {
        derive_scale(&self.calibration.calibration, &self.hole)
    }

    pub fn target_legs(&self) -> Option<TargetLegs> {
        TargetLegs::compute(&self.calibration.calibration, &self.target, self.scale())
    }

    pub fn drag_anchor(&mut self, which: Anchor, point: NormPoint) {
        self.calibration.drag_anchor(which, point);
    }

    /// Place the target from a tap. A new placement shows the overlay again.
    pub fn place_target(&mut self, click: &NormPoint, render: &RenderSize, guard_px: f64) -> Option<NormPoint> {
        let target = place_target(&self.calibration.calibration, click, render, guard_px)?;
        self.target = target;
        self.visibility = VisibilityState::Showing;
        self.last_target_tap_ms = None;
        Some(target.point)
    }

    pub fn drag_target(&mut self, point: NormPoint) -> bool {
        self.target.drag(point)
    }

    /// Register a tap on the target. Two taps within `window_ms` clear it;
    /// returns true when this tap did.
    pub fn tap_target(&mut self, at_ms: i64, window_ms: i64) -> bool {
        if !self.target.active {
            self.last_target_tap_ms = None;
            return false;
        }
        match self.last_target_tap_ms {
            Some(prev) if at_ms >= prev && at_ms - prev <= window_ms => {
                self.clear_target();
                true
            }
            _ => {
                self.last_target_tap_ms = Some(at_ms);
                false
            }
        }
    }

    pub fn clear_target(&mut self) {
        self.target.clear();
        self.last_target_tap_ms = None;
    }

    /// What would be written to the store right now.
    pub fn record(&self) -> HoleRecord {
        HoleRecord::capture(&self.calibration.calibration, &self.target)
    }

    pub fn mark_saved(&mut self) {
        self.calibration.mark_saved();
    }

    /// Recompute everything that depends on the fix or the anchors and run
    /// the auto-hide rules. Returns the reason if the overlay just hid.
    pub fn refresh(
        &mut self,
        fix: Option<&LiveFix>,
        max_lateral_yards: f64,
        thresholds: VisibilityThresholds,
    ) -> Option<AutoHideReason> {
        self.projection =
            fix.and_then(|f| projector::project(f, &self.hole, &self.calibration.calibration, max_lateral_yards));
        self.smoother.set_goal(self.projection.map(|p| p.position));

        let legs = self.target_legs();
        let update = evaluate(&VisibilityContext {
            state: self.visibility,
            you_to_green_yards: fix.and_then(|f| projector::you_to_green_yards(f, &self.hole)),
            tee_to_target_yards: legs.map(|l| l.tee_to_target_yards),
            target_to_green_yards: legs.map(|l| l.target_to_green_yards),
            thresholds,
        });
        self.visibility = update.new_state;
        if update.state_changed {
            update.reason
        } else {
            None
        }
    }

    /// Advance the marker animation.
    pub fn tick(&mut self, elapsed_ms: f64) -> Option<NormPoint> {
        self.smoother.tick(elapsed_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fairway_core::constants::{DOUBLE_TAP_MS, TARGET_ENDPOINT_GUARD_PX};
    use fairway_core::enums::CalibrationMode;
    use fairway_core::types::GeoPoint;

    fn session() -> HoleSession {
        HoleSession::new(
            HoleKey::new("Belle Glades", "Calusa", 1),
            HoleReference::new(
                GeoPoint::new(28.844444, -81.955278),
                GeoPoint::new(28.841111, -81.954722),
                5,
            ),
            None,
            350.0,
        )
    }

    fn render() -> RenderSize {
        RenderSize::new(360.0, 640.0)
    }

    #[test]
    fn test_fresh_visit_defaults() {
        let s = session();
        assert_eq!(s.calibration().mode, CalibrationMode::Default);
        assert!(!s.target().active);
        assert_eq!(s.target().point, NormPoint::new(0.5, 0.5));
        assert_eq!(s.visibility(), VisibilityState::Showing);
        assert!(s.marker().is_none());
    }

    #[test]
    fn test_restored_visit() {
        let record = HoleRecord {
            tee: Some(NormPoint::new(0.4, 0.9)),
            green: Some(NormPoint::new(0.6, 0.1)),
            target: None,
            target_active: true,
        };
        let s = HoleSession::new(session().key().clone(), *session().hole(), Some(record), 350.0);
        assert_eq!(s.calibration().mode, CalibrationMode::Loaded);
        assert!(s.target().active);
        assert!(s.target().point.distance_to(&NormPoint::new(0.5, 0.5)) < 1e-12);
    }

    #[test]
    fn test_double_tap_clears() {
        let mut s = session();
        s.place_target(&NormPoint::new(0.5, 0.5), &render(), TARGET_ENDPOINT_GUARD_PX).unwrap();
        assert!(!s.tap_target(1_000, DOUBLE_TAP_MS));
        assert!(s.tap_target(1_200, DOUBLE_TAP_MS));
        assert!(!s.target().active);
    }

    #[test]
    fn test_slow_taps_do_not_clear() {
        let mut s = session();
        s.place_target(&NormPoint::new(0.5, 0.5), &render(), TARGET_ENDPOINT_GUARD_PX).unwrap();
        assert!(!s.tap_target(1_000, DOUBLE_TAP_MS));
        assert!(!s.tap_target(1_500, DOUBLE_TAP_MS));
        assert!(!s.tap_target(2_000, DOUBLE_TAP_MS));
        assert!(s.target().active);
    }

    #[test]
    fn test_refresh_without_fix_clears_marker() {
        let mut s = session();
        let fix = LiveFix::new(s.hole().tee, 5.0, 0);
        s.refresh(Some(&fix), 250.0, VisibilityThresholds::default());
        assert!(s.tick(16.0).is_some());

        s.refresh(None, 250.0, VisibilityThresholds::default());
        assert!(s.projection().is_none());
        assert!(s.marker().is_none());
    }

    #[test]
    fn test_placement_reshows_overlay() {
        let mut s = session();
        s.place_target(&NormPoint::new(0.5, 0.5), &render(), TARGET_ENDPOINT_GUARD_PX).unwrap();
        let at_green = LiveFix::new(s.hole().green, 5.0, 0);
        assert_eq!(
            s.refresh(Some(&at_green), 250.0, VisibilityThresholds::default()),
            Some(AutoHideReason::NearGreen)
        );
        assert_eq!(s.visibility(), VisibilityState::AutoHidden);

        s.place_target(&NormPoint::new(0.5, 0.6), &render(), TARGET_ENDPOINT_GUARD_PX).unwrap();
        assert_eq!(s.visibility(), VisibilityState::Showing);
    }
}
