//! Target overlay visibility state machine.
//!
//! Pure functions that decide whether the forward-looking target overlay
//! should keep showing during one hole visit. Once the player is at the
//! target or near the green the overlay is hidden for the rest of the visit.

use serde::{Deserialize, Serialize};

use fairway_core::constants::{AUTO_HIDE_WITHIN_GREEN_YARDS, AUTO_HIDE_WITHIN_TARGET_YARDS};
use fairway_core::enums::{AutoHideReason, TargetOverlay, VisibilityState};

/// Auto-hide distances in yards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VisibilityThresholds {
    /// Hide once the player is this close to the green.
    pub near_green_yards: f64,
    /// Hide when the tee-to-target leg is this short.
    pub near_target_yards: f64,
}

impl Default for VisibilityThresholds {
    fn default() -> Self {
        Self {
            near_green_yards: AUTO_HIDE_WITHIN_GREEN_YARDS,
            near_target_yards: AUTO_HIDE_WITHIN_TARGET_YARDS,
        }
    }
}

/// Input to the visibility FSM for one update.
pub struct VisibilityContext {
    pub state: VisibilityState,
    /// Live distance to the green; `None` without a fix.
    pub you_to_green_yards: Option<f64>,
    pub tee_to_target_yards: Option<f64>,
    pub target_to_green_yards: Option<f64>,
    pub thresholds: VisibilityThresholds,
}

/// Output from the visibility FSM.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilityUpdate {
    pub new_state: VisibilityState,
    pub reason: Option<AutoHideReason>,
    pub state_changed: bool,
}

/// Evaluate the FSM. Nothing is decided until there is a live fix.
pub fn evaluate(ctx: &VisibilityContext) -> VisibilityUpdate {
    let no_change = VisibilityUpdate {
        new_state: ctx.state,
        reason: None,
        state_changed: false,
    };

    // One-way within a visit
    if ctx.state == VisibilityState::AutoHidden {
        return no_change;
    }

    let Some(you_to_green) = ctx.you_to_green_yards else {
        return no_change;
    };

    match auto_hide_reason(ctx, you_to_green) {
        Some(reason) => VisibilityUpdate {
            new_state: VisibilityState::AutoHidden,
            reason: Some(reason),
            state_changed: true,
        },
        None => no_change,
    }
}

fn auto_hide_reason(ctx: &VisibilityContext, you_to_green: f64) -> Option<AutoHideReason> {
    if you_to_green <= ctx.thresholds.near_green_yards {
        return Some(AutoHideReason::NearGreen);
    }

    if let Some(tee_to_target) = ctx.tee_to_target_yards {
        if tee_to_target <= ctx.thresholds.near_target_yards {
            return Some(AutoHideReason::ShortTarget);
        }
    }

    if let Some(target_to_green) = ctx.target_to_green_yards {
        if you_to_green < target_to_green {
            return Some(AutoHideReason::PastTarget);
        }
    }

    None
}

/// What to draw for the target, given the FSM state and the inputs it needs.
pub fn target_overlay(
    state: VisibilityState,
    target_active: bool,
    scale_available: bool,
) -> TargetOverlay {
    if !target_active {
        return TargetOverlay::Inactive;
    }
    if !scale_available {
        return TargetOverlay::Suppressed;
    }
    match state {
        VisibilityState::Showing => TargetOverlay::Visible,
        VisibilityState::AutoHidden => TargetOverlay::AutoHidden,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(
        state: VisibilityState,
        you: Option<f64>,
        tee_to_target: Option<f64>,
        target_to_green: Option<f64>,
    ) -> VisibilityContext {
        VisibilityContext {
            state,
            you_to_green_yards: you,
            tee_to_target_yards: tee_to_target,
            target_to_green_yards: target_to_green,
            thresholds: VisibilityThresholds::default(),
        }
    }

    #[test]
    fn test_stays_showing_far_from_everything() {
        let update = evaluate(&ctx(VisibilityState::Showing, Some(380.0), Some(220.0), Some(190.0)));
        assert!(!update.state_changed);
        assert_eq!(update.new_state, VisibilityState::Showing);
    }

    #[test]
    fn test_near_green_hides() {
        let update = evaluate(&ctx(VisibilityState::Showing, Some(150.0), None, None));
        assert!(update.state_changed);
        assert_eq!(update.new_state, VisibilityState::AutoHidden);
        assert_eq!(update.reason, Some(AutoHideReason::NearGreen));
    }

    #[test]
    fn test_short_target_hides() {
        let update = evaluate(&ctx(VisibilityState::Showing, Some(400.0), Some(100.0), Some(300.0)));
        assert_eq!(update.reason, Some(AutoHideReason::ShortTarget));
    }

    #[test]
    fn test_past_target_hides() {
        let update = evaluate(&ctx(VisibilityState::Showing, Some(180.0), Some(220.0), Some(190.0)));
        assert_eq!(update.reason, Some(AutoHideReason::PastTarget));
    }

    #[test]
    fn test_no_fix_no_decision() {
        let update = evaluate(&ctx(VisibilityState::Showing, None, Some(50.0), Some(300.0)));
        assert!(!update.state_changed);
    }

    #[test]
    fn test_auto_hidden_is_sticky() {
        let update = evaluate(&ctx(VisibilityState::AutoHidden, Some(500.0), Some(300.0), Some(100.0)));
        assert!(!update.state_changed);
        assert_eq!(update.new_state, VisibilityState::AutoHidden);
    }

    #[test]
    fn test_target_overlay_resolution() {
        assert_eq!(target_overlay(VisibilityState::Showing, false, true), TargetOverlay::Inactive);
        assert_eq!(target_overlay(VisibilityState::Showing, true, false), TargetOverlay::Suppressed);
        assert_eq!(target_overlay(VisibilityState::Showing, true, true), TargetOverlay::Visible);
        assert_eq!(target_overlay(VisibilityState::AutoHidden, true, true), TargetOverlay::AutoHidden);
    }
}
