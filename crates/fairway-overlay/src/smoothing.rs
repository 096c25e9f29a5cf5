//! Live-marker smoothing.
//!
//! The displayed marker eases toward each newly projected position over a
//! fixed window instead of snapping. Only the latest goal matters: a new goal
//! restarts the window from wherever the marker currently is.

use fairway_core::constants::SMOOTHING_DURATION_MS;
use fairway_core::types::NormPoint;

/// Cubic ease-out on `[0, 1]`.
pub fn ease_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// Position `elapsed_ms` into an ease from `start` to `goal`.
/// At or past `duration_ms` this is exactly `goal`.
pub fn ease_toward(start: &NormPoint, goal: &NormPoint, elapsed_ms: f64, duration_ms: f64) -> NormPoint {
    if duration_ms <= 0.0 || elapsed_ms >= duration_ms {
        return *goal;
    }
    let t = (elapsed_ms.max(0.0) / duration_ms).clamp(0.0, 1.0);
    start.lerp(goal, ease_out_cubic(t))
}

/// Easing state for the live marker.
#[derive(Debug, Clone)]
pub struct Smoother {
    duration_ms: f64,
    start: Option<NormPoint>,
    goal: Option<NormPoint>,
    current: Option<NormPoint>,
    elapsed_ms: f64,
}

impl Default for Smoother {
    fn default() -> Self {
        Self::new(SMOOTHING_DURATION_MS)
    }
}

impl Smoother {
    pub fn new(duration_ms: f64) -> Self {
        Self {
            duration_ms,
            start: None,
            goal: None,
            current: None,
            elapsed_ms: 0.0,
        }
    }

    /// Set the position to ease toward. `None` clears all state at once.
    pub fn set_goal(&mut self, goal: Option<NormPoint>) {
        let Some(goal) = goal else {
            self.reset();
            return;
        };

        if self.goal == Some(goal) {
            return;
        }

        match self.current {
            // Nothing on screen yet: appear in place.
            None => {
                self.start = Some(goal);
                self.current = Some(goal);
                self.elapsed_ms = self.duration_ms;
            }
            Some(current) => {
                self.start = Some(current);
                self.elapsed_ms = 0.0;
            }
        }
        self.goal = Some(goal);
    }

    /// Advance by `elapsed_ms` and return the position to draw.
    pub fn tick(&mut self, elapsed_ms: f64) -> Option<NormPoint> {
        let (start, goal) = (self.start?, self.goal?);
        if elapsed_ms.is_finite() && elapsed_ms > 0.0 {
            self.elapsed_ms = (self.elapsed_ms + elapsed_ms).min(self.duration_ms.max(0.0));
        }
        let next = ease_toward(&start, &goal, self.elapsed_ms, self.duration_ms);
        self.current = Some(next);
        self.current
    }

    pub fn current(&self) -> Option<NormPoint> {
        self.current
    }

    pub fn goal(&self) -> Option<NormPoint> {
        self.goal
    }

    /// Still moving toward the goal.
    pub fn is_animating(&self) -> bool {
        self.goal.is_some() && self.elapsed_ms < self.duration_ms
    }

    pub fn reset(&mut self) {
        self.start = None;
        self.goal = None;
        self.current = None;
        self.elapsed_ms = 0.0;
    }
}
