//! Overlay models for FAIRWAY.
//!
//! The two-point calibration and its scale factor, the target waypoint,
//! the target visibility state machine, and live-marker smoothing.
//! Pure functions over plain data; no I/O.

pub mod calibration;
pub mod smoothing;
pub mod target;
pub mod visibility;

pub use fairway_core as core;

pub use calibration::{derive_scale, Calibration, CalibrationState, ScaleFactor};
pub use smoothing::Smoother;
pub use target::{place_target, Target, TargetLegs};
