//! Geodesy for FAIRWAY.
//!
//! Great-circle distance, bearing and interpolation, along-track and
//! cross-track decomposition against a tee-green line, and unit conversion.

pub use fairway_core as core;

pub mod geodesy;
pub mod projection;
pub mod units;

// Re-export key functions for convenience.
pub use geodesy::{
    along_track_fraction, bearing_radians, cross_track_meters, distance_meters,
    point_along_great_circle,
};
pub use projection::LocalFrame;
pub use units::{meters_to_yards, round_yards, yards_to_meters};
