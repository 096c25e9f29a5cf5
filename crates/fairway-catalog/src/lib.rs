//! Course catalog for FAIRWAY.
//!
//! Clubs, their nines and per-hole tee/green coordinates, plus round
//! building and navigation. The built-in catalog is embedded JSON.

pub mod course;
pub mod round;

pub use fairway_core as core;

pub use course::{image_path, Catalog, CatalogError, Club, CourseType, HoleEntry, Nine};
pub use round::{build_round, Round, RoundHole, RoundMode, RoundSelection};

#[cfg(test)]
mod tests;
