//! Overlay engine for FAIRWAY.
//!
//! Owns the current hole visit and the latest position fix, applies user
//! commands, persists per-hole calibration and produces `OverlaySnapshot`s
//! for the presentation layer.

pub mod engine;
pub mod projector;
pub mod session;
pub mod snapshot;
pub mod store;

pub use fairway_core as core;
pub use engine::{OverlayConfig, OverlayEngine};
pub use snapshot::target_drawn;
pub use store::{HoleRecord, HoleStore, JsonFileStore, MemoryStore, StoreError};
