//! Core types and definitions for the FAIRWAY yardage overlay.
//!
//! This crate defines the vocabulary shared across all other crates:
//! geodetic and image-space points, commands, events, snapshots,
//! and tuning constants. It has no dependency on any runtime framework.

pub mod commands;
pub mod constants;
pub mod enums;
pub mod events;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;
