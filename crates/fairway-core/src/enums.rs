//! Enumeration types used throughout the overlay.

use serde::{Deserialize, Serialize};

/// One of the two calibration anchors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Anchor {
    /// `A`: where the tee sits on the diagram.
    Tee,
    /// `C`: where the green sits on the diagram.
    Green,
}

/// Where the current calibration came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CalibrationMode {
    /// Fixed default layout, nothing stored for this hole.
    #[default]
    Default,
    /// Moved by the user since it was created or loaded.
    UserPlaced,
    /// Written to the store during this visit.
    Saved,
    /// Restored from the store on entering the hole.
    Loaded,
}

/// Target overlay state for one hole visit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum VisibilityState {
    #[default]
    Showing,
    /// Hidden for the rest of the visit.
    AutoHidden,
}

/// Why the target overlay was auto-hidden.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AutoHideReason {
    /// Player is within the near-green threshold.
    NearGreen,
    /// Tee-to-target leg is shorter than the near-target threshold.
    ShortTarget,
    /// Player is already closer to the green than the target is.
    PastTarget,
}

/// What the presentation layer should do with the target overlay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetOverlay {
    /// No target set.
    #[default]
    Inactive,
    Visible,
    AutoHidden,
    /// A target is set but the calibration cannot produce a scale.
    Suppressed,
}

/// Location provider status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "message")]
pub enum GpsStatus {
    #[default]
    NotStarted,
    Locked,
    /// The host has no location provider.
    Unsupported,
    /// Provider error (permission denied, timeout, ...).
    Error(String),
}

impl GpsStatus {
    pub fn label(&self) -> String {
        match self {
            GpsStatus::NotStarted => "GPS not started".to_string(),
            GpsStatus::Locked => "GPS locked".to_string(),
            GpsStatus::Unsupported => "Geolocation not supported".to_string(),
            GpsStatus::Error(msg) => format!("GPS error: {msg}"),
        }
    }
}
