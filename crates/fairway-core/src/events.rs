//! Events emitted by the engine for UI feedback.

use serde::{Deserialize, Serialize};

use crate::enums::AutoHideReason;
use crate::types::{HoleKey, NormPoint};

/// Overlay events, drained into each snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum OverlayEvent {
    /// A new hole visit began.
    HoleEntered { hole_key: HoleKey, loaded: bool },
    TargetPlaced { point: NormPoint },
    /// Placement refused: too close to an anchor.
    TargetRejected { point: NormPoint },
    TargetCleared,
    TargetAutoHidden { reason: AutoHideReason },
    CalibrationSaved { hole_key: HoleKey },
    SaveFailed { hole_key: HoleKey, message: String },
    /// The location provider reported an error.
    FixLost { message: String },
}
