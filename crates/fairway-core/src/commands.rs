//! User gestures sent from the presentation layer to the engine.
//!
//! Commands are queued and applied at the next tick boundary, in order.

use serde::{Deserialize, Serialize};

use crate::enums::Anchor;
use crate::types::{NormPoint, RenderSize};

/// All possible overlay actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum OverlayCommand {
    // --- Calibration ---
    /// Move the tee or green anchor.
    DragAnchor { anchor: Anchor, point: NormPoint },
    /// Persist the current anchors and target for this hole.
    SaveCalibration,

    // --- Target ---
    /// Tap on the tee-green line to place the target.
    PlaceTarget { point: NormPoint },
    /// Move the active target.
    DragTarget { point: NormPoint },
    /// Tap on the active target; two taps in quick succession clear it.
    TapTarget { at_ms: i64 },
    /// Remove the target.
    ClearTarget,

    // --- Layout ---
    /// Report the rendered diagram size.
    SetRenderSize { size: RenderSize },
}
