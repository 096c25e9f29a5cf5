//! Geodetic constants and overlay tuning parameters.

// --- Geodesy ---

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Yards per meter.
pub const YARDS_PER_METER: f64 = 1.093_613_3;

/// Reference segments at or below this length (meters) are degenerate.
pub const GEO_DEGENERATE_M: f64 = 0.5;

/// Image-space segments at or below this length (normalized units) are degenerate.
pub const NORM_EPSILON: f64 = 1e-4;

// --- Calibration defaults ---

/// Default tee anchor: low center of the diagram.
pub const DEFAULT_TEE_ANCHOR: (f64, f64) = (0.5, 0.75);

/// Default green anchor: high center of the diagram.
pub const DEFAULT_GREEN_ANCHOR: (f64, f64) = (0.5, 0.25);

// --- Target ---

/// Placement is refused when the projected target lands this close (px) to an anchor.
pub const TARGET_ENDPOINT_GUARD_PX: f64 = 35.0;

/// Two taps on the target within this window (ms) clear it.
pub const DOUBLE_TAP_MS: i64 = 350;

// --- Projection ---

/// Lateral offset (yards) beyond which the live marker stops moving sideways.
pub const MAX_LATERAL_YARDS: f64 = 250.0;

// --- Visibility ---

/// Target overlay auto-hides once the player is this close (yards) to the green.
pub const AUTO_HIDE_WITHIN_GREEN_YARDS: f64 = 150.0;

/// Target overlay auto-hides when the tee-to-target leg is this short (yards).
pub const AUTO_HIDE_WITHIN_TARGET_YARDS: f64 = 100.0;

// --- Display ---

/// Duration of the live-marker ease-out (ms).
pub const SMOOTHING_DURATION_MS: f64 = 350.0;

/// Hole diagrams are drawn at a 9:16 aspect.
pub const DIAGRAM_ASPECT: (f64, f64) = (9.0, 16.0);

/// Render width (px) assumed until the presentation layer reports one.
pub const DEFAULT_RENDER_WIDTH: f64 = 360.0;

/// Render height (px) assumed until the presentation layer reports one.
pub const DEFAULT_RENDER_HEIGHT: f64 = DEFAULT_RENDER_WIDTH * DIAGRAM_ASPECT.1 / DIAGRAM_ASPECT.0;

/// Placeholder shown wherever a yardage is unavailable.
pub const UNAVAILABLE_PLACEHOLDER: &str = "—";

// --- Catalog ---

/// Par assigned by hole number when the catalog has none.
pub const DEFAULT_PAR_CYCLE: [u8; 3] = [4, 3, 5];
