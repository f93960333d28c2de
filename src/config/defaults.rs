//! Built-in catalogs and fixed design constants.
//!
//! Centralises the numbers the sizing formulas rely on. Values that an
//! operator may tune live in `DesignConstants` instead.

use crate::types::{CasingSize, DrillingSize};

// ============================================================================
// Screen sizing
// ============================================================================

/// Drawdown assumed when sizing the screen (m).
pub const SCREEN_DESIGN_DRAWDOWN_M: f64 = 25.0;

/// Bore radius assumed when sizing the screen (m). 3 inches.
pub const SCREEN_DESIGN_BORE_RADIUS_M: f64 = 0.0762;

/// Aquifer specific storage assumed when sizing the screen (1/m).
pub const SCREEN_DESIGN_SPECIFIC_STORAGE: f64 = 2e-4;

/// Injection bores need twice the production screen length.
pub const INJECTION_SCREEN_LENGTH_FACTOR: f64 = 2.0;

/// Screen length uncertainty band, as fractions of the nominal length.
pub const SCREEN_LENGTH_ERROR_LOWER: f64 = 0.9;
pub const SCREEN_LENGTH_ERROR_UPPER: f64 = 1.1;

/// Maximum up-hole friction loss tolerated through casing and screen (m).
pub const MAX_UP_HOLE_FRICTION_M: f64 = 20.0;

/// Hazen-Williams SI coefficient.
pub const HAZEN_WILLIAMS_COEFF: f64 = 10.67;
pub const HAZEN_WILLIAMS_FLOW_EXPONENT: f64 = 1.852;
pub const HAZEN_WILLIAMS_DIAMETER_EXPONENT: f64 = 4.8704;

// ============================================================================
// Casing staging
// ============================================================================

/// Intermediate casing stops this far above the top of screen (m).
pub const INTERMEDIATE_CASING_OFFSET_M: f64 = 10.0;

/// Screen riser starts this far above the top of screen (m).
pub const SCREEN_RISER_LENGTH_M: f64 = 20.0;

/// Pre-collar casing diameter (m). 30 inches, run inside a 36-inch hole.
pub const PRE_COLLAR_CASING_DIAMETER_M: f64 = 0.762;

/// Pre-collar depth when the top aquifer base is outside the scaled band (m).
pub const PRE_COLLAR_DEFAULT_DEPTH_M: f64 = 12.0;

/// Top aquifer base band (m) in which the pre-collar depth scales with it.
pub const PRE_COLLAR_SCALED_BAND_M: (f64, f64) = (10.9, 21.8);

/// Superficial casing is needed below this top aquifer base depth (m).
pub const SUPERFICIAL_CASING_THRESHOLD_M: f64 = 21.8;

// ============================================================================
// Pump sizing
// ============================================================================

pub const INCHES_TO_METRES: f64 = 0.0254;

/// Upper flow bounds (L/s, exclusive) and the pump class (inches) below each.
pub const PUMP_DIAMETER_CLASSES: [(f64, f64); 4] = [(5.0, 4.0), (10.0, 6.0), (50.0, 8.0), (70.0, 10.0)];

/// Pump class (inches) for flows at or above the last bound.
pub const PUMP_DIAMETER_MAX_INCHES: f64 = 12.0;

/// Floor for the derived safety margin (m).
pub const MIN_SAFETY_MARGIN_M: f64 = 10.0;

// ============================================================================
// Catalogs
// ============================================================================

const CASING_TABLE: [(f64, f64, f64); 14] = [
    (4.0, 0.1016, 0.1905),
    (4.5, 0.1143, 0.2159),
    (5.0, 0.127, 0.2159),
    (5.5, 0.1397, 0.2286),
    (6.625, 0.168275, 0.269875),
    (7.0, 0.1778, 0.269875),
    (8.625, 0.219075, 0.31115),
    (9.625, 0.244475, 0.34925),
    (10.75, 0.27305, 0.381),
    (13.375, 0.339725, 0.4445),
    (18.625, 0.473075, 0.6096),
    (20.0, 0.508, 0.6096),
    (24.0, 0.6096, 0.7112),
    (30.0, 0.762, 0.9144),
];

const DRILLING_TABLE: [(f64, f64, f64); 21] = [
    (7.5, 0.1905, 0.1016),
    (8.5, 0.2159, 0.1143),
    (9.0, 0.2286, 0.127),
    (9.5, 0.2413, 0.1397),
    (10.625, 0.269875, 0.168275),
    (11.625, 0.295275, 0.1778),
    (12.25, 0.31115, 0.1778),
    (13.75, 0.34925, 0.244475),
    (15.0, 0.381, 0.27305),
    (16.0, 0.4064, 0.27305),
    (17.5, 0.4445, 0.339725),
    (18.5, 0.4699, 0.339725),
    (20.0, 0.508, 0.339725),
    (22.0, 0.5588, 0.339725),
    (24.0, 0.6096, 0.508),
    (26.0, 0.6604, 0.508),
    (28.0, 0.7112, 0.6096),
    (30.0, 0.762, 0.6096),
    (32.0, 0.8128, 0.6096),
    (34.0, 0.8636, 0.762),
    (36.0, 0.9144, 0.762),
];

/// Standard steel casing sizes, 4" to 30".
pub fn default_casing_sizes() -> Vec<CasingSize> {
    CASING_TABLE
        .iter()
        .map(|&(inches, metres, recommended_bit_metres)| CasingSize {
            inches,
            metres,
            recommended_bit_metres,
        })
        .collect()
}

/// Standard drill-bit sizes, 7.5" to 36".
pub fn default_drilling_sizes() -> Vec<DrillingSize> {
    DRILLING_TABLE
        .iter()
        .map(|&(inches, metres, recommended_screen_metres)| DrillingSize {
            inches,
            metres,
            recommended_screen_metres,
        })
        .collect()
}
