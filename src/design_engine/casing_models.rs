//! Casing staging rules
//!
//! Depth and diameter rules for each section of the casing schedule, from
//! the pre-collar at surface down to the screen. Depths are metres below
//! ground; every section is `(top, bottom)`.

use crate::config::defaults::{
    INTERMEDIATE_CASING_OFFSET_M, PRE_COLLAR_CASING_DIAMETER_M, PRE_COLLAR_DEFAULT_DEPTH_M,
    PRE_COLLAR_SCALED_BAND_M, SCREEN_RISER_LENGTH_M, SUPERFICIAL_CASING_THRESHOLD_M,
};
use crate::design_engine::nominal::next_largest;
use crate::error::{CalculationError, NominalSizeError};

// ============================================================================
// Pre-collar / superficial casing
// ============================================================================

/// Pre-collar depths from the base of the top aquifer.
///
/// Inside the (10.9, 21.8] band the depth is 6 × ⌊1 + base × 11/6⌋,
/// otherwise 12 m.
pub fn pre_collar_depths(depth_to_aquifer_base: f64) -> (f64, f64) {
    let (low, high) = PRE_COLLAR_SCALED_BAND_M;
    let depth = if low < depth_to_aquifer_base && depth_to_aquifer_base <= high {
        6.0 * (1.0 + depth_to_aquifer_base * 11.0 / 6.0).floor()
    } else {
        PRE_COLLAR_DEFAULT_DEPTH_M
    };
    (0.0, depth)
}

/// 30" casing run inside a 36" hole.
pub fn pre_collar_casing_diameter() -> f64 {
    PRE_COLLAR_CASING_DIAMETER_M
}

pub fn is_superficial_casing_required(depth_to_aquifer_base: f64) -> bool {
    depth_to_aquifer_base > SUPERFICIAL_CASING_THRESHOLD_M
}

/// Superficial casing runs from surface to 1.1 × (base + 5) m.
pub fn superficial_casing_depths(depth_to_aquifer_base: f64) -> (f64, f64) {
    (0.0, 1.1 * (depth_to_aquifer_base + 5.0))
}

/// One nominal size above the casing it must pass (pump chamber if present,
/// otherwise intermediate casing).
pub fn superficial_casing_diameter(
    inner_casing_diameter: f64,
    casing_sizes: &[f64],
) -> Result<f64, NominalSizeError> {
    next_largest(inner_casing_diameter, casing_sizes)
}

// ============================================================================
// Pump chamber
// ============================================================================

/// A production bore needs a separate pump chamber when the pump housing
/// will not fit inside the screen-sized casing below it. Never for injection.
pub fn is_separate_pump_chamber_required(
    is_production_well: bool,
    intermediate_casing_diameter: f64,
    minimum_pump_housing_diameter: f64,
) -> bool {
    is_production_well && minimum_pump_housing_diameter > intermediate_casing_diameter
}

pub fn pump_chamber_depths(pump_inlet_depth: f64) -> (f64, f64) {
    (0.0, pump_inlet_depth)
}

pub fn pump_chamber_diameter(
    minimum_pump_housing_diameter: f64,
    casing_sizes: &[f64],
) -> Result<f64, NominalSizeError> {
    next_largest(minimum_pump_housing_diameter, casing_sizes)
}

// ============================================================================
// Intermediate casing / screen riser / screen
// ============================================================================

/// Intermediate casing hangs from the pump chamber bottom (or surface) to
/// 10 m above the top of screen.
pub fn intermediate_casing_depths(
    depth_to_top_screen: f64,
    pump_chamber_bottom: Option<f64>,
) -> (f64, f64) {
    (
        pump_chamber_bottom.unwrap_or(0.0),
        depth_to_top_screen - INTERMEDIATE_CASING_OFFSET_M,
    )
}

/// One size above the screen, or the minimum-total-casing production
/// diameter when that is larger.
pub fn intermediate_casing_diameter(
    screen_diameter: f64,
    casing_sizes: &[f64],
    min_total_casing_diameter: Option<f64>,
) -> Result<f64, NominalSizeError> {
    let one_up = next_largest(screen_diameter, casing_sizes)?;
    Ok(min_total_casing_diameter.map_or(one_up, |d| one_up.max(d)))
}

pub fn screen_riser_depths(depth_to_top_screen: f64) -> (f64, f64) {
    (depth_to_top_screen - SCREEN_RISER_LENGTH_M, depth_to_top_screen)
}

/// Screen interval; the bottom is rounded to whole metres, ties to even.
pub fn screen_depths(
    depth_to_top_screen: f64,
    screen_length: f64,
    aquifer_thickness: f64,
) -> Result<(f64, f64), CalculationError> {
    if aquifer_thickness < screen_length {
        return Err(CalculationError::ScreenExceedsAquifer {
            screen_length,
            aquifer_thickness,
        });
    }
    Ok((
        depth_to_top_screen,
        (depth_to_top_screen + screen_length).round_ties_even(),
    ))
}
