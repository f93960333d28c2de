//! Screened interval sizing models
//!
//! - Minimum screen length (Cooper-Jacob drawdown approximation)
//! - Minimum open hole diameter from sand face velocity
//! - Hazen-Williams up-hole friction through production casing
//! - Minimum screen diameter keeping total friction under the limit
//! - Total casing surface proxy used to rank production candidates

use std::f64::consts::PI;

use crate::config::defaults::{
    HAZEN_WILLIAMS_COEFF, HAZEN_WILLIAMS_DIAMETER_EXPONENT, HAZEN_WILLIAMS_FLOW_EXPONENT,
    INJECTION_SCREEN_LENGTH_FACTOR, MAX_UP_HOLE_FRICTION_M, SCREEN_DESIGN_BORE_RADIUS_M,
    SCREEN_DESIGN_DRAWDOWN_M, SCREEN_DESIGN_SPECIFIC_STORAGE, SCREEN_LENGTH_ERROR_LOWER,
    SCREEN_LENGTH_ERROR_UPPER,
};
use crate::error::CalculationError;
use crate::types::ScreenLengthBand;

fn finite(quantity: &'static str, value: f64) -> Result<f64, CalculationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalculationError::NonFinite { quantity, value })
    }
}

// ============================================================================
// Screen length
// ============================================================================

/// Minimum screen length and its uncertainty band
///
/// Formula: SL = (2.3 × Q / (4π × K × Sw)) × log₁₀(2.25 × K × t / (r² × Ss))
///
/// Where:
/// - Q = required flow rate (m³/day)
/// - K = hydraulic conductivity (m/day)
/// - t = bore lifetime (days)
/// - Sw = design drawdown (25 m)
/// - r = bore radius (0.0762 m)
/// - Ss = specific storage (2e-4 1/m)
///
/// Injection bores double SL. The result is then capped at the aquifer
/// thickness, and so is the upper end of the ±10% band.
pub fn minimum_screen_length(
    flow_rate_m3_day: f64,
    hydraulic_conductivity: f64,
    bore_lifetime_days: f64,
    aquifer_thickness: f64,
    is_production_well: bool,
) -> Result<(f64, ScreenLengthBand), CalculationError> {
    if aquifer_thickness < 0.0 {
        return Err(CalculationError::NegativeAquiferThickness(aquifer_thickness));
    }

    let log_term = (2.25 * hydraulic_conductivity * bore_lifetime_days
        / (SCREEN_DESIGN_BORE_RADIUS_M.powi(2) * SCREEN_DESIGN_SPECIFIC_STORAGE))
        .log10();
    let mut screen_length = 2.3 * flow_rate_m3_day
        / (4.0 * PI * hydraulic_conductivity * SCREEN_DESIGN_DRAWDOWN_M)
        * log_term;
    finite("screen length", screen_length)?;

    if !is_production_well {
        screen_length *= INJECTION_SCREEN_LENGTH_FACTOR;
    }
    let screen_length = screen_length.min(aquifer_thickness);

    let band = ScreenLengthBand {
        lower: screen_length * SCREEN_LENGTH_ERROR_LOWER,
        upper: (screen_length * SCREEN_LENGTH_ERROR_UPPER).min(aquifer_thickness),
    };
    Ok((screen_length, band))
}

// ============================================================================
// Open hole
// ============================================================================

/// Minimum open hole diameter (m) before snapping to a drill size
///
/// Formula: OHD = Q / (v × π × φ × NGR × SL)
///
/// Where:
/// - Q = required flow rate (m³/s)
/// - v = maximum sand face velocity (m/s)
/// - φ = average reservoir porosity
/// - NGR = net-to-gross ratio
/// - SL = screen length (m)
pub fn minimum_open_hole_diameter(
    flow_rate_m3_sec: f64,
    screen_length: f64,
    sand_face_velocity: f64,
    reservoir_porosity: f64,
    net_to_gross_ratio: f64,
) -> Result<f64, CalculationError> {
    finite(
        "open hole diameter",
        flow_rate_m3_sec
            / (sand_face_velocity * PI * reservoir_porosity * net_to_gross_ratio * screen_length),
    )
}

// ============================================================================
// Friction
// ============================================================================

/// Up-hole friction loss (m) through production casing (Hazen-Williams, SI)
///
/// Formula: hf = 10.67 × L × Q^1.852 / (C^1.852 × D^4.8704)
///
/// Where:
/// - L = depth to top of screen (m)
/// - Q = flow rate (m³/s)
/// - C = pipe roughness coefficient
/// - D = casing diameter (m)
pub fn casing_friction(
    depth_to_top_screen: f64,
    flow_rate_m3_sec: f64,
    casing_diameter: f64,
    roughness_coeff: f64,
) -> f64 {
    HAZEN_WILLIAMS_COEFF * depth_to_top_screen * flow_rate_m3_sec.powf(HAZEN_WILLIAMS_FLOW_EXPONENT)
        / (roughness_coeff.powf(HAZEN_WILLIAMS_FLOW_EXPONENT)
            * casing_diameter.powf(HAZEN_WILLIAMS_DIAMETER_EXPONENT))
}

/// Ideal screen diameter (m) that keeps casing + screen friction under 20 m
///
/// Formula: d = (10.67 × SL × Q^1.852 / (2 × C^1.852 × (20 − hf)))^(1/4.8704)
///
/// The screen carries on average half the flow along its length, hence the
/// factor 2. Returns `None` when the casing friction alone exceeds the limit.
pub fn minimum_screen_diameter(
    up_hole_friction: f64,
    screen_length: f64,
    flow_rate_m3_sec: f64,
    roughness_coeff: f64,
) -> Option<f64> {
    if !up_hole_friction.is_finite() || up_hole_friction > MAX_UP_HOLE_FRICTION_M {
        return None;
    }
    let d = (HAZEN_WILLIAMS_COEFF * screen_length * flow_rate_m3_sec.powf(HAZEN_WILLIAMS_FLOW_EXPONENT)
        / (2.0
            * roughness_coeff.powf(HAZEN_WILLIAMS_FLOW_EXPONENT)
            * (MAX_UP_HOLE_FRICTION_M - up_hole_friction)))
        .powf(1.0 / HAZEN_WILLIAMS_DIAMETER_EXPONENT);
    d.is_finite().then_some(d)
}

/// Surface proxy for casing material (m²) used to rank production candidates
///
/// Formula: total = L_ic × π × D + SL × π × s
///
/// `None` when the screen is absent or not strictly narrower than the casing.
pub fn total_casing(
    production_casing_diameter: f64,
    screen_diameter: Option<f64>,
    intermediate_casing_length: f64,
    screen_length: f64,
) -> Option<f64> {
    let screen_diameter = screen_diameter?;
    if production_casing_diameter <= screen_diameter {
        return None;
    }
    Some(
        intermediate_casing_length * PI * production_casing_diameter
            + screen_length * PI * screen_diameter,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const Q_DAY: f64 = 4320.0;
    const Q_SEC: f64 = 0.05;

    #[test]
    fn test_production_screen_length() {
        let (sl, band) = minimum_screen_length(Q_DAY, 5.0, 10_950.0, 221.0, true).unwrap();
        assert!((sl - 69.742_095_174_951_2).abs() < 1e-9);
        assert!((band.lower - 62.767_885_657_456_08).abs() < 1e-9);
        assert!((band.upper - 76.716_304_692_446_33).abs() < 1e-9);
    }

    #[test]
    fn test_injection_screen_length_doubles() {
        let (sl, _) = minimum_screen_length(Q_DAY, 5.0, 10_950.0, 221.0, false).unwrap();
        assert!((sl - 139.484_190_349_902_4).abs() < 1e-9);
    }

    #[test]
    fn test_screen_length_capped_at_thickness() {
        let (sl, band) = minimum_screen_length(Q_DAY, 5.0, 10_950.0, 108.0, false).unwrap();
        assert_eq!(sl, 108.0);
        assert!((band.lower - 97.2).abs() < 1e-9);
        assert_eq!(band.upper, 108.0);
    }

    #[test]
    fn test_negative_thickness_rejected() {
        assert_eq!(
            minimum_screen_length(Q_DAY, 5.0, 10_950.0, -1.0, true),
            Err(CalculationError::NegativeAquiferThickness(-1.0))
        );
    }

    #[test]
    fn test_zero_conductivity_is_non_finite() {
        assert!(matches!(
            minimum_screen_length(Q_DAY, 0.0, 10_950.0, 221.0, true),
            Err(CalculationError::NonFinite { .. })
        ));
    }

    #[test]
    fn test_open_hole_diameter() {
        let ohd = minimum_open_hole_diameter(Q_SEC, 69.742_095_174_951_2, 0.01, 0.25, 1.0).unwrap();
        assert!((ohd - 0.091_28).abs() < 1e-4);
    }

    #[test]
    fn test_friction_falls_with_diameter() {
        let narrow = casing_friction(550.0, Q_SEC, 0.1016, 100.0);
        let wide = casing_friction(550.0, Q_SEC, 0.219_075, 100.0);
        assert!((narrow - 310.344_777_721_172_14).abs() < 1e-6);
        assert!(wide < 20.0);
        assert!(narrow > wide);
    }

    #[test]
    fn test_screen_diameter_infeasible_above_limit() {
        assert_eq!(minimum_screen_diameter(20.5, 69.7, Q_SEC, 100.0), None);
    }

    #[test]
    fn test_screen_diameter_feasible() {
        let hf = casing_friction(550.0, Q_SEC, 0.219_075, 100.0);
        let d = minimum_screen_diameter(hf, 69.742_095_174_951_2, Q_SEC, 100.0).unwrap();
        assert!((d - 0.111_255_855_522_634_78).abs() < 1e-9);
    }

    #[test]
    fn test_total_casing_requires_narrower_screen() {
        assert_eq!(total_casing(0.1143, Some(0.1143), 540.0, 69.7), None);
        assert_eq!(total_casing(0.1143, None, 540.0, 69.7), None);
        let total = total_casing(0.219_075, Some(0.1143), 540.0, 69.742_095_174_951_2).unwrap();
        assert!((total - 396.695_255_030_778_47).abs() < 1e-6);
    }
}
