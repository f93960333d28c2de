//! Pump sizing models

use std::f64::consts::PI;

use crate::config::defaults::{
    INCHES_TO_METRES, MIN_SAFETY_MARGIN_M, PUMP_DIAMETER_CLASSES, PUMP_DIAMETER_MAX_INCHES,
};
use crate::error::CalculationError;

/// Depth (m) at which the pump inlet must sit to stay submerged over the bore life
///
/// Formula: PID = WD + Sw + M + (dS/dt × t)
///
/// Where:
/// - WD = present groundwater depth (m)
/// - Sw = allowable drawdown (m)
/// - M = safety margin (m)
/// - dS/dt = long-term decline rate (m/year)
/// - t = bore lifetime (years)
pub fn pump_inlet_depth(
    groundwater_depth: f64,
    allowable_drawdown: f64,
    safety_margin: f64,
    long_term_decline_rate: f64,
    bore_lifetime_year: f64,
) -> f64 {
    groundwater_depth + allowable_drawdown + safety_margin + long_term_decline_rate * bore_lifetime_year
}

/// Nominal pump diameter class (m) for a flow rate in L/s
///
/// | Flow (L/s) | Class |
/// |------------|-------|
/// | < 5        | 4"    |
/// | < 10       | 6"    |
/// | < 50       | 8"    |
/// | < 70       | 10"   |
/// | otherwise  | 12"   |
pub fn pump_diameter(flow_rate_litre_sec: f64) -> Result<f64, CalculationError> {
    if flow_rate_litre_sec < 0.0 {
        return Err(CalculationError::NegativeFlowRate(flow_rate_litre_sec));
    }
    let inches = PUMP_DIAMETER_CLASSES
        .iter()
        .find(|(upper, _)| flow_rate_litre_sec < *upper)
        .map_or(PUMP_DIAMETER_MAX_INCHES, |&(_, inches)| inches);
    Ok(inches * INCHES_TO_METRES)
}

/// Minimum pump housing diameter (m)
///
/// Formula: MPHD = √(P² + 4Q / (3.7π)), Q in m³/s, P in m
pub fn minimum_pump_housing_diameter(flow_rate_m3_sec: f64, pump_diameter: f64) -> f64 {
    (pump_diameter.powi(2) + 4.0 * flow_rate_m3_sec / (3.7 * PI)).sqrt()
}

/// Safety margin below the drawn-down level (m): the larger of 10 m or 0.2 × (WD + Sw)
pub fn safety_margin(groundwater_depth: f64, allowable_drawdown: f64) -> f64 {
    MIN_SAFETY_MARGIN_M.max(0.2 * (groundwater_depth + allowable_drawdown))
}
