//! Design inputs, overridable constants, and constants derived at initialisation

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

// ============================================================================
// Input Parameters (as supplied)
// ============================================================================

/// Flat set of named scalar inputs, exactly as supplied by the caller.
///
/// Every field is optional here so that a missing value is reported as a
/// `ValidationError` naming the field, rather than a deserialization failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputParameters {
    /// Required flow rate (m³/day)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_flow_rate: Option<f64>,
    /// Aquifer hydraulic conductivity (m/day)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hydraulic_conductivity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_porosity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bore_lifetime_year: Option<f64>,
    /// Present water depth below ground (m)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub groundwater_depth: Option<f64>,
    /// Long-term water level decline (m/year)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long_term_decline_rate: Option<f64>,
    /// Allowable drawdown (m)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowable_drawdown: Option<f64>,
    /// Safety margin below the drawn-down level (m)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub safety_margin: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_aquifer_layer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_aquifer_layer: Option<String>,
}

fn required(name: &'static str, value: Option<f64>) -> Result<f64, ValidationError> {
    let value = value.ok_or(ValidationError::MissingParameter(name))?;
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteParameter { name, value });
    }
    Ok(value)
}

impl InputParameters {
    /// Check that every scalar is present and finite.
    pub fn validate(&self) -> Result<ValidatedInputs, ValidationError> {
        Ok(ValidatedInputs {
            required_flow_rate: required("required_flow_rate", self.required_flow_rate)?,
            hydraulic_conductivity: required("hydraulic_conductivity", self.hydraulic_conductivity)?,
            average_porosity: required("average_porosity", self.average_porosity)?,
            bore_lifetime_year: required("bore_lifetime_year", self.bore_lifetime_year)?,
            groundwater_depth: required("groundwater_depth", self.groundwater_depth)?,
            long_term_decline_rate: required("long_term_decline_rate", self.long_term_decline_rate)?,
            allowable_drawdown: required("allowable_drawdown", self.allowable_drawdown)?,
            safety_margin: required("safety_margin", self.safety_margin)?,
            target_aquifer_layer: self
                .target_aquifer_layer
                .clone()
                .ok_or(ValidationError::MissingParameter("target_aquifer_layer"))?,
            top_aquifer_layer: self
                .top_aquifer_layer
                .clone()
                .ok_or(ValidationError::MissingParameter("top_aquifer_layer"))?,
        })
    }
}

/// Scalar inputs after presence and finiteness checks. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidatedInputs {
    pub required_flow_rate: f64,
    pub hydraulic_conductivity: f64,
    pub average_porosity: f64,
    pub bore_lifetime_year: f64,
    pub groundwater_depth: f64,
    pub long_term_decline_rate: f64,
    pub allowable_drawdown: f64,
    pub safety_margin: f64,
    pub target_aquifer_layer: String,
    pub top_aquifer_layer: String,
}

// ============================================================================
// Design Constants
// ============================================================================

/// Constants with defaults that a design file may override.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignConstants {
    /// Maximum sand face velocity for production bores (m/s)
    #[serde(default = "default_sand_face_velocity_production")]
    pub sand_face_velocity_production: f64,

    /// Maximum sand face velocity for injection bores (m/s)
    #[serde(default = "default_sand_face_velocity_injection")]
    pub sand_face_velocity_injection: f64,

    /// Net-to-gross ratio of the aquifer (K is already averaged, so 1)
    #[serde(default = "default_net_to_gross_ratio")]
    pub net_to_gross_ratio_aquifer: f64,

    /// Average reservoir porosity used for open hole sizing
    #[serde(default = "default_aquifer_average_porosity")]
    pub aquifer_average_porosity: f64,

    /// Hazen-Williams roughness coefficient (100 for steel)
    #[serde(default = "default_pipe_roughness_coeff")]
    pub pipe_roughness_coeff: f64,

    /// Layer codes accepted as the shallowest aquifer unit
    #[serde(default = "default_top_aquifer_whitelist")]
    pub top_aquifer_whitelist: Vec<String>,
}

fn default_sand_face_velocity_production() -> f64 { 0.01 }
fn default_sand_face_velocity_injection() -> f64 { 0.003 }
fn default_net_to_gross_ratio() -> f64 { 1.0 }
fn default_aquifer_average_porosity() -> f64 { 0.25 }
fn default_pipe_roughness_coeff() -> f64 { 100.0 }
fn default_top_aquifer_whitelist() -> Vec<String> {
    vec!["100qa".to_string(), "102utqa".to_string()]
}

impl Default for DesignConstants {
    fn default() -> Self {
        Self {
            sand_face_velocity_production: default_sand_face_velocity_production(),
            sand_face_velocity_injection: default_sand_face_velocity_injection(),
            net_to_gross_ratio_aquifer: default_net_to_gross_ratio(),
            aquifer_average_porosity: default_aquifer_average_porosity(),
            pipe_roughness_coeff: default_pipe_roughness_coeff(),
            top_aquifer_whitelist: default_top_aquifer_whitelist(),
        }
    }
}

impl DesignConstants {
    /// Sand face velocity for the given well type.
    pub fn sand_face_velocity(&self, is_production_well: bool) -> f64 {
        if is_production_well {
            self.sand_face_velocity_production
        } else {
            self.sand_face_velocity_injection
        }
    }
}

// ============================================================================
// Derived Constants
// ============================================================================

/// Values computed once when the store is initialised. Read-only afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedConstants {
    pub flow_rate_per_litre_sec: f64,
    pub flow_rate_per_m3_sec: f64,
    pub bore_lifetime_per_day: f64,
    /// Base of the target layer (m)
    pub depth_to_top_screen: f64,
    /// Base of the layer below the target minus the top of screen (m)
    pub aquifer_thickness: f64,
    /// Base of the top aquifer layer (m)
    pub depth_to_aquifer_base: f64,
}

impl DerivedConstants {
    pub fn flow_rate_per_litre_sec(flow_m3_day: f64) -> f64 {
        flow_m3_day / 86.4
    }

    pub fn flow_rate_per_m3_sec(flow_m3_day: f64) -> f64 {
        flow_m3_day / 86_400.0
    }

    pub fn bore_lifetime_per_day(years: f64) -> f64 {
        years * 365.0
    }
}
