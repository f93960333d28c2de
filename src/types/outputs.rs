//! Screen and pump stage outputs

use serde::{Deserialize, Serialize};

/// Uncertainty band around the nominal screen length (m).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenLengthBand {
    pub lower: f64,
    pub upper: f64,
}

impl ScreenLengthBand {
    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value <= self.upper
    }
}

/// One row of the production screen candidate table, per casing-catalog diameter.
///
/// `None` marks an infeasible value: friction above the limit, no nominal
/// size above the ideal diameter, or a screen not narrower than the casing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenCandidate {
    /// Production casing diameter under evaluation (m)
    pub candidate_diameter: f64,
    /// Up-hole friction loss through the casing (m)
    pub friction_loss: f64,
    /// Ideal screen diameter keeping total friction under the limit (m)
    pub min_screen_diameter_for_friction: Option<f64>,
    /// Ideal diameter snapped to the next nominal casing size (m)
    pub selected_screen_diameter: Option<f64>,
    /// Outer casing + screen surface proxy used to rank candidates
    pub total_casing_metric: Option<f64>,
}

/// Everything the screen sizing stage writes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenOutputs {
    pub screen_length: f64,
    pub screen_length_error: ScreenLengthBand,
    pub open_hole_diameter: f64,
    pub screen_diameter: f64,
    /// Production wells only
    pub min_total_casing_production_screen_diameter: Option<f64>,
    /// Production wells only; empty for injection wells
    pub screen_candidate_table: Vec<ScreenCandidate>,
}

/// Everything the pump sizing stage writes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PumpOutputs {
    pub pump_inlet_depth: f64,
    /// Nominal pump diameter class (m)
    pub pump_diameter: f64,
    pub minimum_pump_housing_diameter: f64,
}
