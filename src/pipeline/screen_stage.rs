//! Screen sizing stage
//!
//! Screen length and open hole first, then the screen diameter: for
//! production bores by ranking every casing-catalog diameter on friction
//! feasibility and total casing, for injection bores by exact lookup of the
//! drilling catalog's recommended screen.

use tracing::{debug, info};

use crate::config::defaults::INTERMEDIATE_CASING_OFFSET_M;
use crate::design_engine::{
    casing_friction, minimum_open_hole_diameter, minimum_screen_diameter, minimum_screen_length,
    next_largest, total_casing,
};
use crate::error::{CalculationError, StageError};
use crate::store::DesignBasis;
use crate::types::{ScreenCandidate, ScreenOutputs};

/// Build the candidate table, one row per casing-catalog diameter.
pub fn candidate_table(
    basis: &DesignBasis<'_>,
    screen_length: f64,
) -> Vec<ScreenCandidate> {
    let casing_sizes = basis.casing_catalog.metres();
    let q = basis.derived.flow_rate_per_m3_sec;
    let c = basis.constants.pipe_roughness_coeff;
    let depth_to_top_screen = basis.derived.depth_to_top_screen;
    let intermediate_length = depth_to_top_screen - INTERMEDIATE_CASING_OFFSET_M;

    casing_sizes
        .iter()
        .map(|&candidate_diameter| {
            let friction_loss = casing_friction(depth_to_top_screen, q, candidate_diameter, c);
            let min_screen = minimum_screen_diameter(friction_loss, screen_length, q, c);
            // No nominal size above the ideal diameter is treated as infeasible
            let selected = min_screen.and_then(|d| next_largest(d, &casing_sizes).ok());
            let total = total_casing(candidate_diameter, selected, intermediate_length, screen_length);
            ScreenCandidate {
                candidate_diameter,
                friction_loss,
                min_screen_diameter_for_friction: min_screen,
                selected_screen_diameter: selected,
                total_casing_metric: total,
            }
        })
        .collect()
}

/// Selected screen diameter of the row with the smallest defined total casing.
///
/// Ties keep the first (narrowest) candidate.
pub fn min_total_casing_screen_diameter(table: &[ScreenCandidate]) -> Option<f64> {
    table
        .iter()
        .filter_map(|row| Some((row.total_casing_metric?, row.selected_screen_diameter?)))
        .fold(None, |best: Option<(f64, f64)>, (total, diameter)| match best {
            Some((best_total, _)) if best_total <= total => best,
            _ => Some((total, diameter)),
        })
        .map(|(_, diameter)| diameter)
}

pub fn run(basis: &DesignBasis<'_>) -> Result<ScreenOutputs, StageError> {
    let inputs = basis.inputs;
    let derived = basis.derived;

    let (screen_length, screen_length_error) = minimum_screen_length(
        inputs.required_flow_rate,
        inputs.hydraulic_conductivity,
        derived.bore_lifetime_per_day,
        derived.aquifer_thickness,
        basis.is_production_well,
    )?;

    let min_open_hole = minimum_open_hole_diameter(
        derived.flow_rate_per_m3_sec,
        screen_length,
        basis.constants.sand_face_velocity(basis.is_production_well),
        basis.constants.aquifer_average_porosity,
        basis.constants.net_to_gross_ratio_aquifer,
    )?;
    let open_hole_diameter = next_largest(min_open_hole, &basis.drilling_catalog.metres())?;
    debug!(min_open_hole, open_hole_diameter, "Open hole diameter selected");

    let outputs = if basis.is_production_well {
        let table = candidate_table(basis, screen_length);
        let feasible = table.iter().filter(|r| r.total_casing_metric.is_some()).count();
        debug!(candidates = table.len(), feasible, "Screen candidate table built");

        let min_total = min_total_casing_screen_diameter(&table)
            .ok_or(CalculationError::NoFeasibleScreenDiameter)?;
        let smallest = basis
            .casing_catalog
            .smallest()
            .ok_or(CalculationError::NoFeasibleScreenDiameter)?;

        ScreenOutputs {
            screen_length,
            screen_length_error,
            open_hole_diameter,
            screen_diameter: min_total.max(smallest),
            min_total_casing_production_screen_diameter: Some(min_total),
            screen_candidate_table: table,
        }
    } else {
        ScreenOutputs {
            screen_length,
            screen_length_error,
            open_hole_diameter,
            screen_diameter: basis.drilling_catalog.recommended_screen(open_hole_diameter)?,
            min_total_casing_production_screen_diameter: None,
            screen_candidate_table: Vec::new(),
        }
    };

    info!(
        screen_length = outputs.screen_length,
        screen_diameter = outputs.screen_diameter,
        open_hole_diameter = outputs.open_hole_diameter,
        "Screen sized"
    );
    Ok(outputs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(total: Option<f64>, selected: Option<f64>) -> ScreenCandidate {
        ScreenCandidate {
            candidate_diameter: 0.2,
            friction_loss: 1.0,
            min_screen_diameter_for_friction: selected,
            selected_screen_diameter: selected,
            total_casing_metric: total,
        }
    }

    #[test]
    fn test_min_total_skips_undefined_rows() {
        let table = [
            row(None, None),
            row(Some(785.4), Some(0.1143)),
            row(Some(711.97), Some(0.1397)),
            row(None, Some(0.1016)),
        ];
        assert_eq!(min_total_casing_screen_diameter(&table), Some(0.1397));
    }

    #[test]
    fn test_min_total_tie_keeps_first() {
        let table = [row(Some(5.0), Some(0.1143)), row(Some(5.0), Some(0.127))];
        assert_eq!(min_total_casing_screen_diameter(&table), Some(0.1143));
    }

    #[test]
    fn test_min_total_all_infeasible() {
        let table = [row(None, None), row(None, Some(0.1))];
        assert_eq!(min_total_casing_screen_diameter(&table), None);
    }
}
