//! Casing staging stage
//!
//! Lays out the six casing sections from surface down. Optional sections
//! (superficial casing, pump chamber) are decided first from the inputs,
//! the superficial casing diameter last since it must pass whichever casing
//! sits inside it. A final pass assigns drill bits from the casing catalog.

use tracing::{debug, info};

use crate::design_engine::casing_models::{
    intermediate_casing_depths, intermediate_casing_diameter, is_separate_pump_chamber_required,
    is_superficial_casing_required, pre_collar_casing_diameter, pre_collar_depths,
    pump_chamber_depths, pump_chamber_diameter, screen_depths, screen_riser_depths,
    superficial_casing_depths, superficial_casing_diameter,
};
use crate::error::StageError;
use crate::store::DesignBasis;
use crate::types::{CasingSchedule, CasingStage, PumpOutputs, ScreenOutputs};

pub fn run(
    basis: &DesignBasis<'_>,
    screen: &ScreenOutputs,
    pump: &PumpOutputs,
) -> Result<CasingSchedule, StageError> {
    let derived = basis.derived;
    let casing_sizes = basis.casing_catalog.metres();
    let mut schedule = CasingSchedule::new();

    // Pre-collar
    let (top, bottom) = pre_collar_depths(derived.depth_to_aquifer_base);
    schedule.set(CasingStage::PreCollar, top, bottom, pre_collar_casing_diameter());

    // Pump chamber
    let pump_chamber = is_separate_pump_chamber_required(
        basis.is_production_well,
        screen.screen_diameter,
        pump.minimum_pump_housing_diameter,
    );
    debug!(required = pump_chamber, "Pump chamber decision");
    let pump_chamber_bottom = if pump_chamber {
        let (top, bottom) = pump_chamber_depths(pump.pump_inlet_depth);
        let diameter = pump_chamber_diameter(pump.minimum_pump_housing_diameter, &casing_sizes)?;
        schedule.set(CasingStage::PumpChamberCasing, top, bottom, diameter);
        Some(bottom)
    } else {
        None
    };

    // Intermediate casing
    let (top, bottom) = intermediate_casing_depths(derived.depth_to_top_screen, pump_chamber_bottom);
    let intermediate_diameter = intermediate_casing_diameter(
        screen.screen_diameter,
        &casing_sizes,
        screen.min_total_casing_production_screen_diameter,
    )?;
    schedule.set(CasingStage::IntermediateCasing, top, bottom, intermediate_diameter);

    // Superficial casing
    let superficial = is_superficial_casing_required(derived.depth_to_aquifer_base);
    debug!(required = superficial, "Superficial casing decision");
    if superficial {
        let inner = schedule
            .get(CasingStage::PumpChamberCasing)
            .casing_diameter
            .unwrap_or(intermediate_diameter);
        let (top, bottom) = superficial_casing_depths(derived.depth_to_aquifer_base);
        let diameter = superficial_casing_diameter(inner, &casing_sizes)?;
        schedule.set(CasingStage::SuperficialCasing, top, bottom, diameter);
    }

    // Screen riser and screen
    let (top, bottom) = screen_riser_depths(derived.depth_to_top_screen);
    schedule.set(CasingStage::ScreenRiser, top, bottom, screen.screen_diameter);

    let (top, bottom) = screen_depths(
        derived.depth_to_top_screen,
        screen.screen_length,
        derived.aquifer_thickness,
    )?;
    schedule.set(CasingStage::Screen, top, bottom, screen.screen_diameter);

    schedule.check_ordering()?;

    // Drill bits
    for stage in CasingStage::ALL {
        if let Some(casing_diameter) = schedule.get(stage).casing_diameter {
            let bit = basis.casing_catalog.recommended_bit(casing_diameter)?;
            schedule.set_drill_bit(stage, bit);
        }
    }

    info!(
        sections = schedule.populated().count(),
        total_depth = schedule.total_depth(),
        "Casing schedule staged"
    );
    Ok(schedule)
}
