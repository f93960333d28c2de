//! Pump sizing stage

use tracing::info;

use crate::design_engine::{minimum_pump_housing_diameter, pump_diameter, pump_inlet_depth};
use crate::error::StageError;
use crate::store::DesignBasis;
use crate::types::PumpOutputs;

pub fn run(basis: &DesignBasis<'_>) -> Result<PumpOutputs, StageError> {
    let inputs = basis.inputs;

    let inlet = pump_inlet_depth(
        inputs.groundwater_depth,
        inputs.allowable_drawdown,
        inputs.safety_margin,
        inputs.long_term_decline_rate,
        inputs.bore_lifetime_year,
    );
    let pump = pump_diameter(basis.derived.flow_rate_per_litre_sec)?;
    let housing = minimum_pump_housing_diameter(basis.derived.flow_rate_per_m3_sec, pump);

    info!(
        pump_inlet_depth = inlet,
        pump_diameter = pump,
        minimum_pump_housing_diameter = housing,
        "Pump sized"
    );
    Ok(PumpOutputs {
        pump_inlet_depth: inlet,
        pump_diameter: pump,
        minimum_pump_housing_diameter: housing,
    })
}
