//! Well bore parameter store
//!
//! One store per design run. It owns the catalogs, the stratigraphy, the
//! validated inputs with their derived constants, and (after a successful
//! run) the committed stage outputs. Stages never write to the store
//! directly: they read a `DesignBasis` view and return owned drafts that the
//! pipeline commits together.

use tracing::{debug, info};

use crate::error::{StageError, ValidationError};
use crate::types::{
    AquiferLayerTable, CasingCatalog, CasingSchedule, DerivedConstants, DesignConstants,
    DrillingCatalog, InputParameters, PumpOutputs, ScreenOutputs, ValidatedInputs,
};

/// Read-only view of everything a stage needs.
#[derive(Debug, Clone, Copy)]
pub struct DesignBasis<'a> {
    pub is_production_well: bool,
    pub inputs: &'a ValidatedInputs,
    pub derived: DerivedConstants,
    pub constants: &'a DesignConstants,
    pub casing_catalog: &'a CasingCatalog,
    pub drilling_catalog: &'a DrillingCatalog,
}

#[derive(Debug, Clone)]
pub struct WellBoreParameterStore {
    is_production_well: bool,
    constants: DesignConstants,
    casing_catalog: CasingCatalog,
    drilling_catalog: DrillingCatalog,
    aquifer_layers: AquiferLayerTable,

    inputs: Option<ValidatedInputs>,
    derived: Option<DerivedConstants>,

    screen: Option<ScreenOutputs>,
    pump: Option<PumpOutputs>,
    casing_schedule: Option<CasingSchedule>,

    ready_for_calculation: bool,
    calculation_completed: bool,
}

impl WellBoreParameterStore {
    /// Empty store with default constants and built-in catalogs.
    pub fn new(is_production_well: bool) -> Self {
        Self {
            is_production_well,
            constants: DesignConstants::default(),
            casing_catalog: CasingCatalog::default(),
            drilling_catalog: DrillingCatalog::default(),
            aquifer_layers: AquiferLayerTable::default(),
            inputs: None,
            derived: None,
            screen: None,
            pump: None,
            casing_schedule: None,
            ready_for_calculation: false,
            calculation_completed: false,
        }
    }

    pub fn with_constants(mut self, constants: DesignConstants) -> Self {
        self.constants = constants;
        self
    }

    pub fn with_casing_catalog(mut self, catalog: CasingCatalog) -> Self {
        self.casing_catalog = catalog;
        self
    }

    pub fn with_drilling_catalog(mut self, catalog: DrillingCatalog) -> Self {
        self.drilling_catalog = catalog;
        self
    }

    /// Validate inputs against the stratigraphy and compute derived constants.
    ///
    /// On success the store is ready for calculation. A store can only be
    /// initialised once.
    pub fn initialise_and_validate_input_params(
        &mut self,
        params: &InputParameters,
        aquifer_layers: AquiferLayerTable,
    ) -> Result<(), ValidationError> {
        if self.ready_for_calculation {
            return Err(ValidationError::AlreadyInitialised);
        }

        self.casing_catalog.validate()?;
        self.drilling_catalog.validate()?;
        aquifer_layers.validate()?;
        let inputs = params.validate()?;

        // Target layer: its base is the top of screen, the next layer's base
        // bounds the aquifer.
        let target = aquifer_layers.get(&inputs.target_aquifer_layer).ok_or_else(|| {
            ValidationError::LayerNotFound {
                context: "Target aquifer",
                code: inputs.target_aquifer_layer.clone(),
            }
        })?;
        let below = aquifer_layers
            .below(&inputs.target_aquifer_layer)
            .ok_or_else(|| ValidationError::TargetIsBottommost(inputs.target_aquifer_layer.clone()))?;
        let depth_to_top_screen = target.depth_to_base;
        let aquifer_thickness = below.depth_to_base - depth_to_top_screen;

        let top = aquifer_layers.get(&inputs.top_aquifer_layer).ok_or_else(|| {
            ValidationError::LayerNotFound {
                context: "Top aquifer layer",
                code: inputs.top_aquifer_layer.clone(),
            }
        })?;
        if !self.constants.top_aquifer_whitelist.contains(&inputs.top_aquifer_layer) {
            return Err(ValidationError::TopLayerNotAllowed {
                code: inputs.top_aquifer_layer.clone(),
                allowed: self.constants.top_aquifer_whitelist.clone(),
            });
        }
        let depth_to_aquifer_base = top.depth_to_base;

        let derived = DerivedConstants {
            flow_rate_per_litre_sec: DerivedConstants::flow_rate_per_litre_sec(inputs.required_flow_rate),
            flow_rate_per_m3_sec: DerivedConstants::flow_rate_per_m3_sec(inputs.required_flow_rate),
            bore_lifetime_per_day: DerivedConstants::bore_lifetime_per_day(inputs.bore_lifetime_year),
            depth_to_top_screen,
            aquifer_thickness,
            depth_to_aquifer_base,
        };

        debug!(
            target_layer = %inputs.target_aquifer_layer,
            below_layer = %below.layer_code,
            "Resolved target aquifer"
        );
        info!(
            production = self.is_production_well,
            depth_to_top_screen,
            aquifer_thickness,
            depth_to_aquifer_base,
            "Parameter store initialised"
        );

        self.aquifer_layers = aquifer_layers;
        self.inputs = Some(inputs);
        self.derived = Some(derived);
        self.ready_for_calculation = true;
        Ok(())
    }

    /// Borrowed view for the stages; `NotReady` before initialisation.
    pub fn basis(&self) -> Result<DesignBasis<'_>, StageError> {
        match (&self.inputs, self.derived) {
            (Some(inputs), Some(derived)) if self.ready_for_calculation => Ok(DesignBasis {
                is_production_well: self.is_production_well,
                inputs,
                derived,
                constants: &self.constants,
                casing_catalog: &self.casing_catalog,
                drilling_catalog: &self.drilling_catalog,
            }),
            _ => Err(StageError::NotReady),
        }
    }

    /// Drop outputs of any previous run.
    pub(crate) fn reset_outputs(&mut self) {
        self.screen = None;
        self.pump = None;
        self.casing_schedule = None;
        self.calculation_completed = false;
    }

    /// Store the outputs of a fully successful run.
    pub(crate) fn commit(&mut self, screen: ScreenOutputs, pump: PumpOutputs, schedule: CasingSchedule) {
        self.screen = Some(screen);
        self.pump = Some(pump);
        self.casing_schedule = Some(schedule);
        self.calculation_completed = true;
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    pub fn is_production_well(&self) -> bool {
        self.is_production_well
    }

    pub fn ready_for_calculation(&self) -> bool {
        self.ready_for_calculation
    }

    pub fn calculation_completed(&self) -> bool {
        self.calculation_completed
    }

    pub fn constants(&self) -> &DesignConstants {
        &self.constants
    }

    pub fn casing_catalog(&self) -> &CasingCatalog {
        &self.casing_catalog
    }

    pub fn drilling_catalog(&self) -> &DrillingCatalog {
        &self.drilling_catalog
    }

    pub fn aquifer_layers(&self) -> &AquiferLayerTable {
        &self.aquifer_layers
    }

    pub fn inputs(&self) -> Option<&ValidatedInputs> {
        self.inputs.as_ref()
    }

    pub fn derived(&self) -> Option<&DerivedConstants> {
        self.derived.as_ref()
    }

    pub fn screen(&self) -> Option<&ScreenOutputs> {
        self.screen.as_ref()
    }

    pub fn pump(&self) -> Option<&PumpOutputs> {
        self.pump.as_ref()
    }

    pub fn casing_schedule(&self) -> Option<&CasingSchedule> {
        self.casing_schedule.as_ref()
    }
}
