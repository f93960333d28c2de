//! Typed tables and records for the bore design pipeline

pub mod aquifer;
pub mod catalog;
pub mod inputs;
pub mod outputs;
pub mod schedule;

pub use aquifer::{AquiferLayer, AquiferLayerTable};
pub use catalog::{CasingCatalog, CasingSize, DrillingCatalog, DrillingSize};
pub use inputs::{DerivedConstants, DesignConstants, InputParameters, ValidatedInputs};
pub use outputs::{PumpOutputs, ScreenCandidate, ScreenLengthBand, ScreenOutputs};
pub use schedule::{CasingSchedule, CasingSection, CasingStage};
