//! geodrill: groundwater bore design
//!
//! Sizes the physical construction of a water bore from hydrogeological and
//! flow inputs.
//!
//! ## Architecture
//!
//! - **Store**: validated inputs, derived constants, committed outputs
//! - **Design Engine**: pure sizing formulas and nominal-size snapping
//! - **Pipeline**: screen → pump → casing stages, all-or-nothing commit
//! - **Config**: TOML design files
//! - **Report**: JSON export of a completed design

pub mod config;
pub mod design_engine;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod store;
pub mod types;

pub use config::DesignConfig;
pub use error::{
    CalculationError, DesignError, ExportError, LookupError, NominalSizeError, PipelineError,
    PipelineStage, StageError, ValidationError,
};
pub use pipeline::{run_design, DesignPipeline};
pub use report::DesignReport;
pub use store::{DesignBasis, WellBoreParameterStore};
pub use types::{
    AquiferLayer, AquiferLayerTable, CasingCatalog, CasingSchedule, CasingSection, CasingStage,
    DesignConstants, DrillingCatalog, InputParameters,
};
