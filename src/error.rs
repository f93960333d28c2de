//! Error taxonomy for the bore design pipeline
//!
//! - `ValidationError`: raised while the parameter store is initialised,
//!   before any stage runs.
//! - `CalculationError`: a design formula could not produce a usable value.
//! - `LookupError`: an exact-match catalog lookup missed. Always fatal; it
//!   means the catalog is incomplete.
//! - `NominalSizeError`: no nominal size satisfies a search.
//!
//! Stages return `StageError`; the orchestrator wraps it in `PipelineError`
//! together with the stage that failed.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

// ============================================================================
// Validation
// ============================================================================

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Invalid or missing {0} catalog data")]
    EmptyCatalog(&'static str),

    #[error("{0} catalog must be sorted ascending by metres with unique values")]
    UnsortedCatalog(&'static str),

    #[error("{catalog} catalog contains a non-finite or non-positive value ({value})")]
    InvalidCatalogValue { catalog: &'static str, value: f64 },

    #[error("Invalid or missing aquifer layer data")]
    EmptyLayerTable,

    #[error("Duplicate aquifer layer code '{0}'")]
    DuplicateLayer(String),

    #[error("Aquifer layer '{code}' has depth_to_base {depth} shallower than the layer above ({previous})")]
    DecreasingLayerDepth { code: String, depth: f64, previous: f64 },

    #[error("Invalid or missing initial parameter at {0}")]
    MissingParameter(&'static str),

    #[error("Initial parameter {name} must be finite (got {value})")]
    NonFiniteParameter { name: &'static str, value: f64 },

    #[error("{context}: '{code}' not found in the aquifer layer table")]
    LayerNotFound { context: &'static str, code: String },

    #[error("Target aquifer '{0}' is the bottommost layer, which is not allowed")]
    TargetIsBottommost(String),

    #[error("Top aquifer layer must be one of {allowed:?}, but received '{code}'")]
    TopLayerNotAllowed { code: String, allowed: Vec<String> },

    #[error("Parameter store has already been initialised")]
    AlreadyInitialised,
}

// ============================================================================
// Nominal size search
// ============================================================================

#[derive(Debug, Clone, PartialEq, Error)]
pub enum NominalSizeError {
    #[error("No nominal size satisfies the search for {value}")]
    EmptyCandidateSet { value: f64 },

    #[error("Nominal size candidates must be sorted ascending")]
    UnsortedCandidates,
}

// ============================================================================
// Catalog lookup
// ============================================================================

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LookupError {
    #[error("Drilling catalog has no recommended screen for open hole diameter {open_hole_diameter} m")]
    RecommendedScreenMissing { open_hole_diameter: f64 },

    #[error("Casing catalog has no recommended drill bit for casing diameter {casing_diameter} m")]
    RecommendedBitMissing { casing_diameter: f64 },
}

// ============================================================================
// Calculation
// ============================================================================

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalculationError {
    #[error("Aquifer thickness must not be negative (got {0} m)")]
    NegativeAquiferThickness(f64),

    #[error("Screen length {screen_length} m exceeds aquifer thickness {aquifer_thickness} m")]
    ScreenExceedsAquifer { screen_length: f64, aquifer_thickness: f64 },

    #[error("Invalid flow rate input for pump diameter: {0} L/s")]
    NegativeFlowRate(f64),

    #[error("No casing candidate keeps up-hole friction below the limit")]
    NoFeasibleScreenDiameter,

    #[error("{quantity} evaluated to a non-finite value ({value})")]
    NonFinite { quantity: &'static str, value: f64 },

    #[error("Casing schedule is inconsistent at {stage}: {reason}")]
    InconsistentSchedule { stage: String, reason: String },

    #[error("Water chemistry input {name} = {value} is outside the valid range")]
    WaterChemistryOutOfRange { name: &'static str, value: f64 },
}

// ============================================================================
// Stage / pipeline
// ============================================================================

/// Error returned by a single design stage.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StageError {
    #[error("Parameter store is not ready for calculation")]
    NotReady,

    #[error(transparent)]
    Calculation(#[from] CalculationError),

    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error(transparent)]
    NominalSize(#[from] NominalSizeError),
}

/// The three ordered stages of a design run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    Screen,
    Pump,
    Casing,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Screen => write!(f, "screen sizing"),
            Self::Pump => write!(f, "pump sizing"),
            Self::Casing => write!(f, "casing staging"),
        }
    }
}

/// Normalized orchestrator failure: the cause plus the stage it came from.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Calculation failed during {stage}: {source}")]
pub struct PipelineError {
    pub stage: PipelineStage,
    #[source]
    pub source: StageError,
}

impl PipelineError {
    pub fn new(stage: PipelineStage, source: StageError) -> Self {
        Self { stage, source }
    }

    /// True when the failure is a catalog-completeness violation.
    pub fn is_lookup(&self) -> bool {
        matches!(self.source, StageError::Lookup(_))
    }
}

// ============================================================================
// Export / umbrella
// ============================================================================

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Unfinished parameter calculation pipelines")]
    CalculationIncomplete,

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Export I/O error ({0}): {1}")]
    Io(PathBuf, #[source] std::io::Error),
}

/// Top-level error for library entry points that span config, store and pipeline.
#[derive(Debug, Error)]
pub enum DesignError {
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error(transparent)]
    Export(#[from] ExportError),
}
