//! Design Pipeline Module
//!
//! ```text
//! STAGE 1: Screen sizing   -> ScreenOutputs
//! STAGE 2: Pump sizing     -> PumpOutputs
//! STAGE 3: Casing staging  -> CasingSchedule (reads stages 1 and 2)
//! ```
//!
//! Stages are plain functions over a borrowed `DesignBasis`; the coordinator
//! sequences them and commits their drafts to the store.

pub mod casing_stage;
mod coordinator;
pub mod pump_stage;
pub mod screen_stage;

pub use coordinator::{run_design, DesignPipeline, PipelineStats};
