//! Design Pipeline - three-stage bore design sequence
//!
//! ```text
//! STAGE 1: Screen sizing  (screen length, open hole, screen diameter)
//! STAGE 2: Pump sizing    (inlet depth, pump class, housing diameter)
//! STAGE 3: Casing staging (six-section schedule + drill bits)
//! ```
//!
//! Each stage returns an owned draft. Drafts are committed to the store
//! together only after stage 3 succeeds, so a failed run leaves the store
//! with no outputs and `calculation_completed == false`.

use std::time::Instant;

use tracing::{error, info};

use super::{casing_stage, pump_stage, screen_stage};
use crate::error::{PipelineError, PipelineStage, StageError};
use crate::store::WellBoreParameterStore;

/// Counters for runs made through one pipeline instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineStats {
    pub runs_started: u64,
    pub runs_completed: u64,
    pub runs_failed: u64,
}

#[derive(Debug, Default)]
pub struct DesignPipeline {
    stats: PipelineStats,
}

fn at(stage: PipelineStage) -> impl FnOnce(StageError) -> PipelineError {
    move |source| PipelineError::new(stage, source)
}

impl DesignPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> PipelineStats {
        self.stats
    }

    /// Run all three stages against `store`.
    pub fn run(&mut self, store: &mut WellBoreParameterStore) -> Result<(), PipelineError> {
        self.stats.runs_started += 1;
        store.reset_outputs();

        match Self::run_stages(store) {
            Ok(()) => {
                self.stats.runs_completed += 1;
                Ok(())
            }
            Err(e) => {
                self.stats.runs_failed += 1;
                error!(stage = %e.stage, error = %e.source, "Design run failed");
                Err(e)
            }
        }
    }

    fn run_stages(store: &mut WellBoreParameterStore) -> Result<(), PipelineError> {
        let started = Instant::now();
        let basis = store.basis().map_err(at(PipelineStage::Screen))?;

        let screen = screen_stage::run(&basis).map_err(at(PipelineStage::Screen))?;
        let pump = pump_stage::run(&basis).map_err(at(PipelineStage::Pump))?;
        let schedule =
            casing_stage::run(&basis, &screen, &pump).map_err(at(PipelineStage::Casing))?;

        info!(
            production = basis.is_production_well,
            screen_length = screen.screen_length,
            screen_diameter = screen.screen_diameter,
            pump_inlet_depth = pump.pump_inlet_depth,
            total_depth = schedule.total_depth(),
            elapsed_us = started.elapsed().as_micros() as u64,
            "Design run completed"
        );

        store.commit(screen, pump, schedule);
        Ok(())
    }
}

/// Run a design with a throwaway pipeline.
pub fn run_design(store: &mut WellBoreParameterStore) -> Result<(), PipelineError> {
    DesignPipeline::new().run(store)
}
