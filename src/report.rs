//! Design report - serializable snapshot of a completed design run

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

use crate::error::ExportError;
use crate::store::WellBoreParameterStore;
use crate::types::{CasingSection, CasingStage, PumpOutputs, ScreenCandidate, ScreenOutputs};

/// Geometry the stages were computed against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DesignBasisSummary {
    pub depth_to_top_screen: f64,
    pub aquifer_thickness: f64,
    pub depth_to_aquifer_base: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignReport {
    pub well_name: String,
    pub is_production_well: bool,
    pub generated_at: DateTime<Utc>,
    pub basis: DesignBasisSummary,
    pub screen: ScreenOutputs,
    pub pump: PumpOutputs,
    /// All six rows in stage order; absent stages carry nulls
    pub casing_schedule: Vec<CasingSection>,
    /// Installed length per stage, absent stages 0
    pub section_lengths: Vec<(CasingStage, f64)>,
    pub total_depth: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub langelier_saturation_index: Option<f64>,
}

impl DesignReport {
    /// Snapshot a store. Only allowed once the run has completed.
    pub fn from_store(
        store: &WellBoreParameterStore,
        well_name: impl Into<String>,
    ) -> Result<Self, ExportError> {
        if !store.calculation_completed() {
            return Err(ExportError::CalculationIncomplete);
        }
        let (Some(derived), Some(screen), Some(pump), Some(schedule)) = (
            store.derived(),
            store.screen(),
            store.pump(),
            store.casing_schedule(),
        ) else {
            return Err(ExportError::CalculationIncomplete);
        };

        Ok(Self {
            well_name: well_name.into(),
            is_production_well: store.is_production_well(),
            generated_at: Utc::now(),
            basis: DesignBasisSummary {
                depth_to_top_screen: derived.depth_to_top_screen,
                aquifer_thickness: derived.aquifer_thickness,
                depth_to_aquifer_base: derived.depth_to_aquifer_base,
            },
            screen: screen.clone(),
            pump: *pump,
            casing_schedule: schedule.sections().to_vec(),
            section_lengths: schedule.section_lengths(),
            total_depth: schedule.total_depth(),
            langelier_saturation_index: None,
        })
    }

    pub fn with_langelier_saturation_index(mut self, lsi: f64) -> Self {
        self.langelier_saturation_index = Some(lsi);
        self
    }

    /// Production candidate table; empty for injection wells.
    pub fn screen_candidates(&self) -> &[ScreenCandidate] {
        &self.screen.screen_candidate_table
    }

    pub fn to_json_string(&self, pretty: bool) -> Result<String, ExportError> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }

    pub fn write_json(&self, path: &Path, pretty: bool) -> Result<(), ExportError> {
        let json = self.to_json_string(pretty)?;
        std::fs::write(path, json).map_err(|e| ExportError::Io(path.to_path_buf(), e))?;
        info!(path = %path.display(), "Design report written");
        Ok(())
    }
}
