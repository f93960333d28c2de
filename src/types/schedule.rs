//! Casing schedule - the final layered construction of the bore
//!
//! The schedule always carries one row per `CasingStage`, in drilling order.
//! A stage that is not required keeps `None` in every column.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CalculationError;

/// Casing sections, in the fixed order they appear in a schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CasingStage {
    PreCollar,
    SuperficialCasing,
    PumpChamberCasing,
    IntermediateCasing,
    ScreenRiser,
    Screen,
}

impl CasingStage {
    pub const ALL: [Self; 6] = [
        Self::PreCollar,
        Self::SuperficialCasing,
        Self::PumpChamberCasing,
        Self::IntermediateCasing,
        Self::ScreenRiser,
        Self::Screen,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PreCollar => "pre_collar",
            Self::SuperficialCasing => "superficial_casing",
            Self::PumpChamberCasing => "pump_chamber_casing",
            Self::IntermediateCasing => "intermediate_casing",
            Self::ScreenRiser => "screen_riser",
            Self::Screen => "screen",
        }
    }

    /// Stages that may legitimately be absent from a finished schedule.
    pub fn is_optional(&self) -> bool {
        matches!(self, Self::SuperficialCasing | Self::PumpChamberCasing)
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for CasingStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CasingSection {
    pub stage: CasingStage,
    pub top: Option<f64>,
    pub bottom: Option<f64>,
    pub casing_diameter: Option<f64>,
    pub drill_bit_diameter: Option<f64>,
}

impl CasingSection {
    fn empty(stage: CasingStage) -> Self {
        Self {
            stage,
            top: None,
            bottom: None,
            casing_diameter: None,
            drill_bit_diameter: None,
        }
    }

    pub fn is_populated(&self) -> bool {
        self.top.is_some() && self.bottom.is_some()
    }

    /// Installed length (m); zero for an absent section.
    pub fn length(&self) -> f64 {
        match (self.top, self.bottom) {
            (Some(top), Some(bottom)) => bottom - top,
            _ => 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CasingSchedule {
    sections: Vec<CasingSection>,
}

impl Default for CasingSchedule {
    fn default() -> Self {
        Self::new()
    }
}

impl CasingSchedule {
    /// A schedule with every stage absent.
    pub fn new() -> Self {
        Self {
            sections: CasingStage::ALL.iter().map(|&s| CasingSection::empty(s)).collect(),
        }
    }

    /// Populate a stage's depths and casing diameter.
    pub fn set(&mut self, stage: CasingStage, top: f64, bottom: f64, casing_diameter: f64) {
        let section = &mut self.sections[stage.index()];
        section.top = Some(top);
        section.bottom = Some(bottom);
        section.casing_diameter = Some(casing_diameter);
    }

    pub fn set_drill_bit(&mut self, stage: CasingStage, drill_bit_diameter: f64) {
        self.sections[stage.index()].drill_bit_diameter = Some(drill_bit_diameter);
    }

    pub fn get(&self, stage: CasingStage) -> &CasingSection {
        &self.sections[stage.index()]
    }

    pub fn is_included(&self, stage: CasingStage) -> bool {
        self.get(stage).is_populated()
    }

    /// All rows in stage order, absent ones included.
    pub fn sections(&self) -> &[CasingSection] {
        &self.sections
    }

    pub fn populated(&self) -> impl Iterator<Item = &CasingSection> {
        self.sections.iter().filter(|s| s.is_populated())
    }

    /// Check that populated rows have non-decreasing tops and `top <= bottom`.
    pub fn check_ordering(&self) -> Result<(), CalculationError> {
        let mut previous_top: Option<f64> = None;
        for section in self.populated() {
            let (Some(top), Some(bottom)) = (section.top, section.bottom) else {
                continue;
            };
            if bottom < top {
                return Err(CalculationError::InconsistentSchedule {
                    stage: section.stage.to_string(),
                    reason: format!("bottom {bottom} m is above top {top} m"),
                });
            }
            if let Some(prev) = previous_top {
                if top < prev {
                    return Err(CalculationError::InconsistentSchedule {
                        stage: section.stage.to_string(),
                        reason: format!("top {top} m is above the previous section top {prev} m"),
                    });
                }
            }
            previous_top = Some(top);
        }
        Ok(())
    }

    /// Per-stage installed lengths for cost consumers; absent stages are 0.
    pub fn section_lengths(&self) -> Vec<(CasingStage, f64)> {
        self.sections.iter().map(|s| (s.stage, s.length())).collect()
    }

    /// Deepest populated bottom (m).
    pub fn total_depth(&self) -> f64 {
        self.populated()
            .filter_map(|s| s.bottom)
            .fold(0.0, f64::max)
    }
}
