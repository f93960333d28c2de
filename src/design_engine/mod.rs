//! Design Engine Module
//!
//! Deterministic sizing formulas for groundwater bore design. Everything
//! here is a pure function of its arguments; the pipeline stages own the
//! store access and sequencing.
//!
//! ## Screen sizing
//! - `minimum_screen_length()` - Cooper-Jacob screen length with ±10% band
//! - `minimum_open_hole_diameter()` - Sand face velocity limit
//! - `casing_friction()` / `minimum_screen_diameter()` - Hazen-Williams losses
//! - `total_casing()` - Candidate ranking metric
//!
//! ## Pump sizing
//! - `pump_inlet_depth()`, `pump_diameter()`, `minimum_pump_housing_diameter()`
//!
//! ## Casing staging
//! - Depth and diameter rules per casing section (`casing_models`)
//!
//! ## Nominal sizes
//! - `next_largest()` / `nearest()` - Snap onto catalog sizes

pub mod casing_models;
pub mod nominal;
pub mod pump_models;
pub mod screen_models;
pub mod water_chemistry;

pub use nominal::{nearest, next_largest, SearchDirection};
pub use pump_models::{minimum_pump_housing_diameter, pump_diameter, pump_inlet_depth, safety_margin};
pub use screen_models::{
    casing_friction, minimum_open_hole_diameter, minimum_screen_diameter, minimum_screen_length,
    total_casing,
};
pub use water_chemistry::WaterChemistry;
