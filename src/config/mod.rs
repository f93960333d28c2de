//! Design Configuration Module
//!
//! Bore designs are described in TOML files. A design is passed explicitly
//! to whatever needs it; there is no global config.
//!
//! ## Loading Order
//!
//! 1. `GEODRILL_CONFIG` environment variable (path to TOML file)
//! 2. `bore_design.toml` in the current working directory
//! 3. Built-in defaults
//!
//! ## Usage
//!
//! ```ignore
//! let config = DesignConfig::load_from_file(Path::new("bore_design.toml"))?;
//! let mut store = config.build_store()?;
//! DesignPipeline::new().run(&mut store)?;
//! ```

mod design_config;
pub mod defaults;
pub mod validation;

pub use design_config::*;

/// Commented example design, printed by `geodrill template`.
pub const TEMPLATE_TOML: &str = include_str!("../../bore_design.example.toml");
