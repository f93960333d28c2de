//! Design Configuration - one bore design as an editable TOML file
//!
//! A design file carries the well identity, the scalar inputs, the
//! stratigraphy, and optional overrides for constants and catalogs. Every
//! section is optional; a missing section falls back to its `Default`.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::design_engine::{safety_margin, WaterChemistry};
use crate::error::DesignError;
use crate::store::WellBoreParameterStore;
use crate::types::{
    AquiferLayer, AquiferLayerTable, CasingCatalog, DesignConstants, DrillingCatalog,
    InputParameters,
};

/// Environment variable naming the design file.
pub const CONFIG_ENV_VAR: &str = "GEODRILL_CONFIG";

/// Design file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "bore_design.toml";

// ============================================================================
// Config Provenance
// ============================================================================

/// Dotted key paths that were explicitly present in the user's TOML file.
#[derive(Debug, Clone, Default)]
pub struct ConfigProvenance {
    pub explicit_keys: HashSet<String>,
}

impl ConfigProvenance {
    /// Example: `provenance.is_user_set("constants.pipe_roughness_coeff")`
    pub fn is_user_set(&self, dotted_key: &str) -> bool {
        self.explicit_keys.contains(dotted_key)
    }
}

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration for one bore design.
///
/// Load with `DesignConfig::load()` which searches:
/// 1. `$GEODRILL_CONFIG` env var
/// 2. `./bore_design.toml`
/// 3. Built-in defaults
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DesignConfig {
    #[serde(default)]
    pub well: WellInfo,

    /// Scalar design inputs and layer selection
    #[serde(default)]
    pub parameters: InputParameters,

    /// Stratigraphy, top to bottom
    #[serde(default)]
    pub aquifer_layers: Vec<AquiferLayer>,

    #[serde(default)]
    pub constants: DesignConstants,

    /// Catalog overrides; built-in catalogs when absent
    #[serde(default)]
    pub catalogs: CatalogConfig,

    /// Optional sample chemistry for the corrosivity check
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub water_chemistry: Option<WaterChemistry>,
}

impl DesignConfig {
    /// Load configuration using the standard search order:
    /// 1. `$GEODRILL_CONFIG` environment variable
    /// 2. `./bore_design.toml` in the current working directory
    /// 3. Built-in defaults
    pub fn load() -> Self {
        Self::load_with_provenance().0
    }

    /// Same search order as `load()`, also returning which keys the user set.
    pub fn load_with_provenance() -> (Self, ConfigProvenance) {
        // 1. Check env var
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            let p = PathBuf::from(&path);
            if p.exists() {
                match Self::load_from_file_with_provenance(&p) {
                    Ok((config, provenance)) => {
                        info!(path = %p.display(), well = %config.well.name, "Loaded design from GEODRILL_CONFIG");
                        return (config, provenance);
                    }
                    Err(e) => {
                        warn!(path = %p.display(), error = %e, "Failed to load design from GEODRILL_CONFIG, falling back");
                    }
                }
            } else {
                warn!(path = %path, "GEODRILL_CONFIG points to non-existent file, falling back");
            }
        }

        // 2. Check ./bore_design.toml
        let local = PathBuf::from(DEFAULT_CONFIG_FILE);
        if local.exists() {
            match Self::load_from_file_with_provenance(&local) {
                Ok((config, provenance)) => {
                    info!(well = %config.well.name, "Loaded design from ./bore_design.toml");
                    return (config, provenance);
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load ./bore_design.toml, using defaults");
                }
            }
        }

        // 3. Defaults, nothing user-set
        info!("No bore_design.toml found, using built-in defaults");
        (Self::default(), ConfigProvenance::default())
    }

    /// Load from a specific TOML file path.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let (config, _provenance) = Self::load_from_file_with_provenance(path)?;
        Ok(config)
    }

    /// Load from a specific TOML file path, also returning provenance.
    pub fn load_from_file_with_provenance(
        path: &Path,
    ) -> Result<(Self, ConfigProvenance), ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Self::from_toml_str(&contents).map_err(|e| match e {
            ConfigError::ParseStr(e) => ConfigError::Parse(path.to_path_buf(), e),
            other => other,
        })
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(contents: &str) -> Result<(Self, ConfigProvenance), ConfigError> {
        // Two-pass: check for unknown keys first (warnings only)
        for w in super::validation::validate_unknown_keys(contents) {
            warn!("{}", w);
        }

        let provenance = ConfigProvenance {
            explicit_keys: super::validation::walk_toml_keys(
                &contents
                    .parse::<toml::Value>()
                    .unwrap_or(toml::Value::Table(Default::default())),
                "",
            )
            .into_iter()
            .collect(),
        };

        let config: Self = toml::from_str(contents).map_err(ConfigError::ParseStr)?;
        config.validate()?;
        Ok((config, provenance))
    }

    /// Serialize the current config to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = self.to_toml()?;
        std::fs::write(path, contents).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        info!(path = %path.display(), "Design config saved");
        Ok(())
    }

    /// Validate constants, catalogs and physical ranges.
    ///
    /// Layer selection and parameter presence are checked when the store is
    /// built, where they are reported as `ValidationError`s.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (mut errors, warnings) = super::validation::validate_physical_ranges(self);
        for w in &warnings {
            warn!(field = %w.field, "{}", w);
        }

        let c = &self.constants;
        for (name, value) in [
            ("constants.sand_face_velocity_production", c.sand_face_velocity_production),
            ("constants.sand_face_velocity_injection", c.sand_face_velocity_injection),
            ("constants.net_to_gross_ratio_aquifer", c.net_to_gross_ratio_aquifer),
            ("constants.aquifer_average_porosity", c.aquifer_average_porosity),
            ("constants.pipe_roughness_coeff", c.pipe_roughness_coeff),
        ] {
            Self::check_positive(name, value, &mut errors);
        }
        if c.top_aquifer_whitelist.is_empty() {
            errors.push("constants.top_aquifer_whitelist must not be empty".to_string());
        }

        if let Some(casing) = &self.catalogs.casing {
            if let Err(e) = casing.validate() {
                errors.push(format!("catalogs.casing: {e}"));
            }
        }
        if let Some(drilling) = &self.catalogs.drilling {
            if let Err(e) = drilling.validate() {
                errors.push(format!("catalogs.drilling: {e}"));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    fn check_positive(name: &str, value: f64, errors: &mut Vec<String>) {
        if !(value.is_finite() && value > 0.0) {
            errors.push(format!("{name} = {value} must be a positive finite number"));
        }
    }

    /// Input parameters with the safety margin filled in when omitted.
    ///
    /// The derived margin is the larger of 10 m or 0.2 × (WD + Sw), and only
    /// when both terms are present.
    pub fn resolved_parameters(&self) -> InputParameters {
        let mut params = self.parameters.clone();
        if params.safety_margin.is_none() {
            if let (Some(wd), Some(sw)) = (params.groundwater_depth, params.allowable_drawdown) {
                let margin = safety_margin(wd, sw);
                debug!(safety_margin = margin, "Derived safety margin");
                params.safety_margin = Some(margin);
            }
        }
        params
    }

    /// Build and initialise a parameter store from this design.
    pub fn build_store(&self) -> Result<WellBoreParameterStore, DesignError> {
        let mut store = WellBoreParameterStore::new(self.well.is_production_well)
            .with_constants(self.constants.clone());
        if let Some(casing) = &self.catalogs.casing {
            info!(sizes = casing.len(), "Using casing catalog from design file");
            store = store.with_casing_catalog(casing.clone());
        }
        if let Some(drilling) = &self.catalogs.drilling {
            info!(sizes = drilling.len(), "Using drilling catalog from design file");
            store = store.with_drilling_catalog(drilling.clone());
        }

        let layers = AquiferLayerTable::new(self.aquifer_layers.clone())?;
        store.initialise_and_validate_input_params(&self.resolved_parameters(), layers)?;
        Ok(store)
    }

    /// Log constants the user overrode, as reported by `provenance`.
    pub fn log_overrides(&self, provenance: &ConfigProvenance) {
        let c = &self.constants;
        for (key, value) in [
            ("constants.sand_face_velocity_production", c.sand_face_velocity_production),
            ("constants.sand_face_velocity_injection", c.sand_face_velocity_injection),
            ("constants.net_to_gross_ratio_aquifer", c.net_to_gross_ratio_aquifer),
            ("constants.aquifer_average_porosity", c.aquifer_average_porosity),
            ("constants.pipe_roughness_coeff", c.pipe_roughness_coeff),
        ] {
            if provenance.is_user_set(key) {
                info!(key, value, "Constant overridden by design file");
            }
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(PathBuf, std::io::Error),
    Parse(PathBuf, toml::de::Error),
    ParseStr(toml::de::Error),
    Serialize(toml::ser::Error),
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(path, e) => write!(f, "Config I/O error ({}): {}", path.display(), e),
            ConfigError::Parse(path, e) => {
                write!(f, "Config parse error ({}): {}", path.display(), e)
            }
            ConfigError::ParseStr(e) => write!(f, "Config parse error: {}", e),
            ConfigError::Serialize(e) => write!(f, "Config serialization error: {}", e),
            ConfigError::Validation(errors) => {
                writeln!(f, "Config validation failed:")?;
                for e in errors {
                    writeln!(f, "  - {}", e)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Well Info
// ============================================================================

/// Identification metadata. Only `is_production_well` affects the design.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WellInfo {
    #[serde(default = "default_well_name")]
    pub name: String,

    #[serde(default)]
    pub site: String,

    /// Production (true) or injection (false) bore
    #[serde(default = "default_is_production_well")]
    pub is_production_well: bool,
}

fn default_well_name() -> String {
    "UNNAMED".to_string()
}
fn default_is_production_well() -> bool {
    true
}

impl Default for WellInfo {
    fn default() -> Self {
        Self {
            name: default_well_name(),
            site: String::new(),
            is_production_well: default_is_production_well(),
        }
    }
}

// ============================================================================
// Catalog overrides
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub casing: Option<CasingCatalog>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drilling: Option<DrillingCatalog>,
}
