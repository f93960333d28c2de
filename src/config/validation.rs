//! Config validation: unknown-key detection with Levenshtein suggestions
//! and physical range checks.
//!
//! Two-pass parse approach: first deserialize raw TOML into `toml::Value`,
//! walk the key tree, compare against known field names, and emit warnings
//! with "did you mean?" suggestions. Then proceed with normal serde
//! deserialization. Warnings never break existing design files.

use std::collections::HashSet;

/// A non-fatal config warning (typo, suspicious value).
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(ref s) = self.suggestion {
            write!(f, ", did you mean '{s}'?")?;
        }
        Ok(())
    }
}

// ============================================================================
// Known Config Keys
// ============================================================================

/// Returns the complete set of valid dotted key paths for `DesignConfig`.
///
/// Array-of-tables entries (`[[aquifer_layers]]`, `[[catalogs.casing]]`)
/// contribute their element keys under the array's path.
/// Any new field added to `DesignConfig` must be added here too.
pub fn known_config_keys() -> HashSet<&'static str> {
    let keys: &[&str] = &[
        // [well]
        "well",
        "well.name",
        "well.site",
        "well.is_production_well",
        // [parameters]
        "parameters",
        "parameters.required_flow_rate",
        "parameters.hydraulic_conductivity",
        "parameters.average_porosity",
        "parameters.bore_lifetime_year",
        "parameters.groundwater_depth",
        "parameters.long_term_decline_rate",
        "parameters.allowable_drawdown",
        "parameters.safety_margin",
        "parameters.target_aquifer_layer",
        "parameters.top_aquifer_layer",
        // [[aquifer_layers]]
        "aquifer_layers",
        "aquifer_layers.layer_code",
        "aquifer_layers.is_aquifer",
        "aquifer_layers.depth_to_base",
        // [constants]
        "constants",
        "constants.sand_face_velocity_production",
        "constants.sand_face_velocity_injection",
        "constants.net_to_gross_ratio_aquifer",
        "constants.aquifer_average_porosity",
        "constants.pipe_roughness_coeff",
        "constants.top_aquifer_whitelist",
        // [catalogs]
        "catalogs",
        "catalogs.casing",
        "catalogs.casing.inches",
        "catalogs.casing.metres",
        "catalogs.casing.recommended_bit_metres",
        "catalogs.drilling",
        "catalogs.drilling.inches",
        "catalogs.drilling.metres",
        "catalogs.drilling.recommended_screen_metres",
        // [water_chemistry]
        "water_chemistry",
        "water_chemistry.temperature_k",
        "water_chemistry.ph",
        "water_chemistry.calcium_ion_concentration",
        "water_chemistry.carbonate_ion_concentration",
        "water_chemistry.total_dissolved_solids",
    ];
    keys.iter().copied().collect()
}

// ============================================================================
// TOML Key Walking
// ============================================================================

/// Recursively walks a `toml::Value` tree and collects all dotted key paths.
///
/// For example, a table `{ a = { b = 1, c = 2 } }` yields:
/// `["a", "a.b", "a.c"]`. Tables inside arrays are walked under the array's
/// path, each distinct path reported once.
pub fn walk_toml_keys(value: &toml::Value, prefix: &str) -> Vec<String> {
    let mut keys = Vec::new();
    if let Some(table) = value.as_table() {
        for (k, v) in table {
            let path = if prefix.is_empty() {
                k.clone()
            } else {
                format!("{prefix}.{k}")
            };
            keys.push(path.clone());
            match v {
                toml::Value::Table(_) => keys.extend(walk_toml_keys(v, &path)),
                toml::Value::Array(items) => {
                    for item in items.iter().filter(|i| i.is_table()) {
                        for key in walk_toml_keys(item, &path) {
                            if !keys.contains(&key) {
                                keys.push(key);
                            }
                        }
                    }
                }
                _ => {}
            }
        }
    }
    keys
}

// ============================================================================
// Levenshtein Distance
// ============================================================================

/// Compute the Levenshtein edit distance between two strings.
fn levenshtein(a: &str, b: &str) -> usize {
    let a_len = a.chars().count();
    let b_len = b.chars().count();
    if a_len == 0 {
        return b_len;
    }
    if b_len == 0 {
        return a_len;
    }

    let mut prev: Vec<usize> = (0..=b_len).collect();
    let mut curr = vec![0; b_len + 1];

    for (i, ca) in a.chars().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.chars().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_len]
}

/// Suggest the closest known key for an unknown key, if within edit distance 3.
pub fn suggest_correction(unknown: &str, known: &HashSet<&str>) -> Option<String> {
    let mut best: Option<(&str, usize)> = None;
    for &k in known {
        let dist = levenshtein(unknown, k);
        if dist <= 3 {
            match best {
                Some((best_k, best_dist)) if dist > best_dist || (dist == best_dist && k >= best_k) => {}
                _ => best = Some((k, dist)),
            }
        }
    }
    best.map(|(k, _)| k.to_string())
}

// ============================================================================
// Unknown Key Validation (entry point)
// ============================================================================

/// Parse a raw TOML string and return warnings for any unknown config keys.
///
/// This does NOT fail on unknown keys, it only warns.
pub fn validate_unknown_keys(raw_toml: &str) -> Vec<ValidationWarning> {
    let value: toml::Value = match raw_toml.parse() {
        Ok(v) => v,
        Err(_) => return Vec::new(), // parse errors are handled by serde later
    };

    let known = known_config_keys();
    walk_toml_keys(&value, "")
        .into_iter()
        .filter(|key| !known.contains(key.as_str()))
        .map(|key| ValidationWarning {
            suggestion: suggest_correction(&key, &known),
            message: format!("Unknown config key '{key}'"),
            field: key,
        })
        .collect()
}

// ============================================================================
// Physical Range Validation
// ============================================================================

/// Validate physical ranges on a parsed `DesignConfig`.
///
/// Returns (errors, warnings). Errors are impossible values that must
/// prevent a run; warnings are suspicious but not fatal.
pub fn validate_physical_ranges(
    config: &super::DesignConfig,
) -> (Vec<String>, Vec<ValidationWarning>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let p = &config.parameters;

    // Values used as divisors or under a logarithm
    for (name, value) in [
        ("required_flow_rate", p.required_flow_rate),
        ("hydraulic_conductivity", p.hydraulic_conductivity),
        ("bore_lifetime_year", p.bore_lifetime_year),
    ] {
        if let Some(v) = value {
            if !(v.is_finite() && v > 0.0) {
                errors.push(format!("parameters.{name} = {v} must be > 0"));
            }
        }
    }

    // Depths and rates that cannot be negative
    for (name, value) in [
        ("groundwater_depth", p.groundwater_depth),
        ("allowable_drawdown", p.allowable_drawdown),
        ("safety_margin", p.safety_margin),
        ("long_term_decline_rate", p.long_term_decline_rate),
    ] {
        if let Some(v) = value {
            if v < 0.0 {
                errors.push(format!("parameters.{name} = {v} cannot be negative"));
            }
        }
    }

    if let Some(phi) = p.average_porosity {
        if !(0.0..=1.0).contains(&phi) {
            errors.push(format!(
                "parameters.average_porosity = {phi} is outside physical range (0-1)"
            ));
        }
    }
    let phi = config.constants.aquifer_average_porosity;
    if phi > 1.0 {
        errors.push(format!(
            "constants.aquifer_average_porosity = {phi} is outside physical range (0-1)"
        ));
    }

    for layer in &config.aquifer_layers {
        if layer.depth_to_base < 0.0 {
            errors.push(format!(
                "aquifer_layers '{}' depth_to_base = {} cannot be negative",
                layer.layer_code, layer.depth_to_base
            ));
        }
    }

    // Hydraulic conductivity: suspicious outside 1e-4 to 1000 m/day
    if let Some(k) = p.hydraulic_conductivity {
        if k > 0.0 && !(1e-4..=1000.0).contains(&k) {
            warnings.push(ValidationWarning {
                field: "parameters.hydraulic_conductivity".to_string(),
                message: format!(
                    "hydraulic_conductivity = {k} is outside typical range (1e-4 to 1000 m/day)"
                ),
                suggestion: None,
            });
        }
    }

    // Roughness: steel is ~100, plastics up to ~150
    let c = config.constants.pipe_roughness_coeff;
    if c > 0.0 && !(60.0..=160.0).contains(&c) {
        warnings.push(ValidationWarning {
            field: "constants.pipe_roughness_coeff".to_string(),
            message: format!("pipe_roughness_coeff = {c} is outside typical range (60-160)"),
            suggestion: None,
        });
    }

    (errors, warnings)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DesignConfig;
    use crate::types::AquiferLayer;

    #[test]
    fn test_levenshtein_identical() {
        assert_eq!(levenshtein("screen", "screen"), 0);
    }

    #[test]
    fn test_levenshtein_one_edit() {
        assert_eq!(levenshtein("screen", "scren"), 1);
    }

    #[test]
    fn test_levenshtein_empty() {
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("abc", ""), 3);
    }

    #[test]
    fn test_walk_toml_keys_nested() {
        let value: toml::Value = "[well]\nname = \"A\"\n[parameters]\nrequired_flow_rate = 1.0\n"
            .parse()
            .unwrap();
        let keys = walk_toml_keys(&value, "");
        assert!(keys.contains(&"well.name".to_string()));
        assert!(keys.contains(&"parameters.required_flow_rate".to_string()));
    }

    #[test]
    fn test_walk_toml_keys_array_of_tables() {
        let toml_str = r#"
[[aquifer_layers]]
layer_code = "100qa"
depth_to_base = 3.0

[[aquifer_layers]]
layer_code = "109lmta"
depth_to_base = 1000.0
"#;
        let value: toml::Value = toml_str.parse().unwrap();
        let keys = walk_toml_keys(&value, "");
        assert_eq!(
            keys.iter().filter(|k| *k == "aquifer_layers.layer_code").count(),
            1
        );
        assert!(keys.contains(&"aquifer_layers.depth_to_base".to_string()));
    }

    #[test]
    fn test_typo_key_produces_warning_with_suggestion() {
        let toml_str = r#"
[parameters]
hydraulic_conductivty = 5.0
"#;
        let warnings = validate_unknown_keys(toml_str);
        assert_eq!(warnings.len(), 1);
        assert_eq!(
            warnings[0].suggestion.as_deref(),
            Some("parameters.hydraulic_conductivity")
        );
    }

    #[test]
    fn test_unknown_layer_field_warns() {
        let toml_str = r#"
[[aquifer_layers]]
layer_code = "100qa"
depth_to_bas = 3.0
"#;
        let warnings = validate_unknown_keys(toml_str);
        assert_eq!(warnings.len(), 1);
        assert_eq!(
            warnings[0].suggestion.as_deref(),
            Some("aquifer_layers.depth_to_base")
        );
    }

    #[test]
    fn test_suggest_correction_no_match_for_garbage() {
        assert!(suggest_correction("zzzzzzzzzzzz", &known_config_keys()).is_none());
    }

    #[test]
    fn test_physical_range_defaults_clean() {
        let (errors, warnings) = validate_physical_ranges(&DesignConfig::default());
        assert!(errors.is_empty(), "{errors:?}");
        assert!(warnings.is_empty(), "{warnings:?}");
    }

    #[test]
    fn test_physical_range_zero_conductivity() {
        let mut config = DesignConfig::default();
        config.parameters.hydraulic_conductivity = Some(0.0);
        let (errors, _) = validate_physical_ranges(&config);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("hydraulic_conductivity"));
    }

    #[test]
    fn test_physical_range_negative_layer_depth() {
        let mut config = DesignConfig::default();
        config.aquifer_layers.push(AquiferLayer::new("100qa", true, -1.0));
        let (errors, _) = validate_physical_ranges(&config);
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_roughness_out_of_range_warns() {
        let mut config = DesignConfig::default();
        config.constants.pipe_roughness_coeff = 300.0;
        let (errors, warnings) = validate_physical_ranges(&config);
        assert!(errors.is_empty());
        assert_eq!(warnings.len(), 1);
    }
}
