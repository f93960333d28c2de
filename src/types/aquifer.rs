//! Aquifer layer (stratigraphy) table
//!
//! Layers are listed in drill order, top to bottom. `depth_to_base` is the
//! depth (m) of each unit's base below ground.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AquiferLayer {
    /// Stratigraphic unit code, e.g. `109lmta`
    pub layer_code: String,
    #[serde(default)]
    pub is_aquifer: bool,
    pub depth_to_base: f64,
}

impl AquiferLayer {
    pub fn new(layer_code: impl Into<String>, is_aquifer: bool, depth_to_base: f64) -> Self {
        Self {
            layer_code: layer_code.into(),
            is_aquifer,
            depth_to_base,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AquiferLayerTable {
    layers: Vec<AquiferLayer>,
}

impl AquiferLayerTable {
    /// Build a layer table. Codes must be unique and depths non-decreasing.
    pub fn new(layers: Vec<AquiferLayer>) -> Result<Self, ValidationError> {
        let table = Self { layers };
        table.validate()?;
        Ok(table)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.layers.is_empty() {
            return Err(ValidationError::EmptyLayerTable);
        }
        let mut previous: Option<f64> = None;
        for (i, layer) in self.layers.iter().enumerate() {
            if !layer.depth_to_base.is_finite() {
                return Err(ValidationError::NonFiniteParameter {
                    name: "depth_to_base",
                    value: layer.depth_to_base,
                });
            }
            if self.layers[..i].iter().any(|l| l.layer_code == layer.layer_code) {
                return Err(ValidationError::DuplicateLayer(layer.layer_code.clone()));
            }
            if let Some(prev) = previous {
                if layer.depth_to_base < prev {
                    return Err(ValidationError::DecreasingLayerDepth {
                        code: layer.layer_code.clone(),
                        depth: layer.depth_to_base,
                        previous: prev,
                    });
                }
            }
            previous = Some(layer.depth_to_base);
        }
        Ok(())
    }

    pub fn layers(&self) -> &[AquiferLayer] {
        &self.layers
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn position(&self, layer_code: &str) -> Option<usize> {
        self.layers.iter().position(|l| l.layer_code == layer_code)
    }

    pub fn get(&self, layer_code: &str) -> Option<&AquiferLayer> {
        self.layers.iter().find(|l| l.layer_code == layer_code)
    }

    /// The layer immediately below `layer_code`, if any.
    pub fn below(&self, layer_code: &str) -> Option<&AquiferLayer> {
        self.position(layer_code).and_then(|i| self.layers.get(i + 1))
    }
}
