//! Nominal equipment-size catalogs
//!
//! Both catalogs are fixed-schema ordered sequences sorted ascending by the
//! `metres` column. Exact-match lookups compare the stored `metres` values
//! bit-for-bit: every diameter the pipeline looks up was itself taken from
//! one of these catalogs.

use serde::{Deserialize, Serialize};

use crate::error::{LookupError, ValidationError};

/// One nominal casing size and the drill bit recommended to run it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CasingSize {
    pub inches: f64,
    pub metres: f64,
    /// Recommended drill-bit diameter (m)
    pub recommended_bit_metres: f64,
}

/// One nominal drill-bit (open hole) size and the screen it accommodates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrillingSize {
    pub inches: f64,
    pub metres: f64,
    /// Recommended screen diameter (m)
    pub recommended_screen_metres: f64,
}

fn check_sorted_unique(
    catalog: &'static str,
    metres: impl Iterator<Item = f64>,
) -> Result<(), ValidationError> {
    let mut previous: Option<f64> = None;
    for value in metres {
        if !value.is_finite() || value <= 0.0 {
            return Err(ValidationError::InvalidCatalogValue { catalog, value });
        }
        if let Some(prev) = previous {
            if value <= prev {
                return Err(ValidationError::UnsortedCatalog(catalog));
            }
        }
        previous = Some(value);
    }
    if previous.is_none() {
        return Err(ValidationError::EmptyCatalog(catalog));
    }
    Ok(())
}

// ============================================================================
// Casing Catalog
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CasingCatalog {
    sizes: Vec<CasingSize>,
}

impl CasingCatalog {
    /// Build a catalog, rejecting empty, unsorted or duplicate `metres` columns.
    pub fn new(sizes: Vec<CasingSize>) -> Result<Self, ValidationError> {
        let catalog = Self { sizes };
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        check_sorted_unique("casing", self.sizes.iter().map(|s| s.metres))
    }

    pub fn sizes(&self) -> &[CasingSize] {
        &self.sizes
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    /// The `metres` column, ascending.
    pub fn metres(&self) -> Vec<f64> {
        self.sizes.iter().map(|s| s.metres).collect()
    }

    /// Smallest nominal casing diameter (m).
    pub fn smallest(&self) -> Option<f64> {
        self.sizes.first().map(|s| s.metres)
    }

    /// Exact-match recommended drill bit for a casing diameter.
    pub fn recommended_bit(&self, casing_diameter: f64) -> Result<f64, LookupError> {
        self.sizes
            .iter()
            .find(|s| s.metres == casing_diameter)
            .map(|s| s.recommended_bit_metres)
            .ok_or(LookupError::RecommendedBitMissing { casing_diameter })
    }
}

// ============================================================================
// Drilling Catalog
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DrillingCatalog {
    sizes: Vec<DrillingSize>,
}

impl DrillingCatalog {
    pub fn new(sizes: Vec<DrillingSize>) -> Result<Self, ValidationError> {
        let catalog = Self { sizes };
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        check_sorted_unique("drilling", self.sizes.iter().map(|s| s.metres))
    }

    pub fn sizes(&self) -> &[DrillingSize] {
        &self.sizes
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn metres(&self) -> Vec<f64> {
        self.sizes.iter().map(|s| s.metres).collect()
    }

    /// Exact-match recommended screen for an open hole diameter.
    pub fn recommended_screen(&self, open_hole_diameter: f64) -> Result<f64, LookupError> {
        self.sizes
            .iter()
            .find(|s| s.metres == open_hole_diameter)
            .map(|s| s.recommended_screen_metres)
            .ok_or(LookupError::RecommendedScreenMissing { open_hole_diameter })
    }
}

impl Default for CasingCatalog {
    fn default() -> Self {
        Self {
            sizes: crate::config::defaults::default_casing_sizes(),
        }
    }
}

impl Default for DrillingCatalog {
    fn default() -> Self {
        Self {
            sizes: crate::config::defaults::default_drilling_sizes(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalogs_are_valid() {
        assert!(CasingCatalog::default().validate().is_ok());
        assert!(DrillingCatalog::default().validate().is_ok());
        assert_eq!(CasingCatalog::default().len(), 14);
        assert_eq!(DrillingCatalog::default().len(), 21);
    }

    #[test]
    fn test_recommended_bit_exact_match() {
        let catalog = CasingCatalog::default();
        assert_eq!(catalog.recommended_bit(0.762), Ok(0.9144));
        assert_eq!(catalog.recommended_bit(0.339725), Ok(0.4445));
    }

    #[test]
    fn test_recommended_bit_miss_is_lookup_error() {
        let catalog = CasingCatalog::default();
        assert_eq!(
            catalog.recommended_bit(0.15),
            Err(LookupError::RecommendedBitMissing { casing_diameter: 0.15 })
        );
    }

    #[test]
    fn test_recommended_screen_exact_match() {
        let catalog = DrillingCatalog::default();
        assert_eq!(catalog.recommended_screen(0.2159), Ok(0.1143));
        assert!(catalog.recommended_screen(0.2).is_err());
    }

    #[test]
    fn test_unsorted_catalog_rejected() {
        let sizes = vec![
            CasingSize { inches: 6.0, metres: 0.1524, recommended_bit_metres: 0.25 },
            CasingSize { inches: 4.0, metres: 0.1016, recommended_bit_metres: 0.19 },
        ];
        assert_eq!(
            CasingCatalog::new(sizes),
            Err(ValidationError::UnsortedCatalog("casing"))
        );
    }

    #[test]
    fn test_duplicate_metres_rejected() {
        let sizes = vec![
            DrillingSize { inches: 8.5, metres: 0.2159, recommended_screen_metres: 0.1143 },
            DrillingSize { inches: 8.5, metres: 0.2159, recommended_screen_metres: 0.1143 },
        ];
        assert!(DrillingCatalog::new(sizes).is_err());
    }

    #[test]
    fn test_empty_catalog_rejected() {
        assert_eq!(
            CasingCatalog::new(Vec::new()),
            Err(ValidationError::EmptyCatalog("casing"))
        );
    }
}
