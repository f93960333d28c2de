//! Water corrosivity via the Langelier saturation index
//!
//! A positive index means the water is supersaturated with CaCO3 and tends
//! to scale; a negative index means it tends to dissolve scale and corrode
//! casing.

use serde::{Deserialize, Serialize};

use crate::error::CalculationError;

const PK2_COEFFS: [f64; 5] = [107.8871, 0.032_528_49, 5151.79, 38.925_61, 563_713.9];
const PKSC_COEFFS: [f64; 5] = [171.9065, 0.077_993, 2839.319, 71.595, 0.0];

/// Valid temperature range of the dissociation-constant fits (K).
pub const TEMPERATURE_RANGE_K: (f64, f64) = (273.0, 363.0);

const CALCIUM_MOLAR_MASS: f64 = 40.08;
const BICARBONATE_MOLAR_MASS: f64 = 61.0168;

/// Water sample chemistry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaterChemistry {
    pub temperature_k: f64,
    pub ph: f64,
    /// Ca²⁺ (ppm)
    pub calcium_ion_concentration: f64,
    /// HCO₃⁻ (ppm)
    pub carbonate_ion_concentration: f64,
    /// TDS (ppm)
    pub total_dissolved_solids: f64,
}

/// pK(T) = c · [1, T, −1/T, −log₁₀T, 1/T²]
fn potenz(coeffs: &[f64; 5], t: f64) -> f64 {
    let terms = [1.0, t, -1.0 / t, -t.log10(), 1.0 / (t * t)];
    coeffs.iter().zip(terms).map(|(c, x)| c * x).sum()
}

impl WaterChemistry {
    fn check(&self) -> Result<(), CalculationError> {
        let (low, high) = TEMPERATURE_RANGE_K;
        if !(low..=high).contains(&self.temperature_k) {
            return Err(CalculationError::WaterChemistryOutOfRange {
                name: "temperature_k",
                value: self.temperature_k,
            });
        }
        for (name, value) in [
            ("calcium_ion_concentration", self.calcium_ion_concentration),
            ("carbonate_ion_concentration", self.carbonate_ion_concentration),
            ("total_dissolved_solids", self.total_dissolved_solids),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(CalculationError::WaterChemistryOutOfRange { name, value });
            }
        }
        if !self.ph.is_finite() {
            return Err(CalculationError::WaterChemistryOutOfRange { name: "ph", value: self.ph });
        }
        Ok(())
    }

    /// pH at which the water is saturated with CaCO3
    ///
    /// Formula: pHs = pK2 − pKsc + pCa + pHCO3 + 5 × pfm
    ///
    /// Where pfm is the monovalent activity coefficient term derived from
    /// ionic strength (TDS / 40000) and the dielectric constant at T.
    pub fn saturation_ph(&self) -> Result<f64, CalculationError> {
        self.check()?;
        let t = self.temperature_k;

        let pk2 = potenz(&PK2_COEFFS, t);
        let pksc = potenz(&PKSC_COEFFS, t);
        let p_ca = -(self.calcium_ion_concentration / (1000.0 * CALCIUM_MOLAR_MASS)).log10();
        let p_hco3 = -(self.carbonate_ion_concentration / (1000.0 * BICARBONATE_MOLAR_MASS)).log10();

        let ionic_strength = self.total_dissolved_solids / 40_000.0;
        let dielectric = 60_954.0 / (t + 116.0) - 68.937;
        let a = 1.82e6 * (dielectric * t).powf(-1.5);
        let sqrt_i = ionic_strength.sqrt();
        let pfm = a * (sqrt_i / (1.0 + sqrt_i) - 0.31);

        let phs = pk2 - pksc + p_ca + p_hco3 + 5.0 * pfm;
        if phs.is_finite() {
            Ok(phs)
        } else {
            Err(CalculationError::NonFinite { quantity: "saturation pH", value: phs })
        }
    }

    /// LSI = pH − pHs
    pub fn langelier_saturation_index(&self) -> Result<f64, CalculationError> {
        Ok(self.ph - self.saturation_ph()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(temperature_k: f64) -> WaterChemistry {
        WaterChemistry {
            temperature_k,
            ph: 7.5,
            calcium_ion_concentration: 100.0,
            carbonate_ion_concentration: 200.0,
            total_dissolved_solids: 500.0,
        }
    }

    #[test]
    fn test_lsi_is_finite_in_range() {
        let lsi = sample(298.15).langelier_saturation_index().unwrap();
        assert!(lsi.is_finite());
        assert!(lsi > -3.0 && lsi < 3.0);
    }

    #[test]
    fn test_hotter_water_scales_more() {
        let cool = sample(288.15).langelier_saturation_index().unwrap();
        let hot = sample(343.15).langelier_saturation_index().unwrap();
        assert!(hot > cool);
    }

    #[test]
    fn test_temperature_out_of_range() {
        assert!(matches!(
            sample(400.0).langelier_saturation_index(),
            Err(CalculationError::WaterChemistryOutOfRange { name: "temperature_k", .. })
        ));
    }

    #[test]
    fn test_zero_calcium_rejected() {
        let mut chem = sample(298.15);
        chem.calcium_ion_concentration = 0.0;
        assert!(chem.langelier_saturation_index().is_err());
    }
}
