use serde::{Deserialize, Serialize};

use super::drug::{Concentration, DosingRange, Frequency};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationRequest {
    pub drug_id: String,
    pub patient_weight_kg: f64,
}

impl CalculationRequest {
    pub fn new(drug_id: impl Into<String>, patient_weight_kg: f64) -> Self {
        Self {
            drug_id: drug_id.into(),
            patient_weight_kg,
        }
    }
}

/// Closed interval of amounts, already rounded to two decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DoseRange {
    pub low: f64,
    pub high: f64,
}

impl DoseRange {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    pub fn is_single_value(&self) -> bool {
        self.low == self.high
    }
}

/// Outcome of one calculation. Derived on demand and never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub drug_id: String,
    pub display_name: String,
    pub patient_weight_kg: f64,
    pub dosing: DosingRange,
    pub frequency: Frequency,
    pub doses_per_day: u32,
    /// Total mg per day.
    pub daily_dose: DoseRange,
    /// mg per administration.
    pub dose: DoseRange,
    /// ml per administration, liquids only.
    pub volume: Option<DoseRange>,
    pub concentration: Option<Concentration>,
    pub presentation: String,
    pub frequency_label: String,
    pub duration_label: String,
    pub advisory: Option<String>,
}

impl CalculationResult {
    pub fn dose_range_low_mg(&self) -> f64 {
        self.dose.low
    }

    pub fn dose_range_high_mg(&self) -> f64 {
        self.dose.high
    }

    pub fn volume_range_low_ml(&self) -> Option<f64> {
        self.volume.map(|v| v.low)
    }

    pub fn volume_range_high_ml(&self) -> Option<f64> {
        self.volume.map(|v| v.high)
    }

    /// Whether the drug uses a single fixed mg/kg/day value, in which case
    /// the report shows one number instead of a range.
    pub fn is_fixed_dose(&self) -> bool {
        self.dosing.is_fixed()
    }
}
