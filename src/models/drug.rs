use serde::{Deserialize, Serialize};

use crate::error::{DosageError, DosageResult};

/// Administration interval. Each variant fixes how many doses fit in a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    Every4h,
    Every6h,
    Every8h,
    Every12h,
    OnceDaily,
}

// Priority order for label matching: the first pattern found in the label
// wins.
const LABEL_PATTERNS: &[(&str, Frequency)] = &[
    ("4h", Frequency::Every4h),
    ("6h", Frequency::Every6h),
    ("8h", Frequency::Every8h),
    ("12h", Frequency::Every12h),
    ("24h", Frequency::OnceDaily),
    ("1d", Frequency::OnceDaily),
];

impl Frequency {
    pub fn doses_per_day(self) -> u32 {
        match self {
            Frequency::Every4h => 6,
            Frequency::Every6h => 4,
            Frequency::Every8h => 3,
            Frequency::Every12h => 2,
            Frequency::OnceDaily => 1,
        }
    }

    pub fn interval_hours(self) -> u32 {
        24 / self.doses_per_day()
    }

    /// Resolve a free-text interval label such as "Cada 8h", "q8h" or
    /// "every 6-8h".
    ///
    /// Patterns are matched as substrings in priority order, but an occurrence
    /// directly preceded by a digit is part of a longer number and is skipped,
    /// so "24h" never reads as "4h" and "48h" never reads as "8h".
    pub fn from_label(label: &str) -> DosageResult<Self> {
        let lowered = label.to_lowercase();

        LABEL_PATTERNS
            .iter()
            .find(|(pattern, _)| contains_interval(&lowered, pattern))
            .map(|(_, frequency)| *frequency)
            .ok_or_else(|| DosageError::UnrecognizedFrequency(label.to_string()))
    }
}

fn contains_interval(label: &str, pattern: &str) -> bool {
    label.match_indices(pattern).any(|(start, _)| {
        label[..start]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_ascii_digit())
    })
}

/// Mass of active ingredient per reference volume of a liquid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Concentration {
    pub mass_mg: f64,
    pub volume_ml: f64,
}

impl Concentration {
    pub fn new(mass_mg: f64, volume_ml: f64) -> Self {
        Self { mass_mg, volume_ml }
    }

    /// Volume in ml holding `dose_mg` of active ingredient.
    pub fn volume_for(&self, dose_mg: f64) -> f64 {
        dose_mg * self.volume_ml / self.mass_mg
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Formulation {
    Solid,
    Liquid(Concentration),
}

impl Formulation {
    pub fn concentration(&self) -> Option<&Concentration> {
        match self {
            Formulation::Solid => None,
            Formulation::Liquid(concentration) => Some(concentration),
        }
    }
}

/// Recommended mg per kg of body weight per day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DosingRange {
    pub min_mg_per_kg_day: f64,
    pub max_mg_per_kg_day: f64,
}

impl DosingRange {
    pub fn new(min_mg_per_kg_day: f64, max_mg_per_kg_day: f64) -> Self {
        Self {
            min_mg_per_kg_day,
            max_mg_per_kg_day,
        }
    }

    pub fn fixed(mg_per_kg_day: f64) -> Self {
        Self::new(mg_per_kg_day, mg_per_kg_day)
    }

    pub fn is_fixed(&self) -> bool {
        self.min_mg_per_kg_day == self.max_mg_per_kg_day
    }
}

/// One row of the reference table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrugReference {
    pub id: String,
    pub display_name: String,
    pub presentation: String,
    pub dosing: DosingRange,
    pub frequency: Frequency,
    pub frequency_label: String,
    pub duration_label: String,
    pub form: Formulation,
    pub advisory: Option<String>,
}

impl DrugReference {
    /// Label used by drug pickers: "Amoxicilina (Susp 250mg/5ml)".
    pub fn picker_label(&self) -> String {
        format!("{} ({})", self.display_name, self.presentation)
    }

    /// Reject rows that would make the calculation meaningless.
    pub fn validate(&self) -> DosageResult<()> {
        let invalid = |reason: &str| DosageError::InvalidReference {
            id: self.id.clone(),
            reason: reason.to_string(),
        };

        if self.id.trim().is_empty() {
            return Err(invalid("el identificador está vacío"));
        }
        let DosingRange {
            min_mg_per_kg_day: min,
            max_mg_per_kg_day: max,
        } = self.dosing;
        if !(min.is_finite() && min > 0.0) {
            return Err(invalid("la dosis mínima debe ser un número positivo"));
        }
        if !(max.is_finite() && max >= min) {
            return Err(invalid("la dosis máxima no puede ser menor que la mínima"));
        }
        if let Formulation::Liquid(c) = self.form {
            let positive = |v: f64| v.is_finite() && v > 0.0;
            if !(positive(c.mass_mg) && positive(c.volume_ml)) {
                return Err(invalid("la concentración debe tener masa y volumen positivos"));
            }
        }
        Ok(())
    }
}
