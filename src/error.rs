//! Error types for dosage calculation.

use thiserror::Error;

/// Every way a single calculation attempt can be rejected.
///
/// None of these are fatal: the caller reports the message and the next
/// calculation starts from scratch.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DosageError {
    #[error("Seleccione un medicamento válido: {0}")]
    InvalidDrugSelection(String),

    #[error("Peso no válido: {0}")]
    InvalidWeight(String),

    #[error("Frecuencia no reconocida: '{0}'")]
    UnrecognizedFrequency(String),

    #[error("Entrada de referencia '{id}' no válida: {reason}")]
    InvalidReference { id: String, reason: String },
}

impl DosageError {
    pub fn no_drug_selected() -> Self {
        Self::InvalidDrugSelection("no se seleccionó ningún medicamento".to_string())
    }

    pub fn unknown_drug(drug_id: &str) -> Self {
        Self::InvalidDrugSelection(format!("medicamento desconocido '{}'", drug_id))
    }

    pub fn weight_not_positive() -> Self {
        Self::InvalidWeight("ingrese un peso mayor que 0".to_string())
    }

    pub fn weight_out_of_range(weight_kg: f64) -> Self {
        Self::InvalidWeight(format!("{} kg está fuera de rango", weight_kg))
    }
}

pub type DosageResult<T> = Result<T, DosageError>;
