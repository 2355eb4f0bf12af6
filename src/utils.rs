//! Numeric helpers shared by the calculator and the report.

use crate::error::{DosageError, DosageResult};

/// Round to two decimals, halves away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Parse a weight typed into a numeric field.
///
/// Accepts digits with a single `.` or `,` decimal separator; surrounding
/// whitespace is ignored.
pub fn parse_weight(raw: &str) -> DosageResult<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(DosageError::InvalidWeight("el peso es obligatorio".to_string()));
    }

    let separators = trimmed.chars().filter(|c| *c == '.' || *c == ',').count();
    let well_formed = separators <= 1
        && trimmed.chars().any(|c| c.is_ascii_digit())
        && trimmed
            .chars()
            .all(|c| c.is_ascii_digit() || c == '.' || c == ',');
    if !well_formed {
        return Err(DosageError::InvalidWeight(format!(
            "'{}' no es un número",
            trimmed
        )));
    }

    let weight: f64 = trimmed
        .replace(',', ".")
        .parse()
        .map_err(|_| DosageError::InvalidWeight(format!("'{}' no es un número", trimmed)))?;
    validate_weight(weight)?;
    Ok(weight)
}

pub fn validate_weight(weight_kg: f64) -> DosageResult<()> {
    if weight_kg.is_finite() && weight_kg > 0.0 {
        Ok(())
    } else {
        Err(DosageError::weight_not_positive())
    }
}
