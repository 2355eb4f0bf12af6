//! Text rendering of calculation results.

use std::fmt;

use crate::models::{CalculationResult, DoseRange};

fn range_text(range: &DoseRange, single: bool) -> String {
    if single {
        format!("{:.2}", range.low)
    } else {
        format!("{:.2}-{:.2}", range.low, range.high)
    }
}

/// Result summary as shown under the calculate button.
pub fn format_result(result: &CalculationResult) -> String {
    let single = result.is_fixed_dose();
    let mut text = format!("Dosis por toma: {} mg", range_text(&result.dose, single));
    if let Some(volume) = &result.volume {
        text.push_str(&format!(" ({} ml)", range_text(volume, single)));
    }
    text.push_str(&format!(
        "\n{}\nFrecuencia: {}\nDuración: {}",
        result.presentation, result.frequency_label, result.duration_label
    ));
    if let Some(advisory) = &result.advisory {
        text.push_str(&format!("\nNota: {}", advisory));
    }
    text
}

/// Step-by-step account of how the dose was reached.
pub fn explain(result: &CalculationResult) -> String {
    let mut lines = vec![
        "Cálculo de la dosis:".to_string(),
        String::new(),
        format!("1. Peso del paciente: {} kg", result.patient_weight_kg),
        format!(
            "2. Rango de dosis diaria: {}-{} mg/kg/día",
            result.dosing.min_mg_per_kg_day, result.dosing.max_mg_per_kg_day
        ),
        format!(
            "3. Dosis diaria total: {:.2}-{:.2} mg",
            result.daily_dose.low, result.daily_dose.high
        ),
        format!(
            "4. Tomas por día: {} ({})",
            result.doses_per_day, result.frequency_label
        ),
        "5. Dosis por toma = dosis diaria total / tomas por día".to_string(),
        format!(
            "   - Dosis por toma: {:.2}-{:.2} mg",
            result.dose.low, result.dose.high
        ),
    ];

    if let (Some(concentration), Some(volume)) = (&result.concentration, &result.volume) {
        lines.push(format!(
            "6. Conversión a ml: (dosis en mg x {}) / {}",
            concentration.volume_ml, concentration.mass_mg
        ));
        lines.push(format!("   - Resultado: {:.2}-{:.2} ml", volume.low, volume.high));
    }

    lines.join("\n")
}

impl fmt::Display for CalculationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_result(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::compute_dose;

    #[test]
    fn range_for_variable_dose() {
        let result = compute_dose("paracetamol", 10.0).unwrap();
        assert_eq!(
            format_result(&result),
            "Dosis por toma: 25.00-37.50 mg\n\
             Tab 500mg\n\
             Frecuencia: Cada 6h\n\
             Duración: 5 días\n\
             Nota: No exceder 5 dosis/día."
        );
    }

    #[test]
    fn single_value_with_volume_for_fixed_liquid() {
        let result = compute_dose("amoxicilina_suspension", 12.0).unwrap();
        let text = result.to_string();
        assert!(text.starts_with("Dosis por toma: 160.00 mg (3.20 ml)\n"));
        assert!(text.contains("Frecuencia: Cada 8h"));
        assert!(text.ends_with("Nota: Completar tratamiento."));
    }

    #[test]
    fn no_note_without_advisory() {
        let result = compute_dose("prednisona", 10.0).unwrap();
        assert!(!format_result(&result).contains("Nota:"));
    }

    #[test]
    fn explanation_walks_through_each_step() {
        let result = compute_dose("ibuprofeno_suspension", 15.0).unwrap();
        let text = explain(&result);
        assert!(text.contains("1. Peso del paciente: 15 kg"));
        assert!(text.contains("2. Rango de dosis diaria: 5-10 mg/kg/día"));
        assert!(text.contains("3. Dosis diaria total: 75.00-150.00 mg"));
        assert!(text.contains("4. Tomas por día: 3 (Cada 6-8h)"));
        assert!(text.contains("   - Dosis por toma: 25.00-50.00 mg"));
        assert!(text.contains("6. Conversión a ml: (dosis en mg x 5) / 100"));
        assert!(text.contains("   - Resultado: 1.25-2.50 ml"));
    }

    #[test]
    fn explanation_skips_conversion_for_solids() {
        let result = compute_dose("omeprazol", 20.0).unwrap();
        assert!(!explain(&result).contains("Conversión a ml"));
    }
}
