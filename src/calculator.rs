//! Weight-based dose calculation.
//!
//! Every calculation is a pure function of the request and the formulary it
//! runs against: nothing is cached or remembered between calls, and a failed
//! attempt leaves the calculator as usable as before.

use tracing::{debug, instrument, warn};

use crate::error::{DosageError, DosageResult};
use crate::formulary::Formulary;
use crate::models::{CalculationRequest, CalculationResult, DoseRange, DrugReference};
use crate::utils::{parse_weight, round2, validate_weight};

/// Calculator bound to a formulary.
#[derive(Debug, Clone, Copy)]
pub struct DosageCalculator<'a> {
    formulary: &'a Formulary,
}

impl Default for DosageCalculator<'static> {
    fn default() -> Self {
        Self::new(Formulary::standard())
    }
}

impl<'a> DosageCalculator<'a> {
    pub fn new(formulary: &'a Formulary) -> Self {
        Self { formulary }
    }

    pub fn formulary(&self) -> &'a Formulary {
        self.formulary
    }

    #[instrument(skip(self, request), fields(drug_id = %request.drug_id, weight_kg = request.patient_weight_kg))]
    pub fn compute(&self, request: &CalculationRequest) -> DosageResult<CalculationResult> {
        let drug = self.lookup(&request.drug_id)?;
        run(drug, request.patient_weight_kg)
    }

    /// Run a calculation straight from the text a weight field holds.
    #[instrument(skip(self))]
    pub fn compute_from_input(
        &self,
        drug_id: &str,
        weight_text: &str,
    ) -> DosageResult<CalculationResult> {
        // The drug is checked first so an empty form reports the missing drug.
        let drug = self.lookup(drug_id)?;
        let weight = parse_weight(weight_text).map_err(|e| {
            warn!("Rejected weight input {:?}", weight_text);
            e
        })?;
        run(drug, weight)
    }

    fn lookup(&self, drug_id: &str) -> DosageResult<&'a DrugReference> {
        if drug_id.trim().is_empty() {
            warn!("Calculation requested without a drug");
            return Err(DosageError::no_drug_selected());
        }
        self.formulary.get(drug_id).ok_or_else(|| {
            warn!(drug_id, "Calculation requested for unknown drug");
            DosageError::unknown_drug(drug_id)
        })
    }
}

fn run(drug: &DrugReference, weight_kg: f64) -> DosageResult<CalculationResult> {
    if let Err(e) = validate_weight(weight_kg) {
        warn!("Rejected weight {}", weight_kg);
        return Err(e);
    }

    let result = calculate(drug, weight_kg);
    if !result_is_finite(&result) {
        warn!("Weight {} overflows the dose calculation", weight_kg);
        return Err(DosageError::weight_out_of_range(weight_kg));
    }

    debug!(
        daily_low = result.daily_dose.low,
        daily_high = result.daily_dose.high,
        doses_per_day = result.doses_per_day,
        dose_low = result.dose.low,
        dose_high = result.dose.high,
        "Dose computed"
    );
    Ok(result)
}

fn result_is_finite(result: &CalculationResult) -> bool {
    let finite = |range: &DoseRange| range.low.is_finite() && range.high.is_finite();
    finite(&result.daily_dose)
        && finite(&result.dose)
        && result.volume.as_ref().map_or(true, finite)
}

fn calculate(drug: &DrugReference, weight_kg: f64) -> CalculationResult {
    let daily_dose = DoseRange::new(
        round2(weight_kg * drug.dosing.min_mg_per_kg_day),
        round2(weight_kg * drug.dosing.max_mg_per_kg_day),
    );

    let doses_per_day = drug.frequency.doses_per_day();
    let per_day = f64::from(doses_per_day);
    let dose = DoseRange::new(
        round2(daily_dose.low / per_day),
        round2(daily_dose.high / per_day),
    );

    let concentration = drug.form.concentration().copied();
    let volume = concentration.map(|c| {
        DoseRange::new(round2(c.volume_for(dose.low)), round2(c.volume_for(dose.high)))
    });

    CalculationResult {
        drug_id: drug.id.clone(),
        display_name: drug.display_name.clone(),
        patient_weight_kg: weight_kg,
        dosing: drug.dosing,
        frequency: drug.frequency,
        doses_per_day,
        daily_dose,
        dose,
        volume,
        concentration,
        presentation: drug.presentation.clone(),
        frequency_label: drug.frequency_label.clone(),
        duration_label: drug.duration_label.clone(),
        advisory: drug.advisory.clone(),
    }
}

/// Compute the per-administration dose against the standard formulary.
pub fn compute_dose(drug_id: &str, patient_weight_kg: f64) -> DosageResult<CalculationResult> {
    DosageCalculator::default().compute(&CalculationRequest::new(drug_id, patient_weight_kg))
}

/// Like [`compute_dose`], taking the weight as typed by the user.
pub fn compute_dose_from_input(drug_id: &str, weight_text: &str) -> DosageResult<CalculationResult> {
    DosageCalculator::default().compute_from_input(drug_id, weight_text)
}
