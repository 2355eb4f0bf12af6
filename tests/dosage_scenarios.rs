use dosis::{
    compute_dose, compute_dose_from_input, report, CalculationRequest, DosageCalculator,
    DosageError, Formulary,
};
use test_case::test_case;

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[test_case("paracetamol", 10.0, 25.0, 37.5 ; "paracetamol every 6h")]
#[test_case("amoxicilina_suspension", 12.0, 160.0, 160.0 ; "amoxicilina fixed every 8h")]
#[test_case("omeprazol", 20.0, 14.0, 30.0 ; "omeprazol once daily")]
#[test_case("azitromicina_suspension", 10.0, 100.0, 100.0 ; "24h label is once daily")]
#[test_case("salbutamol", 20.0, 500.0, 1000.0 ; "ranged 4-6h label")]
#[test_case("cefalexina_suspension", 10.0, 125.0, 250.0 ; "ranged 6-12h label")]
fn per_administration_dose(drug: &str, weight: f64, low: f64, high: f64) {
    let result = compute_dose(drug, weight).unwrap();
    assert_close(result.dose_range_low_mg(), low);
    assert_close(result.dose_range_high_mg(), high);
}

#[test_case("amoxicilina_suspension", 12.0, 3.2, 3.2 ; "amoxicilina")]
#[test_case("ranitidina_suspension", 9.0, 0.6, 1.2 ; "ranitidina one ml reference")]
#[test_case("paracetamol_jarabe", 10.0, 4.17, 6.25 ; "paracetamol syrup")]
fn liquid_volume(drug: &str, weight: f64, low_ml: f64, high_ml: f64) {
    let result = compute_dose(drug, weight).unwrap();
    assert_close(result.volume_range_low_ml().unwrap(), low_ml);
    assert_close(result.volume_range_high_ml().unwrap(), high_ml);
}

#[test_case("" ; "empty selection")]
#[test_case("   " ; "blank selection")]
#[test_case("aspirina" ; "unknown drug")]
fn invalid_drug_selection(drug: &str) {
    assert!(matches!(
        compute_dose(drug, 10.0),
        Err(DosageError::InvalidDrugSelection(_))
    ));
}

#[test_case("0" ; "zero")]
#[test_case("-2" ; "negative")]
#[test_case("" ; "missing")]
#[test_case("peso" ; "not a number")]
fn invalid_weight_text(weight: &str) {
    assert!(matches!(
        compute_dose_from_input("paracetamol", weight),
        Err(DosageError::InvalidWeight(_))
    ));
}

#[test]
fn calculator_recovers_after_rejection() {
    let calculator = DosageCalculator::default();
    assert!(calculator
        .compute(&CalculationRequest::new("paracetamol", 0.0))
        .is_err());
    let result = calculator
        .compute(&CalculationRequest::new("paracetamol", 10.0))
        .unwrap();
    assert_close(result.dose.low, 25.0);
}

#[test]
fn every_listed_drug_can_be_calculated() {
    for id in Formulary::standard().ids() {
        let result = compute_dose(id, 15.0).unwrap();
        assert!(result.dose.low <= result.dose.high, "{id}");
        assert_eq!(
            result.volume.is_some(),
            result.concentration.is_some(),
            "{id}"
        );
    }
}

#[test]
fn reports_render_for_scenarios() {
    let result = compute_dose("amoxicilina_suspension", 12.0).unwrap();
    let summary = report::format_result(&result);
    assert!(summary.contains("160.00 mg (3.20 ml)"));
    assert!(summary.contains("Susp 250mg/5ml"));
    assert!(summary.contains("Duración: 10 días"));

    let explanation = report::explain(&result);
    assert!(explanation.contains("3. Dosis diaria total: 480.00-480.00 mg"));
    assert!(explanation.contains("   - Resultado: 3.20-3.20 ml"));
}

#[test]
fn result_serializes_to_json() {
    let result = compute_dose("omeprazol", 20.0).unwrap();
    let value = serde_json::to_value(&result).unwrap();
    assert_eq!(value["drug_id"], "omeprazol");
    assert_eq!(value["frequency"], "once_daily");
    assert_eq!(value["doses_per_day"], 1);
    assert!(value["volume"].is_null());
}
