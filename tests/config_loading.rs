use std::fs;
use std::path::Path;

use dosis::config::{load_config, LogFormat};
use dosis::{CalculationRequest, DosageCalculator, DosageError, Formulary, Formulation, Frequency};
use tempfile::TempDir;

const PRACTICE_TOML: &str = r#"
[log]
level = "info"
format = "json"

[drugs.nistatina_suspension]
name = "Nistatina"
presentation = "Susp 100mg/ml"
min = 2.0
max = 4.0
frequency = "Cada 6h"
duration = "7 días"
concentration = { mg = 100.0, ml = 1.0 }
advisory = "Mantener en boca antes de tragar."

[drugs.paracetamol]
name = "Paracetamol"
presentation = "Tab 500mg"
min = 12
max = 12
frequency = "Cada 8h"
duration = "3 días"
"#;

fn write_config(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

// Environment variables are process-wide, so every layer that reads
// `DOSIS__*` is checked inside this one test.
#[test]
fn explicit_file_and_environment_layers() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "practice.toml", PRACTICE_TOML);

    // The explicit file wins over config/default.toml.
    let config = load_config(Some(&path)).unwrap();
    assert_eq!(config.log.level, "info");
    assert_eq!(config.log.format, LogFormat::Json);

    let references = config.drug_references().unwrap();
    assert_eq!(references.len(), 2);

    let nistatina = &references[0];
    assert_eq!(nistatina.id, "nistatina_suspension");
    assert_eq!(nistatina.frequency, Frequency::Every6h);
    assert_eq!(nistatina.frequency_label, "Cada 6h");
    assert_eq!(
        nistatina.advisory.as_deref(),
        Some("Mantener en boca antes de tragar.")
    );
    match nistatina.form {
        Formulation::Liquid(c) => {
            assert_close(c.mass_mg, 100.0);
            assert_close(c.volume_ml, 1.0);
        }
        Formulation::Solid => panic!("inline concentration was dropped"),
    }
    assert_eq!(references[1].form, Formulation::Solid);

    let standard = Formulary::standard();
    let formulary = standard.with_entries(references).unwrap();
    assert_eq!(formulary.len(), standard.len() + 1);

    let calculator = DosageCalculator::new(&formulary);
    let result = calculator
        .compute(&CalculationRequest::new("nistatina_suspension", 20.0))
        .unwrap();
    assert_close(result.dose.low, 10.0);
    assert_close(result.dose.high, 20.0);
    let volume = result.volume.unwrap();
    assert_close(volume.low, 0.1);
    assert_close(volume.high, 0.2);

    // The configured row replaces the standard paracetamol.
    let result = calculator
        .compute(&CalculationRequest::new("paracetamol", 10.0))
        .unwrap();
    assert_close(result.dose.low, 40.0);
    assert_close(result.dose.high, 40.0);
    assert_eq!(result.duration_label, "3 días");

    // Environment variables win over every file.
    std::env::set_var("DOSIS__LOG__LEVEL", "debug");
    let overridden = load_config(Some(&path));
    std::env::remove_var("DOSIS__LOG__LEVEL");
    let overridden = overridden.unwrap();
    assert_eq!(overridden.log.level, "debug");
    assert_eq!(overridden.log.format, LogFormat::Json);
}

#[test]
fn bad_entry_in_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        "bad.toml",
        r#"
[drugs.nistatina_suspension]
name = "Nistatina"
presentation = "Susp 100mg/ml"
min = 2.0
max = 4.0
frequency = "dos veces por semana"
duration = "7 días"
"#,
    );

    let config = load_config(Some(&path)).unwrap();
    assert_eq!(
        config.drug_references(),
        Err(DosageError::UnrecognizedFrequency(
            "dos veces por semana".into()
        ))
    );
}

#[test]
fn missing_explicit_file_is_an_error() {
    assert!(load_config(Some(Path::new("does/not/exist.toml"))).is_err());
}
