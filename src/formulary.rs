//! Reference table of pediatric drugs.
//!
//! The standard table is compiled in and built once per process. Practices
//! can overlay their own entries (loaded from configuration) on a copy of it;
//! the shared table itself is never mutated.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use tracing::{debug, info};

use crate::error::DosageResult;
use crate::models::{Concentration, DosingRange, DrugReference, Formulation, Frequency};

struct Row {
    id: &'static str,
    name: &'static str,
    presentation: &'static str,
    min: f64,
    max: f64,
    frequency: Frequency,
    frequency_label: &'static str,
    duration: &'static str,
    concentration: Option<(f64, f64)>,
    advisory: Option<&'static str>,
}

const STANDARD_ROWS: &[Row] = &[
    Row {
        id: "paracetamol",
        name: "Paracetamol",
        presentation: "Tab 500mg",
        min: 10.0,
        max: 15.0,
        frequency: Frequency::Every6h,
        frequency_label: "Cada 6h",
        duration: "5 días",
        concentration: None,
        advisory: Some("No exceder 5 dosis/día."),
    },
    Row {
        id: "fumarato_ferroso",
        name: "Fumarato Ferroso",
        presentation: "Tab 200mg/66mg Fe elemental",
        min: 6.0,
        max: 10.0,
        frequency: Frequency::OnceDaily,
        frequency_label: "Cada 1d",
        duration: "5 días",
        concentration: None,
        advisory: None,
    },
    Row {
        id: "loratadina",
        name: "Loratadina",
        presentation: "Tab 10mg",
        min: 5.0,
        max: 5.0,
        frequency: Frequency::Every12h,
        frequency_label: "Cada 12h",
        duration: "5 días",
        concentration: None,
        advisory: None,
    },
    Row {
        id: "dimenhidrato",
        name: "Dimenhidrato",
        presentation: "Tab 50mg",
        min: 5.0,
        max: 5.0,
        frequency: Frequency::OnceDaily,
        frequency_label: "Cada 1d",
        duration: "5 días",
        concentration: None,
        advisory: None,
    },
    Row {
        id: "cimetidina",
        name: "Cimetidina",
        presentation: "Tab 200mg",
        min: 20.0,
        max: 30.0,
        frequency: Frequency::OnceDaily,
        frequency_label: "Cada 1d",
        duration: "5 días",
        concentration: None,
        advisory: None,
    },
    Row {
        id: "clorodiaxepoxido",
        name: "Clorodiaxepoxido",
        presentation: "Tab 10mg",
        min: 0.2,
        max: 0.7,
        frequency: Frequency::OnceDaily,
        frequency_label: "Cada 1d",
        duration: "5 días",
        concentration: None,
        advisory: None,
    },
    Row {
        id: "ciproheptadina",
        name: "Ciproheptadina",
        presentation: "Tab 4mg",
        min: 0.125,
        max: 0.125,
        frequency: Frequency::OnceDaily,
        frequency_label: "Cada 1d",
        duration: "5 días",
        concentration: None,
        advisory: None,
    },
    Row {
        id: "prednisona",
        name: "Prednisona",
        presentation: "Tab 5mg",
        min: 1.0,
        max: 2.0,
        frequency: Frequency::OnceDaily,
        frequency_label: "Cada 1d",
        duration: "5 días",
        concentration: None,
        advisory: None,
    },
    Row {
        id: "diazepam",
        name: "Diazepam",
        presentation: "Tab 5mg",
        min: 0.25,
        max: 0.5,
        frequency: Frequency::OnceDaily,
        frequency_label: "Cada 1d",
        duration: "5 días",
        concentration: None,
        advisory: None,
    },
    Row {
        id: "metoclopramida",
        name: "Metoclopramida",
        presentation: "Tab 10mg",
        min: 0.5,
        max: 1.0,
        frequency: Frequency::OnceDaily,
        frequency_label: "Cada 1d",
        duration: "5 días",
        concentration: None,
        advisory: None,
    },
    Row {
        id: "paracetamol_jarabe",
        name: "Paracetamol",
        presentation: "jarabe 120mg/5ml",
        min: 10.0,
        max: 15.0,
        frequency: Frequency::OnceDaily,
        frequency_label: "Cada 1d",
        duration: "5 días",
        concentration: Some((120.0, 5.0)),
        advisory: None,
    },
    Row {
        id: "dipirona",
        name: "Dipirona",
        presentation: "amp 600mg/2cc",
        min: 10.0,
        max: 15.0,
        frequency: Frequency::OnceDaily,
        frequency_label: "Cada 1d",
        duration: "1 días",
        concentration: None,
        advisory: None,
    },
    Row {
        id: "hidrocortisona",
        name: "Hidrocortisona",
        presentation: "Bbo 100mg/2cc",
        min: 5.0,
        max: 10.0,
        frequency: Frequency::OnceDaily,
        frequency_label: "Cada 1d",
        duration: "1 días",
        concentration: None,
        advisory: None,
    },
    Row {
        id: "amoxicilina_suspension",
        name: "Amoxicilina",
        presentation: "Susp 250mg/5ml",
        min: 40.0,
        max: 40.0,
        frequency: Frequency::Every8h,
        frequency_label: "Cada 8h",
        duration: "10 días",
        concentration: Some((250.0, 5.0)),
        advisory: Some("Completar tratamiento."),
    },
    Row {
        id: "ibuprofeno_suspension",
        name: "Ibuprofeno",
        presentation: "Susp 100mg/5ml",
        min: 5.0,
        max: 10.0,
        frequency: Frequency::Every8h,
        frequency_label: "Cada 6-8h",
        duration: "5-7 días",
        concentration: Some((100.0, 5.0)),
        advisory: Some("Tomar con alimentos para evitar irritación gástrica."),
    },
    Row {
        id: "cefalexina_suspension",
        name: "Cefalexina",
        presentation: "Susp 250mg/5ml",
        min: 25.0,
        max: 50.0,
        frequency: Frequency::Every12h,
        frequency_label: "Cada 6-12h",
        duration: "7-14 días",
        concentration: Some((250.0, 5.0)),
        advisory: Some("Completar el curso completo del tratamiento."),
    },
    Row {
        id: "azitromicina_suspension",
        name: "Azitromicina",
        presentation: "Susp 200mg/5ml",
        min: 10.0,
        max: 10.0,
        frequency: Frequency::OnceDaily,
        frequency_label: "Cada 24h",
        duration: "3-5 días",
        concentration: Some((200.0, 5.0)),
        advisory: Some(
            "Tomar con el estómago vacío, una hora antes o dos horas después de las comidas.",
        ),
    },
    Row {
        id: "amoxicilina_clavulanico",
        name: "Amoxicilina/Clavulánico",
        presentation: "Susp 200mg/28.5mg/5ml",
        min: 25.0,
        max: 45.0,
        frequency: Frequency::Every12h,
        frequency_label: "Cada 12h",
        duration: "10 días",
        concentration: Some((200.0, 5.0)),
        advisory: Some("Tomar con comida para mejorar la absorción y reducir molestias estomacales."),
    },
    Row {
        id: "ceftriaxona",
        name: "Ceftriaxona",
        presentation: "Inyectable 250mg",
        min: 50.0,
        max: 75.0,
        frequency: Frequency::OnceDaily,
        frequency_label: "Cada 24h",
        duration: "7-14 días",
        concentration: None,
        advisory: Some("Administrar solo bajo supervisión médica."),
    },
    Row {
        id: "salbutamol",
        name: "Salbutamol",
        presentation: "Aerosol 100mcg/dosis",
        min: 100.0,
        max: 200.0,
        frequency: Frequency::Every6h,
        frequency_label: "Cada 4-6h",
        duration: "Según necesidad",
        concentration: None,
        advisory: Some("Usar según sea necesario y no exceder la dosis máxima diaria."),
    },
    Row {
        id: "loratadina_jarabe",
        name: "Loratadina",
        presentation: "Jarabe 5mg/5ml",
        min: 5.0,
        max: 10.0,
        frequency: Frequency::OnceDaily,
        frequency_label: "Cada 24h",
        duration: "7-10 días",
        concentration: Some((5.0, 5.0)),
        advisory: None,
    },
    Row {
        id: "acetaminofén",
        name: "Acetaminofén",
        presentation: "Tab 500mg",
        min: 10.0,
        max: 15.0,
        frequency: Frequency::Every6h,
        frequency_label: "Cada 6h",
        duration: "5 días",
        concentration: None,
        advisory: Some("No exceder 5 dosis/día."),
    },
    Row {
        id: "eritromicina_suspension",
        name: "Eritromicina",
        presentation: "Susp 200mg/5ml",
        min: 30.0,
        max: 50.0,
        frequency: Frequency::Every8h,
        frequency_label: "Cada 6-8h",
        duration: "7-10 días",
        concentration: Some((200.0, 5.0)),
        advisory: Some("Completar el curso completo del tratamiento."),
    },
    Row {
        id: "metronidazol_suspension",
        name: "Metronidazol",
        presentation: "Susp 125mg/5ml",
        min: 15.0,
        max: 30.0,
        frequency: Frequency::Every8h,
        frequency_label: "Cada 8h",
        duration: "5-7 días",
        concentration: Some((125.0, 5.0)),
        advisory: Some("Evitar el consumo de alcohol durante el tratamiento."),
    },
    Row {
        id: "claritromicina_suspension",
        name: "Claritromicina",
        presentation: "Susp 250mg/5ml",
        min: 15.0,
        max: 15.0,
        frequency: Frequency::Every12h,
        frequency_label: "Cada 12h",
        duration: "7-10 días",
        concentration: Some((250.0, 5.0)),
        advisory: Some("Completar el curso completo del tratamiento."),
    },
    Row {
        id: "omeprazol",
        name: "Omeprazol",
        presentation: "Cap 20mg",
        min: 0.7,
        max: 1.5,
        frequency: Frequency::OnceDaily,
        frequency_label: "Cada 24h",
        duration: "4-8 semanas",
        concentration: None,
        advisory: Some("Tomar antes de las comidas."),
    },
    Row {
        id: "ranitidina_suspension",
        name: "Ranitidina",
        presentation: "Susp 15mg/ml",
        min: 2.0,
        max: 4.0,
        frequency: Frequency::Every12h,
        frequency_label: "Cada 12h",
        duration: "4-8 semanas",
        concentration: Some((15.0, 1.0)),
        advisory: Some("Tomar antes de las comidas."),
    },
];

impl Row {
    fn to_reference(&self) -> DrugReference {
        DrugReference {
            id: self.id.to_string(),
            display_name: self.name.to_string(),
            presentation: self.presentation.to_string(),
            dosing: DosingRange::new(self.min, self.max),
            frequency: self.frequency,
            frequency_label: self.frequency_label.to_string(),
            duration_label: self.duration.to_string(),
            form: match self.concentration {
                Some((mass_mg, volume_ml)) => {
                    Formulation::Liquid(Concentration::new(mass_mg, volume_ml))
                }
                None => Formulation::Solid,
            },
            advisory: self.advisory.map(str::to_string),
        }
    }
}

static STANDARD: Lazy<Formulary> = Lazy::new(|| {
    let formulary = Formulary::from_references(STANDARD_ROWS.iter().map(Row::to_reference));
    debug!(drugs = formulary.len(), "Standard formulary initialised");
    formulary
});

/// Drug references keyed by id, kept in insertion order.
#[derive(Debug, Clone, Default)]
pub struct Formulary {
    entries: Vec<DrugReference>,
    index: HashMap<String, usize>,
}

impl Formulary {
    /// The compiled-in table shared by the whole process.
    pub fn standard() -> &'static Formulary {
        &STANDARD
    }

    fn from_references(references: impl IntoIterator<Item = DrugReference>) -> Self {
        let mut formulary = Formulary::default();
        for reference in references {
            formulary.upsert(reference);
        }
        formulary
    }

    /// Copy of this table with `entries` added, replacing rows with the same id.
    pub fn with_entries(
        &self,
        entries: impl IntoIterator<Item = DrugReference>,
    ) -> DosageResult<Formulary> {
        let mut formulary = self.clone();
        for entry in entries {
            entry.validate()?;
            let replaced = formulary.upsert(entry.clone());
            info!(drug_id = %entry.id, replaced, "Loaded practice formulary entry");
        }
        Ok(formulary)
    }

    fn upsert(&mut self, reference: DrugReference) -> bool {
        match self.index.get(&reference.id) {
            Some(&position) => {
                self.entries[position] = reference;
                true
            }
            None => {
                self.index.insert(reference.id.clone(), self.entries.len());
                self.entries.push(reference);
                false
            }
        }
    }

    pub fn get(&self, drug_id: &str) -> Option<&DrugReference> {
        self.index.get(drug_id).map(|&position| &self.entries[position])
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.id.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &DrugReference> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
