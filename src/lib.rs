//! Dosis pediatric dosage calculator core library
//!
//! This module exports the drug formulary, the weight-based dose calculator
//! and the text reports built from its results.

pub mod calculator;
pub mod error;
pub mod formulary;
pub mod models;
pub mod report;
pub mod utils;

pub use calculator::{compute_dose, compute_dose_from_input, DosageCalculator};
pub use error::{DosageError, DosageResult};
pub use formulary::Formulary;
pub use models::{
    CalculationRequest, CalculationResult, Concentration, DoseRange, DosingRange, DrugReference,
    Formulation, Frequency,
};

/// Application configuration
pub mod config {
    use std::collections::BTreeMap;
    use std::path::Path;

    use serde::Deserialize;

    use crate::error::DosageResult;
    use crate::models::{Concentration, DosingRange, DrugReference, Formulation, Frequency};

    #[derive(Debug, Clone, Default, Deserialize)]
    pub struct Config {
        #[serde(default)]
        pub log: LogConfig,
        /// Practice-specific formulary entries keyed by drug id.
        #[serde(default)]
        pub drugs: BTreeMap<String, DrugEntryConfig>,
    }

    #[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum LogFormat {
        #[default]
        Pretty,
        Json,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct LogConfig {
        #[serde(default = "default_log_level")]
        pub level: String,
        #[serde(default)]
        pub format: LogFormat,
    }

    impl Default for LogConfig {
        fn default() -> Self {
            Self {
                level: default_log_level(),
                format: LogFormat::default(),
            }
        }
    }

    fn default_log_level() -> String {
        "warn".to_string()
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ConcentrationConfig {
        pub mg: f64,
        pub ml: f64,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct DrugEntryConfig {
        pub name: String,
        pub presentation: String,
        pub min: f64,
        pub max: f64,
        pub frequency: String,
        pub duration: String,
        pub concentration: Option<ConcentrationConfig>,
        pub advisory: Option<String>,
    }

    impl DrugEntryConfig {
        /// Turn a configured entry into a reference row. The frequency label
        /// must name a known interval.
        pub fn to_reference(&self, id: &str) -> DosageResult<DrugReference> {
            let frequency = Frequency::from_label(&self.frequency)?;
            let reference = DrugReference {
                id: id.to_string(),
                display_name: self.name.clone(),
                presentation: self.presentation.clone(),
                dosing: DosingRange::new(self.min, self.max),
                frequency,
                frequency_label: self.frequency.clone(),
                duration_label: self.duration.clone(),
                form: match &self.concentration {
                    Some(c) => Formulation::Liquid(Concentration::new(c.mg, c.ml)),
                    None => Formulation::Solid,
                },
                advisory: self.advisory.clone(),
            };
            reference.validate()?;
            Ok(reference)
        }
    }

    impl Config {
        pub fn drug_references(&self) -> DosageResult<Vec<DrugReference>> {
            self.drugs
                .iter()
                .map(|(id, entry)| entry.to_reference(id))
                .collect()
        }
    }

    /// Load configuration from file
    ///
    /// Layers, later ones winning: `config/default`, `config/<DOSIS_ENV>`,
    /// the optional explicit file, then `DOSIS__*` environment variables.
    pub fn load_config(explicit: Option<&Path>) -> Result<Config, config::ConfigError> {
        // Start with default settings
        let mut builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false));

        // Override with environment-specific settings
        let env = std::env::var("DOSIS_ENV").unwrap_or_else(|_| "development".into());
        builder = builder.add_source(config::File::with_name(&format!("config/{}", env)).required(false));

        if let Some(path) = explicit {
            builder = builder.add_source(config::File::from(path));
        }

        // Override with environment variables
        builder = builder.add_source(
            config::Environment::with_prefix("DOSIS")
                .prefix_separator("__")
                .separator("__"),
        );

        builder.build()?.try_deserialize()
    }

}
