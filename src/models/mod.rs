pub mod dosage;
pub mod drug;

pub use dosage::{CalculationRequest, CalculationResult, DoseRange};
pub use drug::{Concentration, DosingRange, DrugReference, Formulation, Frequency};
