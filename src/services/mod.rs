// Service exports
pub mod catalog;
pub mod groq;
pub mod hospital_match;
pub mod specialty;
pub mod triage;

pub use catalog::{Catalog, CatalogError, CatalogSource};
pub use groq::{GroqClient, InferenceError};
pub use hospital_match::{HospitalMatchService, MatchError};
pub use specialty::{heuristic_specialties, merge_specialties, SpecialtyInference, SpecialtyResolver, SpecialtySource};
pub use triage::{TriageLookup, TriageTable};
