use std::future::Future;
use std::time::Duration;

use crate::services::groq::InferenceError;

/// Always included in heuristic output
pub const GENERAL_MEDICINE: &str = "General Medicine";
/// Upper bound on specialties from a single inference source
pub const MAX_SPECIALTIES: usize = 4;
/// Default bound on the external inference call
pub const DEFAULT_INFERENCE_TIMEOUT: Duration = Duration::from_millis(6000);

/// Phrase sets checked in order against lowercased symptom text
const KEYWORD_RULES: &[(&str, &[&str])] = &[
    ("Cardiology", &["chest pain", "heart attack", "palpitation", "cardiac"]),
    ("Pulmonology", &["breath", "breathing", "asthma", "lung"]),
    ("Neurology", &["stroke", "paralysis", "seizure", "fit", "weakness on one side"]),
    ("Orthopedics", &["fracture", "broken bone", "joint pain", "back pain"]),
    ("Dermatology", &["skin", "rash", "allergy"]),
    ("ENT", &["ear", "nose", "throat", "sinus"]),
    ("OBG", &["pregnan", "delivery", "labour"]),
    ("Endocrinology", &["sugar", "diabetes", "thyroid"]),
    ("Nephrology", &["kidney", "dialysis", "creatinine"]),
    ("Urology", &["urine", "urinary", "prostate"]),
    ("Pediatrics", &["child", "kid", "baby", "infant"]),
    ("Oncology", &["cancer", "tumor", "chemotherapy"]),
    (
        "Gastroenterology",
        &["stomach", "abdomen", "vomit", "loose motion", "diarrhoea", "diarrhea"],
    ),
];

/// Deterministic keyword classifier used whenever external inference is unusable
///
/// Returns at most [`MAX_SPECIALTIES`] names, the last of which is always
/// General Medicine.
pub fn heuristic_specialties(symptoms_text: &str) -> Vec<String> {
    let text = symptoms_text.to_lowercase();

    let mut specialties: Vec<String> = if text.trim().is_empty() {
        Vec::new()
    } else {
        KEYWORD_RULES
            .iter()
            .filter(|(_, phrases)| phrases.iter().any(|p| text.contains(p)))
            .map(|(specialty, _)| specialty.to_string())
            .take(MAX_SPECIALTIES - 1)
            .collect()
    };

    specialties.push(GENERAL_MEDICINE.to_string());
    specialties
}

/// Union specialty lists, keeping first-seen spelling, case-insensitively
pub fn merge_specialties<I>(sources: I) -> Vec<String>
where
    I: IntoIterator<Item = Vec<String>>,
{
    let mut merged: Vec<String> = Vec::new();
    for specialty in sources.into_iter().flatten() {
        let trimmed = specialty.trim();
        if trimmed.is_empty() {
            continue;
        }
        if !merged.iter().any(|m| m.to_lowercase() == trimmed.to_lowercase()) {
            merged.push(trimmed.to_string());
        }
    }
    merged
}

/// External specialty inference capability
///
/// Implementations return 1..=4 specialty names or an error. The resolver
/// never surfaces these errors to callers.
pub trait SpecialtyInference: Send + Sync {
    fn infer(
        &self,
        symptoms_text: &str,
    ) -> impl Future<Output = Result<Vec<String>, InferenceError>> + Send;
}

/// Where the resolved specialties came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialtySource {
    External,
    Heuristic,
}

/// Bounded-wait specialty inference with a deterministic fallback
///
/// The external call runs as its own task and only the wait on it is bounded.
/// When the timer wins, the call is left to finish in the background and its
/// result is discarded. There is exactly one attempt per request.
#[derive(Debug, Clone)]
pub struct SpecialtyResolver<I> {
    inference: Option<I>,
    timeout: Duration,
}

impl<I: SpecialtyInference + Clone + 'static> SpecialtyResolver<I> {
    pub fn new(inference: Option<I>, timeout: Duration) -> Self {
        Self { inference, timeout }
    }

    /// Resolver that only ever uses the heuristic
    pub fn heuristic_only() -> Self {
        Self::new(None, DEFAULT_INFERENCE_TIMEOUT)
    }

    pub async fn resolve(&self, symptoms_text: &str) -> Vec<String> {
        self.resolve_with_source(symptoms_text).await.0
    }

    pub async fn resolve_with_source(&self, symptoms_text: &str) -> (Vec<String>, SpecialtySource) {
        let Some(inference) = &self.inference else {
            return (heuristic_specialties(symptoms_text), SpecialtySource::Heuristic);
        };

        let inference = inference.clone();
        let text = symptoms_text.to_string();
        let call = tokio::spawn(async move { inference.infer(&text).await });

        match tokio::time::timeout(self.timeout, call).await {
            Ok(Ok(Ok(specialties))) => match validate_inferred(specialties) {
                Some(valid) => return (valid, SpecialtySource::External),
                None => tracing::warn!("Specialty inference returned no usable names, using heuristic"),
            },
            Ok(Ok(Err(e))) => {
                tracing::warn!("Specialty inference failed, using heuristic: {}", e);
            }
            Ok(Err(e)) => {
                tracing::warn!("Specialty inference task aborted, using heuristic: {}", e);
            }
            Err(_) => {
                tracing::warn!(
                    "Specialty inference timed out after {}ms, using heuristic",
                    self.timeout.as_millis()
                );
            }
        }

        (heuristic_specialties(symptoms_text), SpecialtySource::Heuristic)
    }
}

/// Drop blank names and cap the list; an empty result is invalid.
fn validate_inferred(specialties: Vec<String>) -> Option<Vec<String>> {
    let cleaned: Vec<String> = specialties
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .take(MAX_SPECIALTIES)
        .collect();

    (!cleaned.is_empty()).then_some(cleaned)
}
