use std::sync::Arc;

use thiserror::Error;
use validator::Validate;

use crate::core::{filters::apply_limit, Matcher};
use crate::models::{FacilityOutputRecord, MatchRequest, MatchResponse, RankingQuery};
use crate::services::specialty::{merge_specialties, SpecialtyInference, SpecialtyResolver};
use crate::services::triage::TriageTable;

/// Errors returned to callers of [`HospitalMatchService::match_facilities`]
///
/// These are all caller input errors. Zero matches is a successful, empty
/// result, and inference failures are recovered internally.
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("Validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Symptoms → specialties → ranked facilities
pub struct HospitalMatchService<I> {
    matcher: Matcher,
    triage: Arc<TriageTable>,
    resolver: SpecialtyResolver<I>,
}

impl<I: SpecialtyInference + Clone + 'static> HospitalMatchService<I> {
    pub fn new(matcher: Matcher, triage: Arc<TriageTable>, resolver: SpecialtyResolver<I>) -> Self {
        Self {
            matcher,
            triage,
            resolver,
        }
    }

    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    /// Match facilities for a request
    ///
    /// 1. Validate input (non-blank symptoms, coordinate ranges)
    /// 2. Local triage lookup keyed by district
    /// 3. Bounded external inference, heuristic on failure
    /// 4. Union specialties and rank the catalog
    /// 5. Truncate to `max_results`
    pub async fn match_facilities(&self, request: &MatchRequest) -> Result<MatchResponse, MatchError> {
        request.validate()?;
        let symptoms_text = request.symptoms_text.as_str();
        if symptoms_text.trim().is_empty() {
            return Err(MatchError::InvalidInput(
                "Field 'symptomsText' must not be blank".to_string(),
            ));
        }

        if let Some(urgency) = request.urgency {
            tracing::debug!("Urgency {} supplied (informational only)", urgency);
        }

        let lookup = self.triage.lookup(symptoms_text, request.district.as_deref());
        let inferred = self.resolver.resolve(symptoms_text).await;
        let specialties = merge_specialties([lookup.specialties, inferred]);

        let query = RankingQuery {
            specialties: specialties.clone(),
            district: request.district.clone(),
            sub_district: request.sub_district.clone(),
            origin: request.origin(),
        };

        let ranked = self.matcher.rank(&query);
        let total_matches = ranked.len();
        let facilities: Vec<FacilityOutputRecord> = apply_limit(ranked, request.max_results)
            .iter()
            .map(FacilityOutputRecord::from)
            .collect();

        tracing::info!(
            "Matched {} facilities (returning {}) for specialties {:?}",
            total_matches,
            facilities.len(),
            specialties
        );

        Ok(MatchResponse {
            specialties,
            guidance: lookup.guidance,
            facilities,
            total_matches,
        })
    }
}
