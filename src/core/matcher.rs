use std::cmp::Ordering;
use std::sync::Arc;

use crate::core::{
    filters::{narrow_by_location, retain_with_capacity},
    scoring::score_facility,
    text::normalize_hint,
};
use crate::models::{FacilityRecord, RankingQuery, ScoredCandidate};
use crate::services::catalog::Catalog;

/// Strict multi-key ordering of candidates, most significant key first
///
/// 1. any specialty match before none
/// 2. ascending distance, unknown last
/// 3. descending total score
/// 4. descending ICU beds, then oxygen beds, then total beds
pub fn compare_candidates(a: &ScoredCandidate<'_>, b: &ScoredCandidate<'_>) -> Ordering {
    b.has_specialty()
        .cmp(&a.has_specialty())
        .then_with(|| a.distance_key().total_cmp(&b.distance_key()))
        .then_with(|| b.total_score.cmp(&a.total_score))
        .then_with(|| b.facility.icu_beds.cmp(&a.facility.icu_beds))
        .then_with(|| b.facility.oxygen_beds.cmp(&a.facility.oxygen_beds))
        .then_with(|| b.facility.total_beds.cmp(&a.facility.total_beds))
}

/// Rank a slice of facilities against a query
///
/// # Pipeline Stages
/// 1. Per-facility specialty/location scoring and distance
/// 2. Bed-capacity filter
/// 3. Progressive sub-district then district narrowing
/// 4. Stable sort by [`compare_candidates`]
///
/// Returns every surviving candidate; truncation is the caller's job.
pub fn rank_facilities<'a>(
    facilities: &'a [FacilityRecord],
    query: &RankingQuery,
) -> Vec<ScoredCandidate<'a>> {
    let district = normalize_hint(query.district.as_deref());
    let sub_district = normalize_hint(query.sub_district.as_deref());

    // Stage 1: score everything
    let mut candidates: Vec<ScoredCandidate<'a>> = facilities
        .iter()
        .map(|facility| {
            score_facility(
                facility,
                &query.specialties,
                district.as_deref(),
                sub_district.as_deref(),
                query.origin,
            )
        })
        .collect();

    // Stage 2: capacity
    retain_with_capacity(&mut candidates);

    // Stage 3: area narrowing
    narrow_by_location(&mut candidates, district.as_deref(), sub_district.as_deref());

    // Stage 4: ordering (sort_by is stable, residual ties keep dataset order)
    candidates.sort_by(compare_candidates);

    candidates
}

/// Ranking engine over a shared, immutable facility catalog
#[derive(Debug, Clone)]
pub struct Matcher {
    catalog: Arc<Catalog>,
}

impl Matcher {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Rank the whole catalog for one request
    pub fn rank(&self, query: &RankingQuery) -> Vec<ScoredCandidate<'_>> {
        rank_facilities(self.catalog.facilities(), query)
    }
}
