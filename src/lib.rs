//! Hospital Match - symptom-driven hospital matching and ranking
//!
//! Given free-text symptoms and optional location hints, this library infers
//! candidate medical specialties and ranks a static facility catalog so the
//! most clinically and geographically appropriate hospital comes first.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{Matcher, rank_facilities, distance::haversine_distance};
pub use models::{Coordinates, FacilityRecord, MatchRequest, MatchResponse, RankingQuery, ScoredCandidate};
pub use services::{Catalog, CatalogSource, HospitalMatchService, SpecialtyResolver, TriageTable};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let distance = haversine_distance(12.5218, 76.8951, 12.5843, 77.0436);
        assert!(distance > 10.0 && distance < 25.0);
    }
}
