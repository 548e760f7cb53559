// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Coordinates, FacilityRecord, FacilityOutputRecord, RankingQuery, ScoredCandidate, TriageRow};
pub use requests::MatchRequest;
pub use responses::{MatchResponse, HealthResponse, ErrorResponse};
