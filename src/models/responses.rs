use serde::{Deserialize, Serialize};
use crate::models::domain::FacilityOutputRecord;

/// Response for the facility match endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResponse {
    /// Union of local lookup and inferred specialties
    pub specialties: Vec<String>,
    /// Advice from the best local triage row
    pub guidance: Option<String>,
    pub facilities: Vec<FacilityOutputRecord>,
    /// Ranked count before `maxResults` truncation
    #[serde(rename = "totalMatches")]
    pub total_matches: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub facilities: usize,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
