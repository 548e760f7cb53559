use actix_web::{web, HttpResponse, Responder};
use crate::models::{ErrorResponse, HealthResponse, MatchRequest};
use crate::services::{GroqClient, HospitalMatchService};
use std::sync::Arc;
use tracing::Instrument;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<HospitalMatchService<GroqClient>>,
}

/// Configure all hospital-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/hospitals/match", web::post().to(match_hospitals));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let facilities = state.service.matcher().catalog().len();
    let status = if facilities > 0 { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        facilities,
        timestamp: chrono::Utc::now(),
    })
}

/// Match hospitals endpoint
///
/// POST /api/v1/hospitals/match
///
/// Request body:
/// ```json
/// {
///   "symptomsText": "string",
///   "urgency": 3,
///   "district": "string",
///   "taluk": "string",
///   "userLat": 12.52,
///   "userLng": 76.89,
///   "maxResults": 5
/// }
/// ```
async fn match_hospitals(
    state: web::Data<AppState>,
    req: web::Json<MatchRequest>,
) -> impl Responder {
    let request_id = uuid::Uuid::new_v4();
    let span = tracing::info_span!("match_hospitals", %request_id);

    async move {
        tracing::info!(
            "Matching hospitals: district={:?}, subDistrict={:?}, located={}, maxResults={:?}",
            req.district,
            req.sub_district,
            req.origin().is_some(),
            req.max_results
        );

        match state.service.match_facilities(&req).await {
            Ok(response) => HttpResponse::Ok().json(response),
            Err(e) => {
                tracing::info!("Rejected match request: {}", e);
                HttpResponse::BadRequest().json(ErrorResponse {
                    error: "Invalid request".to_string(),
                    message: e.to_string(),
                    status_code: 400,
                })
            }
        }
    }
    .instrument(span)
    .await
}
