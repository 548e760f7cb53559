use actix_cors::Cors;
use actix_web::{web, App, HttpServer, HttpResponse, middleware, error, http::StatusCode};
use hospital_match::config::{LogFormat, Settings};
use hospital_match::core::Matcher;
use hospital_match::routes::{self, hospitals::AppState};
use hospital_match::services::{
    CatalogSource, GroqClient, HospitalMatchService, SpecialtyResolver, TriageTable,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, error, warn};
use tracing_subscriber::EnvFilter;

/// Transport ceiling for inference requests; the resolver timeout is shorter
const INFERENCE_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// JSON error response for JSON payload errors
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST))
            .json(self)
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

fn io_error(message: String) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::Other, message)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Load configuration before logging so the [logging] section applies
    let settings = Settings::load()
        .map_err(|e| io_error(format!("Configuration error: {}", e)))?;

    // Initialize logging (LOG_LEVEL / LOG_FORMAT override the config file)
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| settings.logging.level.clone());
    let log_format = std::env::var("LOG_FORMAT")
        .map(|f| LogFormat::parse(&f))
        .unwrap_or_else(|_| settings.logging.log_format());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&log_level).unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_level(true);

    match log_format {
        LogFormat::Json => subscriber.json().init(),
        LogFormat::Pretty => subscriber.pretty().init(),
        LogFormat::Compact => subscriber.compact().init(),
    }

    info!("Starting hospital matching service...");

    // Datasets are loaded once and shared read-only; a bad dataset is fatal
    let catalog_source = CatalogSource::new(&settings.data.catalog_path);
    let catalog = catalog_source.load().map_err(|e| {
        error!("Failed to load facility catalog from {}: {}", catalog_source.path().display(), e);
        io_error(format!("Catalog error: {}", e))
    })?;

    let triage = TriageTable::load(&settings.data.triage_path).map_err(|e| {
        error!("Failed to load symptom triage dataset: {}", e);
        io_error(format!("Triage dataset error: {}", e))
    })?;

    // External inference is optional - without a key the heuristic is used
    let inference = match settings.inference.api_key() {
        Some(api_key) => match GroqClient::new(
            settings.inference.endpoint.clone(),
            api_key.to_string(),
            settings.inference.model.clone(),
            INFERENCE_REQUEST_TIMEOUT,
        ) {
            Ok(client) => {
                info!("Specialty inference enabled (model: {})", client.model());
                Some(client)
            }
            Err(e) => {
                warn!("Specialty inference disabled: {}", e);
                None
            }
        },
        None => {
            warn!("No inference API key configured, using keyword heuristic only");
            None
        }
    };

    let resolver = SpecialtyResolver::new(
        inference,
        Duration::from_millis(settings.inference.timeout_ms),
    );

    let service = HospitalMatchService::new(Matcher::new(catalog), Arc::new(triage), resolver);

    let app_state = AppState {
        service: Arc::new(service),
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
