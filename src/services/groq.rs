use crate::services::specialty::SpecialtyInference;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_GROQ_ENDPOINT: &str = "https://api.groq.com/openai/v1/chat/completions";
pub const DEFAULT_GROQ_MODEL: &str = "llama-3.1-8b-instant";

const SYSTEM_PROMPT: &str = "You are a triage assistant helping route patients to hospital departments. \
Given a short description of symptoms, infer which medical specialties or departments are most appropriate. \
Use simple names that match common hospital departments, such as: 'Cardiology', 'Pulmonology', 'Neurology', \
'Dermatology', 'Pediatrics', 'Oncology', 'ENT', 'Orthopedics', 'General Medicine', 'General Surgery', \
'Psychiatry', 'Nephrology', 'Urology', 'OBG', 'Endocrinology', 'Gastroenterology', etc. \
Return ONLY JSON with a key 'specialties' which is an array of 1-4 strings. No explanations.";

/// Errors that can occur when calling the specialty inference API
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    #[error("Specialty inference is not configured")]
    NotConfigured,
}

/// Shape the model is asked to return inside the message content
#[derive(Debug, Deserialize)]
struct SpecialtyPayload {
    specialties: Vec<String>,
}

/// Chat-completions client used to infer specialties from symptom text
///
/// No retries: a failed attempt falls through to the local heuristic.
#[derive(Debug, Clone)]
pub struct GroqClient {
    endpoint: String,
    api_key: String,
    model: String,
    client: Client,
}

impl GroqClient {
    /// Create a new client
    ///
    /// `request_timeout` is a transport-level ceiling; the resolver applies its
    /// own, shorter, bound on top.
    pub fn new(
        endpoint: String,
        api_key: String,
        model: String,
        request_timeout: Duration,
    ) -> Result<Self, InferenceError> {
        if api_key.trim().is_empty() {
            return Err(InferenceError::NotConfigured);
        }

        let client = Client::builder().timeout(request_timeout).build()?;

        Ok(Self {
            endpoint,
            api_key,
            model,
            client,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn request_body(&self, symptoms_text: &str) -> Value {
        json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                {
                    "role": "user",
                    "content": format!(
                        "Symptoms: {}\n\nReturn JSON like: {{\"specialties\":[\"Pulmonology\",\"General Medicine\"]}}",
                        symptoms_text
                    ),
                },
            ],
            "temperature": 0.2,
            "response_format": { "type": "json_object" },
        })
    }

    /// Ask the model for specialties
    pub async fn infer_specialties(&self, symptoms_text: &str) -> Result<Vec<String>, InferenceError> {
        tracing::debug!("Requesting specialty inference from {} ({})", self.endpoint, self.model);

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&self.request_body(symptoms_text))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(InferenceError::ApiError(format!(
                "Specialty inference failed: {}",
                response.status()
            )));
        }

        let json: Value = response.json().await?;
        parse_completion(&json)
    }
}

impl SpecialtyInference for GroqClient {
    async fn infer(&self, symptoms_text: &str) -> Result<Vec<String>, InferenceError> {
        self.infer_specialties(symptoms_text).await
    }
}

/// Extract `{"specialties": [...]}` from a chat-completions response
pub fn parse_completion(json: &Value) -> Result<Vec<String>, InferenceError> {
    let content = json
        .pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .ok_or_else(|| InferenceError::InvalidResponse("Missing message content".into()))?;

    let payload: SpecialtyPayload = serde_json::from_str(content)
        .map_err(|e| InferenceError::InvalidResponse(format!("Failed to parse specialties: {}", e)))?;

    if payload.specialties.is_empty() {
        return Err(InferenceError::InvalidResponse("Empty specialties array".into()));
    }

    Ok(payload.specialties)
}
