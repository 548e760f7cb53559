use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use validator::Validate;

use crate::models::domain::Coordinates;

/// Request to match facilities
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct MatchRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "symptoms_text", rename = "symptomsText")]
    pub symptoms_text: String,
    /// Accepted but does not influence filtering or ranking
    #[serde(default)]
    pub urgency: Option<i64>,
    #[serde(default)]
    pub district: Option<String>,
    #[serde(default, alias = "taluk", alias = "sub_district", rename = "subDistrict")]
    pub sub_district: Option<String>,
    #[validate(range(min = -90.0, max = 90.0))]
    #[serde(default, alias = "user_lat", rename = "userLat", deserialize_with = "lenient_f64")]
    pub user_lat: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0))]
    #[serde(default, alias = "user_lng", rename = "userLng", deserialize_with = "lenient_f64")]
    pub user_lng: Option<f64>,
    #[serde(default, alias = "max_results", rename = "maxResults")]
    pub max_results: Option<usize>,
}

impl MatchRequest {
    pub fn new(symptoms_text: impl Into<String>) -> Self {
        Self {
            symptoms_text: symptoms_text.into(),
            ..Default::default()
        }
    }

    /// User location, present only when both halves are
    pub fn origin(&self) -> Option<Coordinates> {
        Coordinates::from_parts(self.user_lat, self.user_lng)
    }
}

/// Accept a JSON number or a numeric string; blank strings and null mean absent
fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let number = match value {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) if s.trim().is_empty() => return Ok(None),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(other) => {
            return Err(serde::de::Error::custom(format!(
                "expected a number, got {}",
                other
            )))
        }
    };

    match number {
        Some(n) if n.is_finite() => Ok(Some(n)),
        _ => Err(serde::de::Error::custom("coordinate is not a finite number")),
    }
}
