use serde::{Deserialize, Serialize};

/// A validated latitude/longitude pair in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Returns `None` for non-finite or out-of-range values.
    pub fn new(latitude: f64, longitude: f64) -> Option<Self> {
        let valid = latitude.is_finite()
            && longitude.is_finite()
            && (-90.0..=90.0).contains(&latitude)
            && (-180.0..=180.0).contains(&longitude);
        valid.then_some(Self { latitude, longitude })
    }

    /// Build from two optional halves; both must be present.
    pub fn from_parts(latitude: Option<f64>, longitude: Option<f64>) -> Option<Self> {
        Self::new(latitude?, longitude?)
    }
}

/// One row of the static facility catalog
#[derive(Debug, Clone, PartialEq)]
pub struct FacilityRecord {
    pub id: String,
    pub name: String,
    pub district: String,
    /// Taluk
    pub sub_district: String,
    pub coordinates: Option<Coordinates>,
    pub primary_specialty: String,
    /// Comma-separated, matched by substring
    pub specialty_list: String,
    pub total_beds: u32,
    pub icu_beds: u32,
    pub oxygen_beds: u32,
}

impl FacilityRecord {
    /// Facilities with no reported capacity are never shown
    #[inline]
    pub fn has_capacity(&self) -> bool {
        self.icu_beds > 0 || self.total_beds > 0
    }
}

/// One row of the local symptom triage dataset
#[derive(Debug, Clone, PartialEq)]
pub struct TriageRow {
    pub symptom: String,
    pub district: String,
    pub mapped_specialty: String,
    pub advice: String,
}

/// A facility scored against a single request
#[derive(Debug, Clone)]
pub struct ScoredCandidate<'a> {
    pub facility: &'a FacilityRecord,
    pub specialty_score: u32,
    pub location_score: u32,
    pub total_score: u32,
    /// `None` when either endpoint has no coordinate
    pub distance_km: Option<f64>,
}

impl ScoredCandidate<'_> {
    #[inline]
    pub fn has_specialty(&self) -> bool {
        self.specialty_score > 0
    }

    /// Sort key for distance: unknown sorts after every known value.
    #[inline]
    pub fn distance_key(&self) -> f64 {
        self.distance_km.unwrap_or(f64::INFINITY)
    }
}

/// Location hints and origin used to rank the catalog
#[derive(Debug, Clone, Default)]
pub struct RankingQuery {
    pub specialties: Vec<String>,
    pub district: Option<String>,
    pub sub_district: Option<String>,
    pub origin: Option<Coordinates>,
}

/// Facility as returned to callers
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FacilityOutputRecord {
    pub id: String,
    pub name: String,
    pub district: String,
    #[serde(rename = "subDistrict")]
    pub sub_district: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[serde(rename = "primarySpecialty")]
    pub primary_specialty: String,
    #[serde(rename = "specialtyList")]
    pub specialty_list: String,
    #[serde(rename = "totalBeds")]
    pub total_beds: u32,
    #[serde(rename = "icuBeds")]
    pub icu_beds: u32,
    #[serde(rename = "oxygenBeds")]
    pub oxygen_beds: u32,
    /// One decimal place, or empty when unknown
    #[serde(rename = "distanceKm")]
    pub distance_km: String,
}

impl From<&ScoredCandidate<'_>> for FacilityOutputRecord {
    fn from(candidate: &ScoredCandidate<'_>) -> Self {
        let facility = candidate.facility;
        Self {
            id: facility.id.clone(),
            name: facility.name.clone(),
            district: facility.district.clone(),
            sub_district: facility.sub_district.clone(),
            latitude: facility.coordinates.map(|c| c.latitude),
            longitude: facility.coordinates.map(|c| c.longitude),
            primary_specialty: facility.primary_specialty.clone(),
            specialty_list: facility.specialty_list.clone(),
            total_beds: facility.total_beds,
            icu_beds: facility.icu_beds,
            oxygen_beds: facility.oxygen_beds,
            distance_km: format_distance(candidate.distance_km),
        }
    }
}

pub fn format_distance(distance_km: Option<f64>) -> String {
    match distance_km {
        Some(d) if d.is_finite() => format!("{:.1}", d),
        _ => String::new(),
    }
}
