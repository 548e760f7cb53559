use crate::core::text::{eq_ci, normalize, normalize_hint};
use crate::models::TriageRow;
use crate::services::catalog::{csv_reader, open_dataset, CatalogError};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

/// Points when the query text and a row's symptom phrase contain one another
const SYMPTOM_OVERLAP_POINTS: u32 = 2;
/// Points when the supplied district equals the row's district
const DISTRICT_MATCH_POINTS: u32 = 2;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawTriageRow {
    #[serde(rename = "Symptom")]
    symptom: String,
    #[serde(rename = "District")]
    district: String,
    #[serde(rename = "Mapped_Specializations")]
    mapped_specializations: String,
    #[serde(rename = "Triage_Steps")]
    triage_steps: String,
}

impl From<RawTriageRow> for TriageRow {
    fn from(row: RawTriageRow) -> Self {
        TriageRow {
            symptom: row.symptom,
            district: row.district,
            mapped_specialty: row.mapped_specializations,
            advice: row.triage_steps,
        }
    }
}

/// Result of a local triage lookup
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriageLookup {
    /// Mapped specialties of every row that scored, in dataset order
    pub specialties: Vec<String>,
    /// Advice from the single best-scoring row (first seen wins ties)
    pub guidance: Option<String>,
}

/// Local symptom → specialty table keyed by district
#[derive(Debug, Clone, Default)]
pub struct TriageTable {
    rows: Vec<TriageRow>,
}

impl TriageTable {
    pub fn new(rows: Vec<TriageRow>) -> Self {
        Self { rows }
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let table = Self::from_reader(open_dataset(path)?)?;
        if table.rows.is_empty() {
            return Err(CatalogError::Empty(path.display().to_string()));
        }

        tracing::info!("Loaded {} triage rows from {}", table.len(), path.display());
        Ok(table)
    }

    /// Parse rows from a CSV source; an empty table is allowed here
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let mut reader = csv_reader(reader);
        let rows = reader
            .deserialize::<RawTriageRow>()
            .map(|row| row.map(TriageRow::from))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { rows })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Look up specialties and advice for free-text symptoms
    ///
    /// Scoring per row:
    /// - +2 if the text and the row's symptom phrase contain one another
    /// - +2 if `district` equals the row's district
    ///
    /// Rows scoring zero are ignored.
    pub fn lookup(&self, symptoms_text: &str, district: Option<&str>) -> TriageLookup {
        let text = symptoms_text.to_lowercase();
        let target_district = normalize_hint(district);

        let mut result = TriageLookup::default();
        let mut best_score = 0;

        for row in &self.rows {
            let symptom = normalize(&row.symptom);
            if symptom.is_empty() {
                continue;
            }

            let mut score = 0;
            if text.contains(&symptom) || symptom.contains(&text) {
                score += SYMPTOM_OVERLAP_POINTS;
            }
            if target_district
                .as_deref()
                .is_some_and(|d| eq_ci(&row.district, d))
            {
                score += DISTRICT_MATCH_POINTS;
            }

            if score == 0 {
                continue;
            }

            let mapped = row.mapped_specialty.trim();
            if !mapped.is_empty()
                && !result
                    .specialties
                    .iter()
                    .any(|s| s.eq_ignore_ascii_case(mapped))
            {
                result.specialties.push(mapped.to_string());
            }

            let advice = row.advice.trim();
            if score > best_score && !advice.is_empty() {
                best_score = score;
                result.guidance = Some(advice.to_string());
            }
        }

        result
    }
}
