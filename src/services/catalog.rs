use crate::core::distance::parse_coordinates;
use crate::models::FacilityRecord;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};
use thiserror::Error;

/// Errors that can occur while loading a tabular dataset
///
/// All of these are configuration errors: they are raised at startup and the
/// matching capability is unavailable until the dataset is fixed.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to open dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Dataset has no data rows: {0}")]
    Empty(String),
}

/// Raw catalog row, keyed by trimmed header names. Missing columns default to empty.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CatalogRow {
    #[serde(rename = "Hospital_ID")]
    id: String,
    #[serde(rename = "Hospital_Name")]
    name: String,
    #[serde(rename = "District")]
    district: String,
    #[serde(rename = "Taluk")]
    taluk: String,
    #[serde(rename = "Latitude")]
    latitude: String,
    #[serde(rename = "Longitude")]
    longitude: String,
    #[serde(rename = "Primary_Specialization")]
    primary_specialization: String,
    #[serde(rename = "Specializations_List")]
    specializations_list: String,
    #[serde(rename = "Total_Beds")]
    total_beds: String,
    #[serde(rename = "ICU_Beds")]
    icu_beds: String,
    #[serde(rename = "Oxygen_Beds")]
    oxygen_beds: String,
}

impl From<CatalogRow> for FacilityRecord {
    fn from(row: CatalogRow) -> Self {
        FacilityRecord {
            coordinates: parse_coordinates(&row.latitude, &row.longitude),
            total_beds: parse_count(&row.total_beds),
            icu_beds: parse_count(&row.icu_beds),
            oxygen_beds: parse_count(&row.oxygen_beds),
            id: row.id,
            name: row.name,
            district: row.district,
            sub_district: row.taluk,
            primary_specialty: row.primary_specialization,
            specialty_list: row.specializations_list,
        }
    }
}

/// Parse a bed count, defaulting to 0 for anything unparseable or negative
pub fn parse_count(value: &str) -> u32 {
    let value = value.trim();
    if let Ok(n) = value.parse::<u32>() {
        return n;
    }
    match value.parse::<f64>() {
        Ok(n) if n.is_finite() && n >= 0.0 => n.min(u32::MAX as f64) as u32,
        _ => 0,
    }
}

/// Build a CSV reader with trimmed headers and fields, tolerant of short rows
pub(crate) fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader)
}

pub(crate) fn open_dataset(path: &Path) -> Result<File, CatalogError> {
    File::open(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Immutable in-memory facility catalog
#[derive(Debug, Clone)]
pub struct Catalog {
    facilities: Vec<FacilityRecord>,
}

impl Catalog {
    /// Build a catalog from records already in memory (fixtures, tests)
    pub fn new(facilities: Vec<FacilityRecord>) -> Self {
        Self { facilities }
    }

    /// Load the catalog from a CSV file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let catalog = Self::from_reader(open_dataset(path)?).map_err(|e| match e {
            CatalogError::Empty(_) => CatalogError::Empty(path.display().to_string()),
            other => other,
        })?;

        tracing::info!("Loaded {} facilities from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    /// Parse a catalog from any CSV source with a header row
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let mut reader = csv_reader(reader);
        let mut facilities = Vec::new();

        for row in reader.deserialize::<CatalogRow>() {
            facilities.push(FacilityRecord::from(row?));
        }

        if facilities.is_empty() {
            return Err(CatalogError::Empty("<reader>".to_string()));
        }

        let missing_coordinates = facilities.iter().filter(|f| f.coordinates.is_none()).count();
        if missing_coordinates > 0 {
            tracing::debug!("{} facilities have no usable coordinates", missing_coordinates);
        }

        let mut seen = HashSet::new();
        for facility in &facilities {
            if !seen.insert(facility.id.as_str()) {
                tracing::warn!("Duplicate facility id in catalog: {}", facility.id);
            }
        }

        Ok(Self { facilities })
    }

    pub fn facilities(&self) -> &[FacilityRecord] {
        &self.facilities
    }

    pub fn len(&self) -> usize {
        self.facilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facilities.is_empty()
    }
}

/// Memoizing catalog loader
///
/// The first successful [`CatalogSource::load`] parses the file; later calls
/// return the same shared catalog. Readers only ever see a fully built
/// catalog. Failures are not cached.
#[derive(Debug)]
pub struct CatalogSource {
    path: PathBuf,
    loaded: OnceLock<Arc<Catalog>>,
}

impl CatalogSource {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            loaded: OnceLock::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Arc<Catalog>, CatalogError> {
        if let Some(catalog) = self.loaded.get() {
            return Ok(Arc::clone(catalog));
        }

        let catalog = Arc::new(Catalog::load(&self.path)?);
        // A concurrent loader may have won the race; keep whichever landed first.
        Ok(Arc::clone(self.loaded.get_or_init(|| catalog)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Hospital_ID , Hospital_Name,District,Taluk,Latitude,Longitude,Primary_Specialization,Specializations_List,Total_Beds,ICU_Beds,Oxygen_Beds
KA001,Maddur Taluk Hospital,Mandya,Maddur,12.5843,77.0436,General Medicine,\"General Medicine, Pediatrics\",60,4,12
KA002,Sri Ranga Heart Centre,Mandya,Srirangapatna,,,Cardiology,Cardiology,abc,3,
";

    #[test]
    fn test_parses_rows_by_header() {
        let catalog = Catalog::from_reader(SAMPLE.as_bytes()).unwrap();

        assert_eq!(catalog.len(), 2);
        let first = &catalog.facilities()[0];
        assert_eq!(first.id, "KA001");
        assert_eq!(first.sub_district, "Maddur");
        assert_eq!(first.specialty_list, "General Medicine, Pediatrics");
        assert_eq!((first.total_beds, first.icu_beds, first.oxygen_beds), (60, 4, 12));
        assert!(first.coordinates.is_some());
    }

    #[test]
    fn test_missing_values_default() {
        let catalog = Catalog::from_reader(SAMPLE.as_bytes()).unwrap();
        let second = &catalog.facilities()[1];

        assert!(second.coordinates.is_none(), "blank coordinates must not become 0/0");
        assert_eq!(second.total_beds, 0);
        assert_eq!(second.icu_beds, 3);
        assert_eq!(second.oxygen_beds, 0);
    }

    #[test]
    fn test_header_only_is_empty_error() {
        let header = "Hospital_ID,Hospital_Name,District,Taluk\n";
        assert!(matches!(
            Catalog::from_reader(header.as_bytes()),
            Err(CatalogError::Empty(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let source = CatalogSource::new("does/not/exist.csv");
        assert!(matches!(source.load(), Err(CatalogError::Io { .. })));
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("12"), 12);
        assert_eq!(parse_count(" 7 "), 7);
        assert_eq!(parse_count("12.0"), 12);
        assert_eq!(parse_count("-4"), 0);
        assert_eq!(parse_count(""), 0);
        assert_eq!(parse_count("n/a"), 0);
    }
}
