use crate::core::{
    distance::distance_between,
    text::{contains_ci, normalize},
};
use crate::models::{Coordinates, FacilityRecord, ScoredCandidate};

/// Points when a requested specialty appears in the primary specialty
pub const PRIMARY_SPECIALTY_POINTS: u32 = 3;
/// Points when a requested specialty appears in the full specialty list
pub const LISTED_SPECIALTY_POINTS: u32 = 1;
pub const DISTRICT_EXACT_POINTS: u32 = 3;
pub const DISTRICT_PARTIAL_POINTS: u32 = 2;
/// Sub-district weighs more than district: it is the finer locality.
pub const SUB_DISTRICT_EXACT_POINTS: u32 = 4;
pub const SUB_DISTRICT_PARTIAL_POINTS: u32 = 3;

/// Score a facility's specialties against the requested ones
///
/// Each requested specialty contributes independently, so a facility whose
/// primary specialty is also repeated in its list earns both bonuses.
pub fn specialty_score(facility: &FacilityRecord, specialties: &[String]) -> u32 {
    specialties
        .iter()
        .map(|needed| {
            let mut score = 0;
            if contains_ci(&facility.primary_specialty, needed) {
                score += PRIMARY_SPECIALTY_POINTS;
            }
            if contains_ci(&facility.specialty_list, needed) {
                score += LISTED_SPECIALTY_POINTS;
            }
            score
        })
        .sum()
}

/// Score one administrative field against an already-normalised hint.
#[inline]
fn area_points(field: &str, hint: Option<&str>, exact: u32, partial: u32) -> u32 {
    let Some(hint) = hint else {
        return 0;
    };
    let field = normalize(field);
    if field == hint {
        exact
    } else if field.contains(hint) {
        partial
    } else {
        0
    }
}

/// Score a facility's location against normalised district/sub-district hints
pub fn location_score(
    facility: &FacilityRecord,
    district: Option<&str>,
    sub_district: Option<&str>,
) -> u32 {
    area_points(
        &facility.district,
        district,
        DISTRICT_EXACT_POINTS,
        DISTRICT_PARTIAL_POINTS,
    ) + area_points(
        &facility.sub_district,
        sub_district,
        SUB_DISTRICT_EXACT_POINTS,
        SUB_DISTRICT_PARTIAL_POINTS,
    )
}

/// Build the per-request candidate for a facility
pub fn score_facility<'a>(
    facility: &'a FacilityRecord,
    specialties: &[String],
    district: Option<&str>,
    sub_district: Option<&str>,
    origin: Option<Coordinates>,
) -> ScoredCandidate<'a> {
    let specialty_score = specialty_score(facility, specialties);
    let location_score = location_score(facility, district, sub_district);

    ScoredCandidate {
        facility,
        specialty_score,
        location_score,
        total_score: specialty_score + location_score,
        distance_km: distance_between(origin, facility.coordinates),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_facility(primary: &str, list: &str, district: &str, taluk: &str) -> FacilityRecord {
        FacilityRecord {
            id: "H1".to_string(),
            name: "Test Hospital".to_string(),
            district: district.to_string(),
            sub_district: taluk.to_string(),
            coordinates: Coordinates::new(12.52, 76.89),
            primary_specialty: primary.to_string(),
            specialty_list: list.to_string(),
            total_beds: 50,
            icu_beds: 5,
            oxygen_beds: 10,
        }
    }

    fn specialties(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_primary_and_list_both_count() {
        let facility = create_test_facility("Cardiology", "Cardiology, General Medicine", "Mandya", "Maddur");
        assert_eq!(specialty_score(&facility, &specialties(&["cardiology"])), 4);
    }

    #[test]
    fn test_scores_accumulate_across_specialties() {
        let facility = create_test_facility("Cardiology", "Cardiology, General Medicine", "Mandya", "Maddur");
        let score = specialty_score(&facility, &specialties(&["Cardiology", "General Medicine", "Oncology"]));
        assert_eq!(score, 3 + 1 + 1);
    }

    #[test]
    fn test_no_specialty_match() {
        let facility = create_test_facility("Orthopedics", "Orthopedics", "Mandya", "Maddur");
        assert_eq!(specialty_score(&facility, &specialties(&["Cardiology"])), 0);
        assert_eq!(specialty_score(&facility, &[]), 0);
    }

    #[test]
    fn test_location_weights() {
        let facility = create_test_facility("Cardiology", "", "Mandya", "Maddur");

        assert_eq!(location_score(&facility, Some("mandya"), None), 3);
        assert_eq!(location_score(&facility, Some("mand"), None), 2);
        assert_eq!(location_score(&facility, None, Some("maddur")), 4);
        assert_eq!(location_score(&facility, None, Some("madd")), 3);
        assert_eq!(location_score(&facility, Some("mandya"), Some("maddur")), 7);
        assert_eq!(location_score(&facility, Some("mysuru"), Some("hunsur")), 0);
        assert_eq!(location_score(&facility, None, None), 0);
    }

    #[test]
    fn test_score_facility_totals() {
        let facility = create_test_facility("Cardiology", "Cardiology", "Mandya", "Maddur");
        let origin = Coordinates::new(12.52, 76.89);

        let candidate = score_facility(&facility, &specialties(&["Cardiology"]), Some("mandya"), None, origin);

        assert_eq!(candidate.specialty_score, 4);
        assert_eq!(candidate.location_score, 3);
        assert_eq!(candidate.total_score, 7);
        assert!(candidate.distance_km.unwrap() < 0.01);
    }

    #[test]
    fn test_missing_origin_gives_unknown_distance() {
        let facility = create_test_facility("Cardiology", "", "Mandya", "Maddur");
        let candidate = score_facility(&facility, &[], None, None, None);
        assert!(candidate.distance_km.is_none());
        assert_eq!(candidate.distance_key(), f64::INFINITY);
    }
}
