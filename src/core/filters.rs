use crate::core::text::normalize;
use crate::models::{FacilityRecord, ScoredCandidate};

/// Drop facilities with zero ICU beds and zero total beds
///
/// This is Stage 2 of the ranking pipeline. It runs regardless of score.
pub fn retain_with_capacity(candidates: &mut Vec<ScoredCandidate<'_>>) {
    candidates.retain(|c| c.facility.has_capacity());
}

/// Exact or partial match of a facility field against a normalised hint
#[inline]
pub fn matches_area(field: &str, hint: &str) -> bool {
    let field = normalize(field);
    field == hint || field.contains(hint)
}

/// Restrict candidates to the ones matching `hint`, unless that would leave none
///
/// An over-narrow or misspelt hint degrades to no restriction rather than an
/// empty result. Returns whether the restriction was applied.
pub fn narrow_by_area<F>(
    candidates: &mut Vec<ScoredCandidate<'_>>,
    hint: Option<&str>,
    field: F,
) -> bool
where
    F: Fn(&FacilityRecord) -> &str,
{
    let Some(hint) = hint else {
        return false;
    };

    if !candidates.iter().any(|c| matches_area(field(c.facility), hint)) {
        tracing::debug!("Area hint {:?} matched nothing, keeping {} candidates", hint, candidates.len());
        return false;
    }

    candidates.retain(|c| matches_area(field(c.facility), hint));
    true
}

/// Progressive area narrowing: sub-district first, then district on the result
///
/// This is Stage 3 of the ranking pipeline.
pub fn narrow_by_location(
    candidates: &mut Vec<ScoredCandidate<'_>>,
    district: Option<&str>,
    sub_district: Option<&str>,
) {
    narrow_by_area(candidates, sub_district, |f| f.sub_district.as_str());
    narrow_by_area(candidates, district, |f| f.district.as_str());
}

/// Truncate an already-sorted list to the caller-requested count
///
/// `None` and `Some(0)` both return the full list.
pub fn apply_limit<T>(mut items: Vec<T>, max_results: Option<usize>) -> Vec<T> {
    if let Some(limit) = max_results.filter(|&n| n > 0) {
        items.truncate(limit);
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scoring::score_facility;

    fn create_test_facility(id: &str, district: &str, taluk: &str, total: u32, icu: u32) -> FacilityRecord {
        FacilityRecord {
            id: id.to_string(),
            name: format!("Hospital {}", id),
            district: district.to_string(),
            sub_district: taluk.to_string(),
            coordinates: None,
            primary_specialty: "General Medicine".to_string(),
            specialty_list: String::new(),
            total_beds: total,
            icu_beds: icu,
            oxygen_beds: 0,
        }
    }

    fn candidates(facilities: &[FacilityRecord]) -> Vec<ScoredCandidate<'_>> {
        facilities
            .iter()
            .map(|f| score_facility(f, &[], None, None, None))
            .collect()
    }

    fn ids(candidates: &[ScoredCandidate<'_>]) -> Vec<String> {
        candidates.iter().map(|c| c.facility.id.clone()).collect()
    }

    #[test]
    fn test_capacity_filter() {
        let facilities = vec![
            create_test_facility("1", "Mandya", "Maddur", 20, 0),
            create_test_facility("2", "Mandya", "Maddur", 0, 2),
            create_test_facility("3", "Mandya", "Maddur", 0, 0),
        ];
        let mut list = candidates(&facilities);

        retain_with_capacity(&mut list);

        assert_eq!(ids(&list), vec!["1", "2"]);
    }

    #[test]
    fn test_narrowing_applies_when_something_matches() {
        let facilities = vec![
            create_test_facility("1", "Mandya", "Maddur", 20, 0),
            create_test_facility("2", "Mandya", "Malavalli", 20, 0),
        ];
        let mut list = candidates(&facilities);

        let applied = narrow_by_area(&mut list, Some("maddur"), |f| f.sub_district.as_str());

        assert!(applied);
        assert_eq!(ids(&list), vec!["1"]);
    }

    #[test]
    fn test_narrowing_degrades_on_unmatched_hint() {
        let facilities = vec![
            create_test_facility("1", "Mysuru", "Hunsur", 20, 0),
            create_test_facility("2", "Mandya", "Malavalli", 20, 0),
        ];
        let mut list = candidates(&facilities);

        narrow_by_location(&mut list, Some("mandya"), Some("maddur"));

        assert_eq!(ids(&list), vec!["2"]);
    }

    #[test]
    fn test_partial_area_match() {
        assert!(matches_area("Mysuru Rural", "mysuru"));
        assert!(matches_area(" MYSURU ", "mysuru"));
        assert!(!matches_area("Mysuru", "mysuru rural"));
    }

    #[test]
    fn test_apply_limit() {
        assert_eq!(apply_limit(vec![1, 2, 3], Some(2)), vec![1, 2]);
        assert_eq!(apply_limit(vec![1, 2, 3], Some(10)), vec![1, 2, 3]);
        assert_eq!(apply_limit(vec![1, 2, 3], Some(0)), vec![1, 2, 3]);
        assert_eq!(apply_limit(vec![1, 2, 3], None), vec![1, 2, 3]);
    }
}
