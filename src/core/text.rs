/// Lowercase and trim a free-text field for comparison.
///
/// All specialty, district and sub-district comparisons in the matcher go
/// through this so that the scoring weights can be tested in isolation from
/// dataset casing.
#[inline]
pub fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Case-insensitive substring test. An empty needle never matches.
#[inline]
pub fn contains_ci(haystack: &str, needle: &str) -> bool {
    let needle = normalize(needle);
    !needle.is_empty() && normalize(haystack).contains(&needle)
}

/// Case-insensitive equality on trimmed values.
#[inline]
pub fn eq_ci(a: &str, b: &str) -> bool {
    normalize(a) == normalize(b)
}

/// Normalise an optional hint, treating blank strings as absent.
pub fn normalize_hint(hint: Option<&str>) -> Option<String> {
    hint.map(normalize).filter(|h| !h.is_empty())
}
