// Core algorithm exports
pub mod distance;
pub mod filters;
pub mod matcher;
pub mod scoring;
pub mod text;

pub use distance::{distance_between, haversine_distance};
pub use filters::{apply_limit, narrow_by_location, retain_with_capacity};
pub use matcher::{compare_candidates, rank_facilities, Matcher};
pub use scoring::{location_score, score_facility, specialty_score};
