use crate::models::Coordinates;

/// Earth's radius in kilometers
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Calculate the Haversine distance between two points in kilometers
///
/// # Arguments
/// * `lat1` - Latitude of first point in degrees
/// * `lon1` - Longitude of first point in degrees
/// * `lat2` - Latitude of second point in degrees
/// * `lon2` - Longitude of second point in degrees
///
/// # Returns
/// Distance in kilometers
#[inline]
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Distance between two optional points.
///
/// `None` means "unknown": either endpoint is missing. Callers must sort an
/// unknown distance after every known one, never treat it as zero.
#[inline]
pub fn distance_between(from: Option<Coordinates>, to: Option<Coordinates>) -> Option<f64> {
    match (from, to) {
        (Some(a), Some(b)) => Some(haversine_distance(
            a.latitude,
            a.longitude,
            b.latitude,
            b.longitude,
        )),
        _ => None,
    }
}

/// Parse a dataset coordinate pair, keeping absence distinct from `0.0`.
pub fn parse_coordinates(lat: &str, lng: &str) -> Option<Coordinates> {
    let lat = lat.trim().parse::<f64>().ok()?;
    let lng = lng.trim().parse::<f64>().ok()?;
    Coordinates::new(lat, lng)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_haversine_distance() {
        // Bengaluru to Mysuru (approximately 128 km)
        let distance = haversine_distance(12.9716, 77.5946, 12.2958, 76.6394);
        assert!((distance - 128.0).abs() < 10.0, "Distance should be ~128km, got {}", distance);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let a = haversine_distance(12.52, 76.89, 13.34, 77.10);
        let b = haversine_distance(13.34, 77.10, 12.52, 76.89);
        assert_eq!(a, b);
        assert_eq!(haversine_distance(12.52, 76.89, 12.52, 76.89), 0.0);
    }

    #[test]
    fn test_unknown_when_endpoint_missing() {
        let here = Coordinates::new(12.52, 76.89);
        assert!(distance_between(here, None).is_none());
        assert!(distance_between(None, here).is_none());
        assert!(distance_between(here, here).is_some());
    }

    #[test]
    fn test_parse_coordinates_tracks_presence() {
        assert!(parse_coordinates("", "").is_none());
        assert!(parse_coordinates("12.5", "").is_none());
        assert!(parse_coordinates("abc", "76.9").is_none());
        assert!(parse_coordinates("NaN", "76.9").is_none());
        assert!(parse_coordinates("95.0", "76.9").is_none());

        let origin = parse_coordinates("0", "0").expect("zero is a real coordinate when written");
        assert_eq!(origin.latitude, 0.0);
    }
}
