/// Calculate distance between two coordinates using Haversine formula
/// Returns distance in kilometers
pub fn haversine_distance(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    const EARTH_RADIUS_KM: f64 = 6371.0;

    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lng = (lng2 - lng1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_KM * c
}

/// Check if a stored coordinate falls within `radius_km` of a query point.
/// The boundary is inclusive, so a point at the query coordinates matches
/// even for a zero radius.
pub fn within_radius(query_lat: f64, query_lng: f64, lat: f64, lng: f64, radius_km: f64) -> bool {
    haversine_distance(query_lat, query_lng, lat, lng) <= radius_km
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_haversine_mumbai_pune() {
        // Mumbai
        let mumbai = (19.0760, 72.8777);
        // Pune
        let pune = (18.5204, 73.8567);

        let distance = haversine_distance(mumbai.0, mumbai.1, pune.0, pune.1);
        // Should be approximately 120 km
        assert!(distance > 100.0 && distance < 150.0);
    }

    #[test]
    fn test_point_at_query_coordinates_always_within() {
        let point = (30.0869, 78.2676); // Rishikesh

        assert!(within_radius(point.0, point.1, point.0, point.1, 0.0));
        assert!(within_radius(point.0, point.1, point.0, point.1, 5.0));
    }

    #[test]
    fn test_within_radius_boundary() {
        let manali = (32.2396, 77.1887);
        let nearby = (32.25, 77.19); // about a kilometre away

        assert!(within_radius(manali.0, manali.1, nearby.0, nearby.1, 5.0));

        let goa = (15.2993, 74.1240);
        assert!(!within_radius(manali.0, manali.1, goa.0, goa.1, 50.0));
    }
}
